use std::path::PathBuf;

use crate::peak::PeakError;

/// Errors that fail an ingest call.
///
/// Row-level parse failures and archive failures are not represented here:
/// the former are absorbed by the parser, the latter are reported on the
/// successful outcome.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// No row of the upload survived parsing, so no estimate is possible
    #[error("batch contains no usable rows ({rows_skipped} rows skipped)")]
    EmptyBatch {
        /// Rows dropped by the parser
        rows_skipped: usize,
        /// Where the raw upload was archived, if archival succeeded
        archive_path: Option<PathBuf>,
    },

    /// Peak location failed
    #[error("peak location failed: {0}")]
    Peak(#[from] PeakError),
}

impl IngestError {
    /// True when the upload itself was at fault (4xx), false for internal
    /// failures (5xx).
    pub fn is_client_error(&self) -> bool {
        matches!(self, IngestError::EmptyBatch { .. })
    }
}
