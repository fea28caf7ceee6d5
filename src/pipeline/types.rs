use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::archive::ArchiveError;

/// Estimate derived from one batch, as recorded in the series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimationResult {
    /// Calibrated, clamped concentration
    pub concentration: f64,
    /// Maximum current of the batch, as uploaded
    pub peak_current: f64,
    /// Position of the peak within the accepted rows
    pub peak_index: usize,
    /// Elapsed-time field of the peak row, in milliseconds
    pub peak_elapsed_ms: f64,
    /// Wall-clock receipt time of the batch
    pub measurement_time: DateTime<Local>,
    /// Current trace of the batch
    pub raw_currents: Vec<f64>,
    /// Voltage trace of the batch
    pub raw_voltages: Vec<f64>,
}

/// Result of a successful ingest call.
///
/// `archive` holds the archival result separately: an `Err` there is a
/// degraded success, the estimate is already recorded.
#[derive(Debug)]
pub struct IngestOutcome {
    /// Estimate appended to the series
    pub result: EstimationResult,
    /// Rows dropped by the parser
    pub rows_skipped: usize,
    /// Archive path, or the archival failure
    pub archive: Result<PathBuf, ArchiveError>,
}

impl IngestOutcome {
    /// Archive path, if archival succeeded
    pub fn archive_path(&self) -> Option<&Path> {
        self.archive.as_deref().ok()
    }

    /// True when the estimate succeeded but archival failed
    pub fn is_degraded(&self) -> bool {
        self.archive.is_err()
    }

    /// Archival failure as a warning message
    pub fn warning(&self) -> Option<String> {
        self.archive.as_ref().err().map(|e| e.to_string())
    }
}
