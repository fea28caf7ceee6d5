//! # Ingestion Pipeline
//!
//! Composes the per-batch stages:
//!
//! ```text
//! raw text ─▶ BatchParser ─▶ find_peak ─▶ estimate ─▶ SeriesStore::append
//!                 │                                          │
//!                 └──────────── ArchiveWriter::write ◀───────┘
//! ```
//!
//! The series append happens before archival, and the archive write runs
//! after the series lock is released. An archive failure never rolls back
//! the append; it is returned on [`IngestOutcome::archive`].
//!
//! A batch with no usable rows is archived and then rejected with
//! [`IngestError::EmptyBatch`], leaving the series untouched.
//!
//! [`IngestionPipeline`] is `Send + Sync`; a server shares one instance
//! across request handlers behind an `Arc`.

mod error;
mod stats;
mod types;

#[cfg(test)]
mod tests;

pub use error::IngestError;
pub use stats::IngestStats;
pub use types::{EstimationResult, IngestOutcome};

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Local};
use log::{info, warn};

use crate::archive::{ArchiveError, ArchiveWriter};
use crate::batch::{BatchParser, MeasurementBatch};
use crate::calibration::{estimate, CalibrationModel};
use crate::config::PipelineConfig;
use crate::peak::find_peak;
use crate::series::{SeriesSnapshot, SeriesStore};

use stats::StatsCounters;

/// Per-batch ingestion and estimation pipeline
#[derive(Debug)]
pub struct IngestionPipeline {
    parser: BatchParser,
    model: CalibrationModel,
    store: Arc<SeriesStore>,
    archive: ArchiveWriter,
    stats: StatsCounters,
}

impl IngestionPipeline {
    /// Build a pipeline with a fresh series store
    pub fn new(config: PipelineConfig) -> Self {
        let store = match config.series.retention {
            Some(cap) => SeriesStore::with_retention(cap),
            None => SeriesStore::new(),
        };
        Self::with_store(config, Arc::new(store))
    }

    /// Build a pipeline appending to an existing store
    pub fn with_store(config: PipelineConfig, store: Arc<SeriesStore>) -> Self {
        Self {
            parser: BatchParser::new(config.parser.delimiter),
            model: config.calibration,
            store,
            archive: ArchiveWriter::with_extension(
                config.archive.directory,
                config.archive.extension,
            ),
            stats: StatsCounters::default(),
        }
    }

    /// Calibration in use
    pub fn model(&self) -> &CalibrationModel {
        &self.model
    }

    /// Shared series store
    pub fn store(&self) -> &Arc<SeriesStore> {
        &self.store
    }

    /// Archive writer in use
    pub fn archive(&self) -> &ArchiveWriter {
        &self.archive
    }

    /// Running totals
    pub fn stats(&self) -> IngestStats {
        self.stats.snapshot()
    }

    /// Read path: consistent copy of the series
    pub fn query(&self) -> SeriesSnapshot {
        self.store.snapshot()
    }

    /// Ingest an upload received now
    pub fn ingest(&self, raw: &str) -> Result<IngestOutcome, IngestError> {
        self.ingest_at(raw, Local::now())
    }

    /// Ingest an upload received at `received_at`
    pub fn ingest_at(
        &self,
        raw: &str,
        received_at: DateTime<Local>,
    ) -> Result<IngestOutcome, IngestError> {
        let (batch, report) = self.parser.parse_with_report(raw);
        let rows_skipped = report.rows_skipped();
        self.stats.record_rows(report.rows_accepted, rows_skipped);

        if batch.is_empty() {
            self.stats.record_rejected();
            let archive_path = self.archive_raw(raw, received_at).ok();
            warn!("Rejected batch with no usable rows ({} skipped)", rows_skipped);
            return Err(IngestError::EmptyBatch {
                rows_skipped,
                archive_path,
            });
        }

        let result = self.record(batch, received_at)?;
        let archive = self.archive_raw(raw, received_at);

        info!(
            "Ingested batch: peak {} at #{}, concentration {} ({} rows, {} skipped)",
            result.peak_current,
            result.peak_index,
            result.concentration,
            report.rows_accepted,
            rows_skipped
        );

        Ok(IngestOutcome {
            result,
            rows_skipped,
            archive,
        })
    }

    /// Re-estimate an already archived upload without writing it again.
    pub fn replay(
        &self,
        raw: &str,
        received_at: DateTime<Local>,
    ) -> Result<EstimationResult, IngestError> {
        let (batch, report) = self.parser.parse_with_report(raw);
        self.stats
            .record_rows(report.rows_accepted, report.rows_skipped());

        if batch.is_empty() {
            self.stats.record_rejected();
            return Err(IngestError::EmptyBatch {
                rows_skipped: report.rows_skipped(),
                archive_path: None,
            });
        }

        self.record(batch, received_at)
    }

    fn record(
        &self,
        batch: MeasurementBatch,
        received_at: DateTime<Local>,
    ) -> Result<EstimationResult, IngestError> {
        let peak = find_peak(batch.currents())?;
        let concentration = estimate(peak.value, &self.model);
        let peak_elapsed_ms = batch
            .elapsed_ms()
            .get(peak.index)
            .copied()
            .unwrap_or_default();

        let (currents, voltages) = batch.into_signal_columns();
        self.store
            .append(concentration, received_at, currents.clone(), voltages.clone());
        self.stats.record_ingested();

        Ok(EstimationResult {
            concentration,
            peak_current: peak.value,
            peak_index: peak.index,
            peak_elapsed_ms,
            measurement_time: received_at,
            raw_currents: currents,
            raw_voltages: voltages,
        })
    }

    fn archive_raw(&self, raw: &str, received_at: DateTime<Local>) -> Result<PathBuf, ArchiveError> {
        self.archive.write_at(raw, received_at).map_err(|err| {
            self.stats.record_archive_failure();
            warn!("Archive write failed: {}", err);
            err
        })
    }
}
