//! # pstat-ingest - Potentiostat Batch Ingestion
//!
//! `pstat-ingest` turns sweep batches uploaded by an electrochemical sensor
//! into a running series of analyte-concentration estimates.
//!
//! ## Pipeline
//!
//! 1. **Parse**: the delimited-text upload is decoded into parallel
//!    index/current/voltage/time columns; the header line is discarded and
//!    malformed rows are dropped ([`batch`]).
//! 2. **Locate**: the peak current of the sweep is found ([`peak`]).
//! 3. **Estimate**: the peak is mapped through the deployment's linear
//!    calibration and clamped ([`calibration`]).
//! 4. **Record**: the estimate and the sweep's traces are appended to the
//!    shared [`series::SeriesStore`].
//! 5. **Archive**: the raw upload is written verbatim to a timestamp-named
//!    file ([`archive`]).
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pstat_ingest::calibration::CalibrationModel;
//! use pstat_ingest::config::PipelineConfig;
//! use pstat_ingest::pipeline::IngestionPipeline;
//!
//! let config = PipelineConfig {
//!     calibration: CalibrationModel::new(0.03, 1.0)?,
//!     ..Default::default()
//! };
//! let pipeline = IngestionPipeline::new(config);
//!
//! let outcome = pipeline.ingest("idx,current,voltage,time\n0,1.0,0.5,10\n1,31.0,0.6,20")?;
//! println!("concentration: {}", outcome.result.concentration);
//! if let Some(warning) = outcome.warning() {
//!     eprintln!("not archived: {warning}");
//! }
//!
//! let snapshot = pipeline.query();
//! assert_eq!(snapshot.concentration_history.len(), 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Documentation lints - enforce complete documentation for publication
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod archive;
pub mod batch;
pub mod calibration;
pub mod config;
pub mod peak;
pub mod pipeline;
pub mod report;
pub mod series;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::archive::{ArchiveError, ArchiveWriter};
    pub use crate::batch::{BatchParser, MeasurementBatch, ParseReport, Sample};
    pub use crate::calibration::{estimate, CalibrationError, CalibrationModel, ClampPolicy};
    pub use crate::config::{ConfigError, PipelineConfig};
    pub use crate::peak::{find_peak, Peak, PeakError};
    pub use crate::pipeline::{
        EstimationResult, IngestError, IngestOutcome, IngestStats, IngestionPipeline,
    };
    pub use crate::series::{SeriesSnapshot, SeriesStore};
}
