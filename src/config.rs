//! Runtime configuration for the ingestion pipeline.
//!
//! [`PipelineConfig`] is fixed at startup. The calibration is validated when
//! it is built (see [`CalibrationModel`]), so holding a `PipelineConfig` means
//! the process is allowed to start.

use std::num::NonZeroUsize;
use std::path::PathBuf;

use crate::calibration::{CalibrationError, CalibrationModel};

/// Errors raised while resolving configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The calibration cannot be inverted or its bounds are unusable
    #[error("invalid calibration: {0}")]
    Calibration(#[from] CalibrationError),

    /// The field delimiter is not a single ASCII character, or is a quote or
    /// line terminator
    #[error("field delimiter must be a single ASCII character other than a quote or line break, got {0:?}")]
    InvalidDelimiter(String),

    /// The history retention cap is zero
    #[error("series retention must be at least 1")]
    ZeroRetention,
}

/// Batch decoding options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// Field delimiter byte
    pub delimiter: u8,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl ParserConfig {
    /// Build from a delimiter given as text (`","`, `";"`, `"\t"`, ...)
    pub fn from_delimiter(delimiter: &str) -> Result<Self, ConfigError> {
        let unescaped = match delimiter {
            "\\t" => "\t",
            other => other,
        };
        match unescaped.as_bytes() {
            // quote and record terminators cannot separate fields
            [byte] if byte.is_ascii() && !matches!(byte, b'"' | b'\n' | b'\r') => {
                Ok(Self { delimiter: *byte })
            }
            _ => Err(ConfigError::InvalidDelimiter(delimiter.to_string())),
        }
    }
}

/// Raw batch archive options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveConfig {
    /// Directory receiving one file per upload
    pub directory: PathBuf,
    /// Extension of archive files
    pub extension: String,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("out"),
            extension: "csv".to_string(),
        }
    }
}

/// In-memory series options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeriesConfig {
    /// Maximum number of history entries kept (None = unbounded)
    pub retention: Option<NonZeroUsize>,
}

impl SeriesConfig {
    /// Build from an optional raw retention count
    pub fn from_retention(retention: Option<usize>) -> Result<Self, ConfigError> {
        let retention = retention
            .map(|n| NonZeroUsize::new(n).ok_or(ConfigError::ZeroRetention))
            .transpose()?;
        Ok(Self { retention })
    }
}

/// Complete pipeline configuration
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineConfig {
    /// Sensor calibration
    pub calibration: CalibrationModel,
    /// Batch decoding
    pub parser: ParserConfig,
    /// Raw batch archive
    pub archive: ArchiveConfig,
    /// In-memory series
    pub series: SeriesConfig,
}
