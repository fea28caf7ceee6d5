//! TOML configuration file support.
//!
//! Every setting has a default; a config file only needs the keys it changes:
//!
//! ```toml
//! # pstat.toml
//! [calibration]
//! slope = 10.268
//! intercept = 1.1028
//! signal_scale = 1e6     # batches report amperes, calibration is in µA
//! clamp = "bounded"      # "bounded", "floor" or "none"
//! lower_bound = 10.0
//! upper_bound = 10000.0
//!
//! [parser]
//! delimiter = ","
//!
//! [archive]
//! directory = "out"
//! extension = "csv"
//!
//! [series]
//! retention = 100000
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use pstat_ingest::calibration::{CalibrationModel, ClampPolicy};
use pstat_ingest::config::{ArchiveConfig, ParserConfig, PipelineConfig, SeriesConfig};

/// Root configuration structure for pstat.toml files.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Sensor calibration settings.
    #[serde(default)]
    pub calibration: CalibrationSection,

    /// Batch decoding settings.
    #[serde(default)]
    pub parser: ParserSection,

    /// Raw batch archive settings.
    #[serde(default)]
    pub archive: ArchiveSection,

    /// In-memory series settings.
    #[serde(default)]
    pub series: SeriesSection,
}

/// `[calibration]` table.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CalibrationSection {
    /// Slope of the calibration line (must be non-zero).
    pub slope: Option<f64>,

    /// Intercept of the calibration line.
    pub intercept: Option<f64>,

    /// Factor applied to the raw peak current before inversion.
    pub signal_scale: Option<f64>,

    /// Clamp policy.
    pub clamp: Option<ClampPolicy>,

    /// Estimates below this snap to 0.
    pub lower_bound: Option<f64>,

    /// Estimates above this snap to it (bounded policy only).
    pub upper_bound: Option<f64>,
}

/// `[parser]` table.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParserSection {
    /// Single-character field delimiter.
    pub delimiter: Option<String>,
}

/// `[archive]` table.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArchiveSection {
    /// Directory receiving one file per upload.
    pub directory: Option<PathBuf>,

    /// Extension of archive files.
    pub extension: Option<String>,
}

/// `[series]` table.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeriesSection {
    /// Maximum number of history entries kept in memory.
    pub retention: Option<usize>,
}

/// Command-line values that take precedence over the file.
#[derive(Debug, Default)]
pub struct Overrides {
    pub slope: Option<f64>,
    pub intercept: Option<f64>,
    pub delimiter: Option<String>,
    pub archive_dir: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }

    /// Merge file settings, overrides and defaults into a validated
    /// pipeline configuration.
    pub fn resolve(self, overrides: &Overrides) -> Result<PipelineConfig> {
        let defaults = PipelineConfig::default();
        let base = defaults.calibration;
        let cal = &self.calibration;

        let calibration = CalibrationModel::new(
            overrides.slope.or(cal.slope).unwrap_or(base.slope()),
            overrides.intercept.or(cal.intercept).unwrap_or(base.intercept()),
        )
        .and_then(|model| model.with_signal_scale(cal.signal_scale.unwrap_or(base.signal_scale())))
        .and_then(|model| {
            model.with_clamp(
                cal.clamp.unwrap_or(base.clamp()),
                cal.lower_bound.unwrap_or(base.lower_bound()),
                cal.upper_bound.unwrap_or(base.upper_bound()),
            )
        })
        .context("Invalid calibration, refusing to start")?;

        let parser = match overrides.delimiter.as_deref().or(self.parser.delimiter.as_deref()) {
            Some(delimiter) => ParserConfig::from_delimiter(delimiter)?,
            None => defaults.parser,
        };

        let archive = ArchiveConfig {
            directory: overrides
                .archive_dir
                .clone()
                .or(self.archive.directory)
                .unwrap_or(defaults.archive.directory),
            extension: self.archive.extension.unwrap_or(defaults.archive.extension),
        };

        let series = SeriesConfig::from_retention(self.series.retention)?;

        Ok(PipelineConfig {
            calibration,
            parser,
            archive,
            series,
        })
    }
}
