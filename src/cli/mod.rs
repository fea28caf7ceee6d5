use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use pstat_ingest::config::PipelineConfig;

mod check_config;
mod config;
mod ingest;
mod replay;

pub use config::{Config, Overrides};

/// pstat-ingest - potentiostat batch ingestion and concentration estimation
#[derive(Parser)]
#[command(name = "pstat-ingest")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every command that builds a pipeline.
#[derive(Args, Debug)]
pub struct PipelineArgs {
    /// Load settings from a TOML config file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Calibration slope (overrides the config file)
    #[arg(long, allow_hyphen_values = true)]
    slope: Option<f64>,

    /// Calibration intercept (overrides the config file)
    #[arg(long, allow_hyphen_values = true)]
    intercept: Option<f64>,

    /// Field delimiter of uploaded batches
    #[arg(short = 'd', long)]
    delimiter: Option<String>,

    /// Directory receiving archived batches
    #[arg(long, value_name = "DIR")]
    archive_dir: Option<PathBuf>,
}

impl PipelineArgs {
    /// Resolve the config file and flags into a pipeline configuration.
    ///
    /// Fails when the resulting calibration cannot be used, before any batch
    /// is read.
    fn load(self) -> Result<PipelineConfig> {
        let file = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };

        file.resolve(&Overrides {
            slope: self.slope,
            intercept: self.intercept,
            delimiter: self.delimiter,
            archive_dir: self.archive_dir,
        })
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Ingest measurement batch files and print the resulting series
    Ingest {
        /// Batch files, ingested in the order given
        #[arg(value_name = "FILES", required = true)]
        files: Vec<PathBuf>,

        #[command(flatten)]
        pipeline: PipelineArgs,
    },

    /// Rebuild the series from an archive directory without re-archiving
    Replay {
        /// Archive directory (defaults to the configured one)
        #[arg(value_name = "DIR")]
        archive_dir: Option<PathBuf>,

        #[command(flatten)]
        pipeline: PipelineArgs,
    },

    /// Validate a configuration file and show the resolved settings
    CheckConfig {
        /// TOML configuration file
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Ingest { files, pipeline } => ingest::run(files, pipeline.load()?),
        Commands::Replay {
            archive_dir,
            pipeline,
        } => replay::run(archive_dir, pipeline.load()?),
        Commands::CheckConfig { file } => check_config::run(file),
    }
}
