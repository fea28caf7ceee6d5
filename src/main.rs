//! # pstat-ingest
//!
//! Command-line front end for the potentiostat ingestion pipeline.
//!
//! ## Usage
//!
//! ```bash
//! # Ingest sweep batches and print the concentration series
//! pstat-ingest ingest sweep_01.csv sweep_02.csv --config pstat.toml
//!
//! # Rebuild the series from the archive
//! pstat-ingest replay out/
//!
//! # Check a configuration before deploying it
//! pstat-ingest check-config pstat.toml
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

use cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
