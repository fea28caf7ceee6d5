use anyhow::Result;
use std::path::PathBuf;

use super::config::{Config, Overrides};

/// Validate a configuration file and print the resolved settings
pub fn run(file: PathBuf) -> Result<()> {
    let config = Config::from_file(&file)?.resolve(&Overrides::default())?;

    println!("pstat-ingest Configuration");
    println!("==========================");
    println!("File: {}", file.display());
    println!();
    println!("Calibration:");
    println!("  {}", config.calibration);
    println!();
    println!("Parser:");
    println!("  Delimiter: {:?}", char::from(config.parser.delimiter));
    println!();
    println!("Archive:");
    println!("  Directory: {}", config.archive.directory.display());
    println!("  Extension: {}", config.archive.extension);
    println!();
    println!("Series:");
    match config.series.retention {
        Some(cap) => println!("  Retention: {} entries", cap),
        None => println!("  Retention: unbounded"),
    }

    Ok(())
}
