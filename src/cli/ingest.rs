use anyhow::{bail, Context, Result};
use log::{info, warn};
use std::fs;
use std::path::PathBuf;

use pstat_ingest::config::PipelineConfig;
use pstat_ingest::pipeline::IngestionPipeline;
use pstat_ingest::report::{BatchCheck, IngestReport};

/// Ingest batch files in order and print the series snapshot as JSON
pub fn run(files: Vec<PathBuf>, config: PipelineConfig) -> Result<()> {
    info!("Calibration: {}", config.calibration);
    info!("Archiving to {}", config.archive.directory.display());

    let pipeline = IngestionPipeline::new(config);
    let mut report = IngestReport::new();

    for file in &files {
        let name = file.display().to_string();
        let raw = match fs::read_to_string(file) {
            Ok(raw) => raw,
            Err(err) => {
                warn!("Failed to read {}: {}", name, err);
                report.add(BatchCheck::failed(name, err.to_string()));
                continue;
            }
        };

        let result = pipeline.ingest(&raw);
        report.add(BatchCheck::from_ingest(name, &result));
    }

    report.stats = pipeline.stats();
    eprintln!("{}", report.format_colored());

    let snapshot = pipeline.query();
    let json = serde_json::to_string_pretty(&snapshot).context("Failed to serialize series snapshot")?;
    println!("{json}");

    if report.failure_count() == report.checks.len() {
        bail!("No batch produced a concentration estimate");
    }

    Ok(())
}
