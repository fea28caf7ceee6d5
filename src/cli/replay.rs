use anyhow::{Context, Result};
use log::{info, warn};
use std::fs;
use std::path::PathBuf;

use pstat_ingest::archive::ArchiveWriter;
use pstat_ingest::config::PipelineConfig;
use pstat_ingest::pipeline::IngestionPipeline;
use pstat_ingest::report::{BatchCheck, IngestReport};

/// Rebuild the series from archived batches
pub fn run(archive_dir: Option<PathBuf>, config: PipelineConfig) -> Result<()> {
    let directory = archive_dir.unwrap_or_else(|| config.archive.directory.clone());
    let archive = ArchiveWriter::with_extension(&directory, config.archive.extension.clone());

    let batches = archive
        .list()
        .with_context(|| format!("Failed to list archive {}", directory.display()))?;
    info!("Replaying {} archived batches from {}", batches.len(), directory.display());

    let pipeline = IngestionPipeline::new(config);
    let mut report = IngestReport::new();

    for (received_at, path) in batches {
        let name = path.display().to_string();
        match fs::read_to_string(&path) {
            Ok(raw) => {
                let result = pipeline.replay(&raw, received_at);
                report.add(BatchCheck::from_replay(name, &result));
            }
            Err(err) => {
                warn!("Failed to read {}: {}", name, err);
                report.add(BatchCheck::failed(name, err.to_string()));
            }
        }
    }

    report.stats = pipeline.stats();
    eprintln!("{}", report.format_colored());

    let json = serde_json::to_string_pretty(&pipeline.query())
        .context("Failed to serialize series snapshot")?;
    println!("{json}");

    Ok(())
}
