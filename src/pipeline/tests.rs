use super::*;
use crate::calibration::{CalibrationModel, ClampPolicy};
use crate::config::{ArchiveConfig, PipelineConfig, SeriesConfig};
use chrono::{Local, TimeZone};
use std::fs;
use tempfile::tempdir;

const SWEEP: &str = "idx,current,voltage,time\n0,1.0,0.5,10\n1,5.0,0.6,20\n2,2.0,0.4,30";

fn config_in(directory: &std::path::Path, model: CalibrationModel) -> PipelineConfig {
    PipelineConfig {
        calibration: model,
        archive: ArchiveConfig {
            directory: directory.to_path_buf(),
            ..Default::default()
        },
        ..Default::default()
    }
}

fn received_at(second: u32) -> chrono::DateTime<Local> {
    Local.with_ymd_and_hms(2025, 6, 1, 12, 0, second).earliest().unwrap()
}

#[test]
fn test_ingest_end_to_end() {
    let dir = tempdir().unwrap();
    let model = CalibrationModel::unclamped(2.0, 1.0).unwrap();
    let pipeline = IngestionPipeline::new(config_in(dir.path(), model));

    let outcome = pipeline.ingest_at(SWEEP, received_at(0)).unwrap();
    let result = &outcome.result;

    assert_eq!(result.peak_current, 5.0);
    assert_eq!(result.peak_index, 1);
    assert_eq!(result.peak_elapsed_ms, 20.0);
    assert_eq!(result.concentration, 2.0);
    assert_eq!(result.measurement_time, received_at(0));
    assert_eq!(result.raw_currents, vec![1.0, 5.0, 2.0]);
    assert_eq!(result.raw_voltages, vec![0.5, 0.6, 0.4]);
    assert_eq!(outcome.rows_skipped, 0);
    assert!(!outcome.is_degraded());

    let snapshot = pipeline.query();
    assert_eq!(snapshot.concentration_history, vec![2.0]);
    assert_eq!(snapshot.time_history, vec![received_at(0)]);
    assert_eq!(snapshot.current_concentration, 2.0);
    assert_eq!(snapshot.latest_current, vec![1.0, 5.0, 2.0]);
    assert_eq!(snapshot.latest_voltage, vec![0.5, 0.6, 0.4]);

    let archived = outcome.archive_path().unwrap();
    assert_eq!(fs::read_to_string(archived).unwrap(), SWEEP);
}

#[test]
fn test_header_only_batch_is_rejected_but_archived() {
    let dir = tempdir().unwrap();
    let pipeline = IngestionPipeline::new(config_in(dir.path(), CalibrationModel::default()));

    let err = pipeline
        .ingest_at("idx,current,voltage,time", received_at(1))
        .unwrap_err();

    match &err {
        IngestError::EmptyBatch {
            rows_skipped,
            archive_path,
        } => {
            assert_eq!(*rows_skipped, 0);
            let path = archive_path.as_ref().unwrap();
            assert_eq!(fs::read_to_string(path).unwrap(), "idx,current,voltage,time");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.is_client_error());
    assert!(pipeline.store().is_empty());
    assert_eq!(pipeline.query(), SeriesSnapshot::default());
}

#[test]
fn test_all_rows_malformed_is_empty_batch() {
    let dir = tempdir().unwrap();
    let pipeline = IngestionPipeline::new(config_in(dir.path(), CalibrationModel::default()));

    let err = pipeline
        .ingest_at("h\na,b,c,d\n1,2", received_at(2))
        .unwrap_err();
    assert!(matches!(err, IngestError::EmptyBatch { rows_skipped: 2, .. }));

    let stats = pipeline.stats();
    assert_eq!(stats.batches_rejected, 1);
    assert_eq!(stats.rows_skipped, 2);
}

#[test]
fn test_archive_failure_is_degraded_success() {
    let dir = tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, "file in the way").unwrap();

    let model = CalibrationModel::unclamped(2.0, 1.0).unwrap();
    let pipeline = IngestionPipeline::new(config_in(&blocker.join("out"), model));

    let outcome = pipeline.ingest_at(SWEEP, received_at(3)).unwrap();
    assert!(outcome.is_degraded());
    assert!(outcome.archive_path().is_none());
    assert!(outcome.warning().unwrap().contains("archive"));

    // The estimate was still recorded
    assert_eq!(outcome.result.concentration, 2.0);
    assert_eq!(pipeline.query().concentration_history, vec![2.0]);
    assert_eq!(pipeline.stats().archive_failures, 1);
}

#[test]
fn test_archive_failure_on_empty_batch_keeps_empty_batch_error() {
    let dir = tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, "").unwrap();

    let pipeline = IngestionPipeline::new(config_in(&blocker, CalibrationModel::default()));
    let err = pipeline.ingest_at("header", received_at(4)).unwrap_err();

    assert!(matches!(
        err,
        IngestError::EmptyBatch {
            archive_path: None,
            ..
        }
    ));
}

#[test]
fn test_skipped_rows_reported_and_clamp_applied() {
    let dir = tempdir().unwrap();
    let model = CalibrationModel::new(1.0, 0.0)
        .unwrap()
        .with_clamp(ClampPolicy::Bounded, 10.0, 10_000.0)
        .unwrap();
    let pipeline = IngestionPipeline::new(config_in(dir.path(), model));

    let raw = "h\n0,5.0,0.1,1\nbad row\n1,20000.0,0.2,2";
    let outcome = pipeline.ingest_at(raw, received_at(5)).unwrap();
    assert_eq!(outcome.rows_skipped, 1);
    assert_eq!(outcome.result.concentration, 10_000.0);

    let outcome = pipeline.ingest_at("h\n0,5.0,0.1,1", received_at(6)).unwrap();
    assert_eq!(outcome.result.concentration, 0.0);

    assert_eq!(pipeline.query().concentration_history, vec![10_000.0, 0.0]);
}

#[test]
fn test_replay_does_not_archive() {
    let dir = tempdir().unwrap();
    let archive_dir = dir.path().join("out");
    let model = CalibrationModel::unclamped(2.0, 1.0).unwrap();
    let pipeline = IngestionPipeline::new(config_in(&archive_dir, model));

    let result = pipeline.replay(SWEEP, received_at(7)).unwrap();
    assert_eq!(result.concentration, 2.0);
    assert_eq!(pipeline.query().time_history, vec![received_at(7)]);
    assert!(!archive_dir.exists());

    assert!(matches!(
        pipeline.replay("header", received_at(8)),
        Err(IngestError::EmptyBatch { .. })
    ));
}

#[test]
fn test_retention_from_config() {
    let dir = tempdir().unwrap();
    let mut config = config_in(dir.path(), CalibrationModel::unclamped(1.0, 0.0).unwrap());
    config.series = SeriesConfig::from_retention(Some(2)).unwrap();
    let pipeline = IngestionPipeline::new(config);

    for (i, peak) in [1.0, 2.0, 3.0].iter().enumerate() {
        let raw = format!("h\n0,{peak},0.1,1");
        pipeline.replay(&raw, received_at(i as u32)).unwrap();
    }

    assert_eq!(pipeline.query().concentration_history, vec![2.0, 3.0]);
}

#[test]
fn test_shared_store_visible_to_reader() {
    let dir = tempdir().unwrap();
    let store = Arc::new(SeriesStore::new());
    let pipeline = IngestionPipeline::with_store(
        config_in(dir.path(), CalibrationModel::unclamped(2.0, 1.0).unwrap()),
        Arc::clone(&store),
    );

    pipeline.ingest_at(SWEEP, received_at(9)).unwrap();
    assert_eq!(store.snapshot().concentration_history, vec![2.0]);
}

#[test]
fn test_stats_display() {
    let dir = tempdir().unwrap();
    let pipeline = IngestionPipeline::new(config_in(dir.path(), CalibrationModel::default()));
    pipeline.ingest_at(SWEEP, received_at(10)).unwrap();

    let stats = pipeline.stats();
    assert_eq!(stats.batches_ingested, 1);
    assert_eq!(stats.rows_accepted, 3);
    assert!(stats.to_string().starts_with("Ingested 1 batches"));
}
