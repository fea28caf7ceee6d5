use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pstat_ingest::batch::BatchParser;
use pstat_ingest::calibration::CalibrationModel;
use pstat_ingest::config::{ArchiveConfig, PipelineConfig};
use pstat_ingest::pipeline::IngestionPipeline;
use tempfile::TempDir;

/// Synthetic cyclic-voltammetry sweep with a single oxidation peak
fn make_sweep(rows: usize) -> String {
    let mut raw = String::with_capacity(rows * 32);
    raw.push_str("Index,Current_uA,Voltage_V,Time_ms");
    for i in 0..rows {
        let voltage = -0.8 + 1.6 * i as f64 / rows as f64;
        let current = 40.0 * (-(voltage - 0.1).powi(2) / 0.01).exp() + 2.0;
        raw.push_str(&format!("\n{},{:.6},{:.4},{}", i, current, voltage, i * 5));
    }
    raw
}

/// Benchmark decoding alone
fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    let parser = BatchParser::default();

    for rows in [100, 1_000, 10_000] {
        let raw = make_sweep(rows);
        group.throughput(Throughput::Elements(rows as u64));
        group.bench_with_input(BenchmarkId::from_parameter(rows), &raw, |b, raw| {
            b.iter(|| black_box(parser.parse(black_box(raw))))
        });
    }

    group.finish();
}

/// Benchmark the full ingest path without archival
fn bench_replay(c: &mut Criterion) {
    let mut group = c.benchmark_group("replay");
    let temp_dir = TempDir::new().unwrap();

    for rows in [100, 1_000, 10_000] {
        let raw = make_sweep(rows);
        let pipeline = IngestionPipeline::new(PipelineConfig {
            calibration: CalibrationModel::new(0.03, 1.0).unwrap(),
            archive: ArchiveConfig {
                directory: temp_dir.path().join("out"),
                ..Default::default()
            },
            ..Default::default()
        });
        let received_at = chrono::Local::now();

        group.throughput(Throughput::Elements(rows as u64));
        group.bench_with_input(BenchmarkId::from_parameter(rows), &raw, |b, raw| {
            b.iter(|| black_box(pipeline.replay(black_box(raw), received_at).unwrap()))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_parse, bench_replay);
criterion_main!(benches);
