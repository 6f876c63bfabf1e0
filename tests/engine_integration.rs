use monkeytest::bench::{
    plan_read_offsets, read_test_with_rng, Benchmark, NoProgress, Phase, ProgressUpdate,
};
use monkeytest::config::BenchmarkConfig;
use monkeytest::models::{BenchmarkResult, ResultSummary};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tempfile::tempdir;

fn small_config(path: std::path::PathBuf) -> BenchmarkConfig {
    BenchmarkConfig::default()
        .with_file_path(path)
        .with_total_megabytes(1)
        .with_write_block_size_kb(256)
        .with_read_block_size_bytes(512)
}

#[test]
fn test_full_run_on_small_file() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("scratch");
    let benchmark = Benchmark::new(small_config(path.clone())).unwrap();

    let result = benchmark.run(&mut NoProgress).unwrap();

    assert_eq!(result.write_samples.len(), 4);
    assert_eq!(result.read_samples.len(), 2048);
    assert_eq!(std::fs::metadata(&path).unwrap().len(), 1024 * 1024);

    let write = result.write_stats().unwrap();
    let read = result.read_stats().unwrap();
    for speed in [write.speed_mbps, read.speed_mbps] {
        assert!(speed.is_finite());
        assert!(speed > 0.0);
    }
    assert!(write.min_block_mbps <= write.max_block_mbps);
}

#[test]
fn test_progress_reports_both_phases_in_order() {
    let temp_dir = tempdir().unwrap();
    let benchmark = Benchmark::new(small_config(temp_dir.path().join("scratch"))).unwrap();

    let mut phases = Vec::new();
    let mut observer = |update: ProgressUpdate| phases.push(update.phase);
    benchmark.run(&mut observer).unwrap();

    assert_eq!(phases.len(), 4 + 2048);
    assert!(phases[..4].iter().all(|p| *p == Phase::Write));
    assert!(phases[4..].iter().all(|p| *p == Phase::Read));
}

#[test]
fn test_reads_visit_every_block_once() {
    let temp_dir = tempdir().unwrap();
    let benchmark = Benchmark::new(small_config(temp_dir.path().join("scratch"))).unwrap();
    benchmark.write_test(&mut NoProgress).unwrap();

    let mut rng = SmallRng::seed_from_u64(7);
    let samples = read_test_with_rng(
        &benchmark.config().file_path,
        512,
        2048,
        &mut rng,
        &mut NoProgress,
    )
    .unwrap();

    let mut offsets: Vec<u64> = samples.iter().map(|s| s.offset).collect();
    let mut replay = SmallRng::seed_from_u64(7);
    assert_eq!(offsets, plan_read_offsets(512, 2048, &mut replay));

    offsets.sort_unstable();
    let expected: Vec<u64> = (0..2048).map(|i| i * 512).collect();
    assert_eq!(offsets, expected);

    let indices: Vec<u64> = samples.iter().map(|s| s.block_index).collect();
    assert_eq!(indices, (1..=2048).collect::<Vec<u64>>());
}

#[test]
fn test_json_export_round_trip() {
    let temp_dir = tempdir().unwrap();
    let benchmark = Benchmark::new(small_config(temp_dir.path().join("scratch"))).unwrap();
    let result = benchmark.run(&mut NoProgress).unwrap();

    let json_path = temp_dir.path().join("results.json");
    result.export_json(&json_path).unwrap();

    let text = std::fs::read_to_string(&json_path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    let object = value.as_object().unwrap();
    assert_eq!(object.len(), 6);
    for key in [
        "writtenMB",
        "writeTimeSeconds",
        "writeSpeedMBps",
        "readBlockCount",
        "readTimeSeconds",
        "readSpeedMBps",
    ] {
        assert!(object.contains_key(key), "missing {}", key);
    }

    let summary: ResultSummary = serde_json::from_str(&text).unwrap();
    assert_eq!(summary.written_mb, 1);
    assert_eq!(summary.read_block_count, 2048);
    assert_eq!(summary, result.summary().unwrap());
}

#[test]
fn test_result_survives_serde() {
    let temp_dir = tempdir().unwrap();
    let benchmark = Benchmark::new(small_config(temp_dir.path().join("scratch"))).unwrap();
    let result = benchmark.run(&mut NoProgress).unwrap();

    let json = serde_json::to_string(&result).unwrap();
    let back: BenchmarkResult = serde_json::from_str(&json).unwrap();
    assert_eq!(back.config, result.config);
    assert_eq!(back.write_samples.len(), 4);
    assert_eq!(back.read_blocks_planned, 2048);
}

#[tokio::test]
async fn test_run_blocking_streams_progress() {
    let temp_dir = tempdir().unwrap();
    let config = small_config(temp_dir.path().join("scratch"));
    let (tx, mut rx) = tokio::sync::mpsc::channel::<ProgressUpdate>(4096);

    let result = monkeytest::bench::run_blocking(config, tx).await.unwrap();
    assert_eq!(result.read_samples.len(), 2048);

    let mut last = None;
    while let Some(update) = rx.recv().await {
        last = Some(update);
    }
    let last = last.unwrap();
    assert_eq!(last.phase, Phase::Read);
    assert_eq!(last.completed, last.total);
}
