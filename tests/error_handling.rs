use monkeytest::bench::{read_test, Benchmark, NoProgress};
use monkeytest::config::BenchmarkConfig;
use monkeytest::error::user_friendly_message;
use monkeytest::models::{BenchmarkResult, WriteSample};
use monkeytest::MonkeyError;
use std::error::Error;
use std::io::ErrorKind;
use std::time::Duration;
use tempfile::tempdir;

#[test]
fn test_invalid_config_rejected_before_io() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("never");
    let config = BenchmarkConfig::default()
        .with_file_path(&path)
        .with_write_block_size_kb(0);

    let err = Benchmark::new(config).unwrap_err();
    assert!(matches!(err, MonkeyError::Config(_)));
    assert!(!path.exists());
    assert!(user_friendly_message(&err).starts_with("Configuration error"));
}

#[test]
fn test_missing_directory_is_io_not_found() {
    let temp_dir = tempdir().unwrap();
    let config = BenchmarkConfig::default()
        .with_file_path(temp_dir.path().join("missing").join("scratch"))
        .with_total_megabytes(1);

    let err = Benchmark::new(config)
        .unwrap()
        .run(&mut NoProgress)
        .unwrap_err();

    assert_eq!(err.io_kind(), Some(ErrorKind::NotFound));
    assert!(err.source().is_some());
    assert!(user_friendly_message(&err).contains("does not exist"));
}

#[test]
fn test_read_without_scratch_file_fails() {
    let temp_dir = tempdir().unwrap();
    let err = read_test(&temp_dir.path().join("absent"), 512, 4, &mut NoProgress).unwrap_err();
    assert!(matches!(err, MonkeyError::Io { .. }));
}

#[test]
fn test_zero_durations_are_degenerate() {
    let config = BenchmarkConfig::default()
        .with_total_megabytes(1)
        .with_write_block_size_kb(1024);
    let result = BenchmarkResult::from_samples(
        config,
        vec![WriteSample::new(0, Duration::ZERO)],
        Vec::new(),
    );

    let err = result.format_result().unwrap_err();
    assert!(matches!(err, MonkeyError::DegenerateResult(_)));
    assert!(user_friendly_message(&err).contains("too quickly"));
    assert!(result.summary().is_err());
}

#[test]
fn test_io_error_keeps_context() {
    let err = MonkeyError::io("writing block 3")(std::io::Error::new(ErrorKind::Other, "boom"));
    let text = err.to_string();
    assert!(text.contains("writing block 3"));
    assert!(text.contains("boom"));
}
