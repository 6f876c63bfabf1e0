//! Benchmark result data models
//!
//! Per-block timing samples, the result that owns them, and everything
//! derived from it: phase statistics, the text report, the JSON summary,
//! and the progress-over-time curves used for plotting.

use crate::config::BenchmarkConfig;
use crate::util::units::{bytes_to_mb, round_to, throughput_mbps};
use crate::{MonkeyError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Timing of one sequential block write
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WriteSample {
    /// Zero-based position in write order
    pub block_index: u64,
    #[serde(rename = "duration_seconds", with = "duration_secs")]
    pub duration: Duration,
}

/// Timing of one random-offset block read
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReadSample {
    /// One-based position in the shuffled read order
    pub block_index: u64,
    /// Byte offset the block was read from
    pub offset: u64,
    #[serde(rename = "duration_seconds", with = "duration_secs")]
    pub duration: Duration,
}

impl WriteSample {
    pub fn new(block_index: u64, duration: Duration) -> Self {
        Self {
            block_index,
            duration,
        }
    }
}

impl ReadSample {
    pub fn new(block_index: u64, offset: u64, duration: Duration) -> Self {
        Self {
            block_index,
            offset,
            duration,
        }
    }
}

/// Complete benchmark result: the originating config and both sample sequences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkResult {
    /// When the run started
    pub started_at: DateTime<Utc>,
    /// Configuration used for this run
    pub config: BenchmarkConfig,
    /// Write samples in write order
    pub write_samples: Vec<WriteSample>,
    /// Read samples in shuffled order, truncated at end of file
    pub read_samples: Vec<ReadSample>,
    /// Number of reads the read phase planned before any early stop
    pub read_blocks_planned: u64,
}

/// Aggregate figures for one phase
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseStats {
    pub samples: usize,
    /// Sum of all block durations, in seconds
    pub total_seconds: f64,
    /// Configured total megabytes over total time
    pub speed_mbps: f64,
    /// Throughput of the fastest block
    pub max_block_mbps: f64,
    /// Throughput of the slowest block
    pub min_block_mbps: f64,
}

impl PhaseStats {
    /// Aggregate a phase from its block durations.
    ///
    /// Fails with `DegenerateResult` when there are no samples or any
    /// divisor would be zero.
    pub fn compute(
        phase: &str,
        total_megabytes: f64,
        block_size_mb: f64,
        durations: &[Duration],
    ) -> Result<Self> {
        let (Some(fastest), Some(slowest)) = (durations.iter().min(), durations.iter().max())
        else {
            return Err(MonkeyError::DegenerateResult(format!(
                "{} phase collected no samples",
                phase
            )));
        };

        let total_seconds = durations.iter().sum::<Duration>().as_secs_f64();
        let zero_time = || {
            MonkeyError::DegenerateResult(format!("{} phase measured zero elapsed time", phase))
        };

        let speed_mbps = throughput_mbps(total_megabytes, total_seconds).ok_or_else(zero_time)?;
        let max_block_mbps =
            throughput_mbps(block_size_mb, fastest.as_secs_f64()).ok_or_else(zero_time)?;
        let min_block_mbps =
            throughput_mbps(block_size_mb, slowest.as_secs_f64()).ok_or_else(zero_time)?;

        Ok(Self {
            samples: durations.len(),
            total_seconds,
            speed_mbps,
            max_block_mbps,
            min_block_mbps,
        })
    }
}

/// Rounded headline figures, serialized as the JSON export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultSummary {
    #[serde(rename = "writtenMB")]
    pub written_mb: u64,
    #[serde(rename = "writeTimeSeconds")]
    pub write_time_seconds: f64,
    #[serde(rename = "writeSpeedMBps")]
    pub write_speed_mbps: f64,
    #[serde(rename = "readBlockCount")]
    pub read_block_count: u64,
    #[serde(rename = "readTimeSeconds")]
    pub read_time_seconds: f64,
    #[serde(rename = "readSpeedMBps")]
    pub read_speed_mbps: f64,
}

impl BenchmarkResult {
    /// Create an empty result for a run that is about to start
    pub fn new(config: BenchmarkConfig) -> Self {
        let read_blocks_planned = config.read_block_count();
        Self {
            started_at: Utc::now(),
            config,
            write_samples: Vec::new(),
            read_samples: Vec::new(),
            read_blocks_planned,
        }
    }

    /// Build a result from samples collected elsewhere
    pub fn from_samples(
        config: BenchmarkConfig,
        write_samples: Vec<WriteSample>,
        read_samples: Vec<ReadSample>,
    ) -> Self {
        Self {
            write_samples,
            read_samples,
            ..Self::new(config)
        }
    }

    /// Write phase statistics.
    ///
    /// The per-block bounds use the configured write block size in MB.
    pub fn write_stats(&self) -> Result<PhaseStats> {
        let durations: Vec<Duration> = self.write_samples.iter().map(|s| s.duration).collect();
        PhaseStats::compute(
            "Write",
            self.config.total_megabytes as f64,
            bytes_to_mb(self.config.write_block_size_bytes()),
            &durations,
        )
    }

    /// Read phase statistics.
    ///
    /// Speed divides the configured total megabytes, not the bytes read,
    /// so an early EOF overstates it.
    pub fn read_stats(&self) -> Result<PhaseStats> {
        let durations: Vec<Duration> = self.read_samples.iter().map(|s| s.duration).collect();
        PhaseStats::compute(
            "Read",
            self.config.total_megabytes as f64,
            bytes_to_mb(self.config.read_block_size_bytes),
            &durations,
        )
    }

    /// Fail unless both phases yield finite statistics
    pub fn ensure_measurable(&self) -> Result<()> {
        self.write_stats()?;
        self.read_stats()?;
        Ok(())
    }

    /// Headline figures rounded to two decimals
    pub fn summary(&self) -> Result<ResultSummary> {
        let write = self.write_stats()?;
        let read = self.read_stats()?;

        Ok(ResultSummary {
            written_mb: self.config.total_megabytes,
            write_time_seconds: round_to(write.total_seconds, 2),
            write_speed_mbps: round_to(write.speed_mbps, 2),
            read_block_count: self.read_samples.len() as u64,
            read_time_seconds: round_to(read.total_seconds, 2),
            read_speed_mbps: round_to(read.speed_mbps, 2),
        })
    }

    /// Human-readable two-paragraph report
    pub fn format_result(&self) -> Result<String> {
        let write = self.write_stats()?;
        let read = self.read_stats()?;

        Ok(format!(
            "Written {} MB in {:.4}s\n\
             Write speed is  {:.2} MB/s\n  \
             max: {:.2}, min: {:.2}\n\
             \n\
             Read {} x {} B blocks in {:.4}s\n\
             Read speed is  {:.2} MB/s\n  \
             max: {:.2}, min: {:.2}\n",
            self.config.total_megabytes,
            write.total_seconds,
            write.speed_mbps,
            write.max_block_mbps,
            write.min_block_mbps,
            self.read_samples.len(),
            self.config.read_block_size_bytes,
            read.total_seconds,
            read.speed_mbps,
            read.max_block_mbps,
            read.min_block_mbps,
        ))
    }

    /// The JSON summary as a string
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.summary()?)?)
    }

    /// Write the JSON summary to `path`, replacing any existing content
    pub fn export_json(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        fs::write(path, json).map_err(MonkeyError::io(format!(
            "writing JSON results to {}",
            path.display()
        )))
    }

    /// `(cumulative seconds, percent complete)` after each written block
    pub fn write_curve(&self) -> Vec<(f64, f64)> {
        let total = self.config.write_block_count().max(1) as f64;
        progress_curve(
            self.write_samples
                .iter()
                .map(|s| (s.duration, (s.block_index + 1) as f64 * 100.0 / total)),
        )
    }

    /// `(cumulative seconds, percent complete)` after each read block.
    ///
    /// Percent is relative to the planned read count, so a run cut short by
    /// EOF ends below 100.
    pub fn read_curve(&self) -> Vec<(f64, f64)> {
        let total = self.read_blocks_planned.max(1) as f64;
        progress_curve(
            self.read_samples
                .iter()
                .map(|s| (s.duration, s.block_index as f64 * 100.0 / total)),
        )
    }
}

fn progress_curve(points: impl Iterator<Item = (Duration, f64)>) -> Vec<(f64, f64)> {
    let mut elapsed = Duration::ZERO;
    points
        .map(|(duration, percent)| {
            elapsed += duration;
            (elapsed.as_secs_f64(), percent)
        })
        .collect()
}

// Durations are stored as float seconds
mod duration_secs {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_secs_f64().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(serde::de::Error::custom)
    }
}
