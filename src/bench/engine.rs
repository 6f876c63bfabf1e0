//! Benchmark engine
//!
//! Runs the write phase and then the read phase against one scratch file
//! and collects their samples into a [`BenchmarkResult`].

use crate::bench::progress::ProgressObserver;
use crate::bench::{read, write};
use crate::config::BenchmarkConfig;
use crate::models::{BenchmarkResult, ReadSample, WriteSample};
use crate::{MonkeyError, Result};
use log::info;

/// Single-threaded benchmark executor
#[derive(Debug, Clone)]
pub struct Benchmark {
    config: BenchmarkConfig,
}

impl Benchmark {
    /// Create a new benchmark executor, rejecting invalid configurations
    pub fn new(config: BenchmarkConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &BenchmarkConfig {
        &self.config
    }

    /// Execute the write phase followed by the read phase.
    ///
    /// The scratch file is left in place for the caller to remove. Fails
    /// with `DegenerateResult` if either phase produced no usable timing.
    pub fn run<O>(&self, observer: &mut O) -> Result<BenchmarkResult>
    where
        O: ProgressObserver + ?Sized,
    {
        let mut result = BenchmarkResult::new(self.config.clone());
        info!(
            "Benchmark started: {} MB, {} KB write blocks, {} B read blocks",
            self.config.total_megabytes,
            self.config.write_block_size_kb,
            self.config.read_block_size_bytes
        );

        result.write_samples = self.write_test(observer)?;
        result.read_samples = self.read_test(observer)?;

        result.ensure_measurable()?;
        Ok(result)
    }

    /// Run only the write phase
    pub fn write_test<O>(&self, observer: &mut O) -> Result<Vec<WriteSample>>
    where
        O: ProgressObserver + ?Sized,
    {
        write::write_test(
            &self.config.file_path,
            self.config.write_block_size_bytes() as usize,
            self.config.write_block_count(),
            observer,
        )
    }

    /// Run only the read phase; the scratch file must already exist
    pub fn read_test<O>(&self, observer: &mut O) -> Result<Vec<ReadSample>>
    where
        O: ProgressObserver + ?Sized,
    {
        read::read_test(
            &self.config.file_path,
            self.config.read_block_size_bytes as usize,
            self.config.read_block_count(),
            observer,
        )
    }
}

/// Run a benchmark on tokio's blocking pool.
///
/// Keeps the async runtime responsive while the engine blocks on disk I/O.
/// The observer moves to the blocking thread with the engine.
pub async fn run_blocking<O>(config: BenchmarkConfig, mut observer: O) -> Result<BenchmarkResult>
where
    O: ProgressObserver + Send + 'static,
{
    let benchmark = Benchmark::new(config)?;
    tokio::task::spawn_blocking(move || benchmark.run(&mut observer))
        .await
        .map_err(|e| MonkeyError::Benchmark(format!("Benchmark worker failed: {}", e)))?
}
