//! Front-end for scripted runs: no progress, JSON summary on stdout

use crate::app::Frontend;
use crate::bench::{run_blocking, NoProgress};
use crate::config::BenchmarkConfig;
use crate::models::BenchmarkResult;
use crate::Result;

#[derive(Debug, Default, Clone, Copy)]
pub struct QuietFrontend;

impl QuietFrontend {
    pub fn new() -> Self {
        Self
    }
}

impl Frontend for QuietFrontend {
    async fn execute(&mut self, config: BenchmarkConfig) -> Result<BenchmarkResult> {
        run_blocking(config, NoProgress).await
    }

    fn present(&mut self, result: &BenchmarkResult) -> Result<()> {
        println!("{}", result.to_json()?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_quiet_run_produces_summary() {
        let temp_dir = tempdir().unwrap();
        let config = BenchmarkConfig::default()
            .with_file_path(temp_dir.path().join("quiet"))
            .with_total_megabytes(1)
            .with_write_block_size_kb(512)
            .with_read_block_size_bytes(64 * 1024);

        let mut frontend = QuietFrontend::new();
        let result = frontend.execute(config).await.unwrap();

        assert_eq!(result.write_samples.len(), 2);
        assert_eq!(result.read_samples.len(), 16);
        assert!(frontend.present(&result).is_ok());
    }
}
