//! Benchmark configuration
//!
//! Holds the parameters of one run, their validation, and the block
//! arithmetic both phases derive from them.

use crate::{
    MonkeyError, Result, DEFAULT_FILE_PATH, DEFAULT_READ_BLOCK_BYTES, DEFAULT_TOTAL_MB,
    DEFAULT_WRITE_BLOCK_KB,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub mod settings;

pub use settings::Settings;

/// Parameters of a single benchmark run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchmarkConfig {
    /// Scratch file that is created, written, and read back
    pub file_path: PathBuf,
    /// Total size to write, in megabytes
    pub total_megabytes: u64,
    /// Size of each timed write, in kilobytes
    pub write_block_size_kb: u64,
    /// Size of each timed read, in bytes
    pub read_block_size_bytes: u64,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            file_path: PathBuf::from(DEFAULT_FILE_PATH),
            total_megabytes: DEFAULT_TOTAL_MB,
            write_block_size_kb: DEFAULT_WRITE_BLOCK_KB,
            read_block_size_bytes: DEFAULT_READ_BLOCK_BYTES,
        }
    }
}

impl BenchmarkConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the configuration parameters.
    ///
    /// Invalid values are rejected, never repaired; front-ends substitute
    /// defaults before handing a config to the engine.
    pub fn validate(&self) -> Result<()> {
        if self.file_path.as_os_str().is_empty() {
            return Err(MonkeyError::Config("File path must not be empty".to_string()));
        }

        if self.total_megabytes == 0 {
            return Err(MonkeyError::Config(
                "Total size must be greater than 0 MB".to_string(),
            ));
        }

        if self.write_block_size_kb == 0 {
            return Err(MonkeyError::Config(
                "Write block size must be greater than 0 KB".to_string(),
            ));
        }

        if self.read_block_size_bytes == 0 {
            return Err(MonkeyError::Config(
                "Read block size must be greater than 0 bytes".to_string(),
            ));
        }

        if self.total_megabytes.checked_mul(1024 * 1024).is_none() {
            return Err(MonkeyError::Config(format!(
                "Total size too large: {} MB",
                self.total_megabytes
            )));
        }

        let write_block_bytes = self.write_block_size_kb.checked_mul(1024);
        if write_block_bytes.map_or(true, |b| usize::try_from(b).is_err())
            || usize::try_from(self.read_block_size_bytes).is_err()
        {
            return Err(MonkeyError::Config(
                "Block size does not fit in memory on this platform".to_string(),
            ));
        }

        Ok(())
    }

    /// Set the scratch file path
    pub fn with_file_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.file_path = path.into();
        self
    }

    /// Set the total size in megabytes
    pub fn with_total_megabytes(mut self, megabytes: u64) -> Self {
        self.total_megabytes = megabytes;
        self
    }

    /// Set the write block size in kilobytes
    pub fn with_write_block_size_kb(mut self, kb: u64) -> Self {
        self.write_block_size_kb = kb;
        self
    }

    /// Set the read block size in bytes
    pub fn with_read_block_size_bytes(mut self, bytes: u64) -> Self {
        self.read_block_size_bytes = bytes;
        self
    }

    pub fn write_block_size_bytes(&self) -> u64 {
        self.write_block_size_kb * 1024
    }

    /// Number of whole write blocks that fit in the configured total size
    pub fn write_block_count(&self) -> u64 {
        self.total_megabytes * 1024 / self.write_block_size_kb
    }

    /// Number of read offsets planned for the read phase
    pub fn read_block_count(&self) -> u64 {
        self.total_megabytes * 1024 * 1024 / self.read_block_size_bytes
    }

    /// Size of the scratch file after the write phase.
    ///
    /// May be smaller than `total_megabytes` when the write block size
    /// does not divide it evenly.
    pub fn expected_file_size(&self) -> u64 {
        self.write_block_count() * self.write_block_size_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = BenchmarkConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.total_megabytes, 128);
        assert_eq!(config.write_block_size_kb, 1024);
        assert_eq!(config.read_block_size_bytes, 512);
    }

    #[test]
    fn test_validate_rejects_zero_values() {
        let base = BenchmarkConfig::default();

        for config in [
            base.clone().with_total_megabytes(0),
            base.clone().with_write_block_size_kb(0),
            base.clone().with_read_block_size_bytes(0),
            base.clone().with_file_path(""),
        ] {
            match config.validate() {
                Err(MonkeyError::Config(_)) => {}
                other => panic!("expected config error, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_block_arithmetic() {
        let config = BenchmarkConfig::default()
            .with_total_megabytes(1)
            .with_write_block_size_kb(256)
            .with_read_block_size_bytes(512);

        assert_eq!(config.write_block_size_bytes(), 256 * 1024);
        assert_eq!(config.write_block_count(), 4);
        assert_eq!(config.read_block_count(), 2048);
        assert_eq!(config.expected_file_size(), 1024 * 1024);
    }

    #[test]
    fn test_write_block_count_truncates() {
        // 10 MB in 3 MB blocks only fits three whole blocks
        let config = BenchmarkConfig::default()
            .with_total_megabytes(10)
            .with_write_block_size_kb(3 * 1024);

        assert_eq!(config.write_block_count(), 3);
        assert_eq!(config.expected_file_size(), 9 * 1024 * 1024);
        assert!(config.expected_file_size() < config.total_megabytes * 1024 * 1024);
    }

    #[test]
    fn test_serde_serialization() {
        let config = BenchmarkConfig::default().with_file_path("/var/tmp/scratch");
        let json = serde_json::to_string(&config).expect("Failed to serialize");
        let deserialized: BenchmarkConfig =
            serde_json::from_str(&json).expect("Failed to deserialize");
        assert_eq!(config, deserialized);
    }
}
