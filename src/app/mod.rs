//! Front-end adapters
//!
//! Each front-end supplies a [`BenchmarkConfig`], receives progress while
//! the engine runs, and presents the finished [`BenchmarkResult`]. The
//! engine knows nothing about any of them.

use crate::config::{BenchmarkConfig, Settings};
use crate::models::BenchmarkResult;
use crate::{
    Result, DEFAULT_FILE_PATH, DEFAULT_READ_BLOCK_BYTES, DEFAULT_TOTAL_MB, DEFAULT_WRITE_BLOCK_KB,
};
use log::warn;
use std::path::PathBuf;

pub mod cli;
pub mod quiet;
pub mod screens;
pub mod tui;

pub use cli::CliFrontend;
pub use quiet::QuietFrontend;
pub use tui::{Tui, TuiFrontend};

/// A way of driving one benchmark run and showing its outcome
#[allow(async_fn_in_trait)]
pub trait Frontend {
    /// Run the benchmark, reporting progress the way this front-end does
    async fn execute(&mut self, config: BenchmarkConfig) -> Result<BenchmarkResult>;

    /// Show the finished result
    fn present(&mut self, result: &BenchmarkResult) -> Result<()>;

    /// Release anything `execute` left held when `present` will not run
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// A user-supplied value that was replaced by its default
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    /// What the value controls
    pub field: &'static str,
    /// The rejected value as given
    pub given: String,
    /// The default used instead
    pub replacement: String,
}

/// Turn raw settings into a valid config, replacing anything unusable with
/// its documented default.
///
/// Every replacement is returned so the front-end can tell the user.
pub fn sanitize_config(settings: &Settings) -> (BenchmarkConfig, Vec<Substitution>) {
    let mut substitutions = Vec::new();

    let file_path = if settings.file.trim().is_empty() {
        substitutions.push(Substitution {
            field: "Scratch file path",
            given: format!("{:?}", settings.file),
            replacement: DEFAULT_FILE_PATH.to_string(),
        });
        PathBuf::from(DEFAULT_FILE_PATH)
    } else {
        PathBuf::from(&settings.file)
    };

    let mut positive = |field: &'static str, value: i64, default: u64| -> u64 {
        match u64::try_from(value) {
            Ok(v) if v > 0 => v,
            _ => {
                substitutions.push(Substitution {
                    field,
                    given: value.to_string(),
                    replacement: default.to_string(),
                });
                default
            }
        }
    };

    let total_megabytes = positive("Total MB to write", settings.size_mb, DEFAULT_TOTAL_MB);
    let write_block_size_kb = positive(
        "The block size for writing in KB",
        settings.write_block_kb,
        DEFAULT_WRITE_BLOCK_KB,
    );
    let read_block_size_bytes = positive(
        "The block size for reading in bytes",
        settings.read_block_bytes,
        DEFAULT_READ_BLOCK_BYTES,
    );

    for s in &substitutions {
        warn!("{} was {}, using default {}", s.field, s.given, s.replacement);
    }

    let config = BenchmarkConfig {
        file_path,
        total_megabytes,
        write_block_size_kb,
        read_block_size_bytes,
    };
    (config, substitutions)
}
