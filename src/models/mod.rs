//! Data models module
//!
//! Contains timing samples, the benchmark result, and the statistics and
//! summaries derived from it.

pub mod result;

// Re-export commonly used types
pub use result::{BenchmarkResult, PhaseStats, ReadSample, ResultSummary, WriteSample};
