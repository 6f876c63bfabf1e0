//! Utility functions module
//!
//! Contains rounding, throughput arithmetic, and human-readable formatting.

pub mod units;

// Re-export commonly used functions
pub use units::{bytes_to_mb, format_bytes, format_duration, round_to, throughput_mbps};
