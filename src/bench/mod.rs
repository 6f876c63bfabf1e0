//! Benchmark engine module
//!
//! Contains the timed write and read phases, the engine that sequences
//! them, and the progress seam front-ends hook into.

pub mod engine;
pub mod progress;
pub mod read;
pub mod write;

// Re-export commonly used types
pub use engine::{run_blocking, Benchmark};
pub use progress::{NoProgress, Phase, ProgressObserver, ProgressUpdate};
pub use read::{plan_read_offsets, read_test, read_test_with_rng};
pub use write::write_test;
