//! I/O operations module
//!
//! Scratch-file access for the two benchmark phases.

pub mod disk;

pub use disk::{fill_buffer, ScratchReader, ScratchWriter};
