//! Sequential write phase
//!
//! Fills the scratch file with freshly generated random blocks, timing
//! each write together with its fsync.

use crate::bench::progress::{Phase, ProgressObserver, ProgressUpdate};
use crate::io::disk::ScratchWriter;
use crate::models::WriteSample;
use crate::{MonkeyError, Result};
use log::info;
use rand::RngCore;
use std::path::Path;
use std::time::{Duration, Instant};

/// Write `block_count` random blocks of `block_size` bytes to `path`.
///
/// The file is created or truncated first and ends up exactly
/// `block_count * block_size` bytes long. Any I/O failure aborts the phase.
pub fn write_test<O>(
    path: &Path,
    block_size: usize,
    block_count: u64,
    observer: &mut O,
) -> Result<Vec<WriteSample>>
where
    O: ProgressObserver + ?Sized,
{
    info!(
        "Starting write test: {} blocks of {} bytes to {}",
        block_count,
        block_size,
        path.display()
    );

    let mut writer = ScratchWriter::create(path)?;
    let mut rng = rand::thread_rng();
    let mut buffer = vec![0u8; block_size];
    let mut samples = Vec::with_capacity(block_count as usize);
    let mut elapsed = Duration::ZERO;

    for block_index in 0..block_count {
        rng.fill_bytes(&mut buffer);

        let start = Instant::now();
        writer.write_block(&buffer).map_err(MonkeyError::io(format!(
            "writing block {} to {}",
            block_index,
            path.display()
        )))?;
        let duration = start.elapsed();

        samples.push(WriteSample::new(block_index, duration));
        elapsed += duration;
        observer.on_progress(ProgressUpdate {
            phase: Phase::Write,
            completed: block_index + 1,
            total: block_count,
            elapsed,
        });
    }

    let written = writer
        .file_size()
        .map_err(MonkeyError::io(format!("inspecting {}", writer.path().display())))?;
    info!(
        "Write test completed: {} blocks ({} bytes) in {:.4}s",
        samples.len(),
        written,
        elapsed.as_secs_f64()
    );
    Ok(samples)
}
