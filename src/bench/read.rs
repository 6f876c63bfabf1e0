//! Random-offset read phase
//!
//! Reads blocks back from the scratch file in a shuffled order so read-ahead
//! and cache locality cannot help, timing each seek and read.

use crate::bench::progress::{Phase, ProgressObserver, ProgressUpdate};
use crate::io::disk::ScratchReader;
use crate::models::ReadSample;
use crate::{MonkeyError, Result};
use log::{debug, info};
use rand::seq::SliceRandom;
use rand::Rng;
use std::path::Path;
use std::time::{Duration, Instant};

/// Offsets `0, b, 2b, ...` for `block_count` blocks, uniformly shuffled
pub fn plan_read_offsets<R>(block_size: u64, block_count: u64, rng: &mut R) -> Vec<u64>
where
    R: Rng + ?Sized,
{
    let mut offsets: Vec<u64> = (0..block_count).map(|i| i * block_size).collect();
    offsets.shuffle(rng);
    offsets
}

/// Read up to `block_count` blocks of `block_size` bytes at shuffled offsets.
///
/// Stops without error at the first read that hits end of file; that
/// attempt is not recorded.
pub fn read_test<O>(
    path: &Path,
    block_size: usize,
    block_count: u64,
    observer: &mut O,
) -> Result<Vec<ReadSample>>
where
    O: ProgressObserver + ?Sized,
{
    read_test_with_rng(path, block_size, block_count, &mut rand::thread_rng(), observer)
}

/// [`read_test`] with a caller-supplied source of randomness for the offset order
pub fn read_test_with_rng<R, O>(
    path: &Path,
    block_size: usize,
    block_count: u64,
    rng: &mut R,
    observer: &mut O,
) -> Result<Vec<ReadSample>>
where
    R: Rng + ?Sized,
    O: ProgressObserver + ?Sized,
{
    info!(
        "Starting read test: up to {} blocks of {} bytes from {}",
        block_count,
        block_size,
        path.display()
    );

    let offsets = plan_read_offsets(block_size as u64, block_count, rng);
    let mut reader = ScratchReader::open(path)?;
    let mut buffer = vec![0u8; block_size];
    let mut samples = Vec::with_capacity(offsets.len());
    let mut elapsed = Duration::ZERO;

    for (position, offset) in (1u64..).zip(offsets) {
        let start = Instant::now();
        let read = reader
            .read_block_at(offset, &mut buffer)
            .map_err(MonkeyError::io(format!(
                "reading {} bytes at offset {} from {}",
                block_size,
                offset,
                path.display()
            )))?;
        let duration = start.elapsed();

        if read == 0 {
            debug!(
                "End of file at offset {} after {} reads, stopping read test",
                offset,
                samples.len()
            );
            break;
        }

        samples.push(ReadSample::new(position, offset, duration));
        elapsed += duration;
        observer.on_progress(ProgressUpdate {
            phase: Phase::Read,
            completed: position,
            total: block_count,
            elapsed,
        });
    }

    info!(
        "Read test completed: {} of {} blocks in {:.4}s",
        samples.len(),
        block_count,
        elapsed.as_secs_f64()
    );
    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bench::progress::NoProgress;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use tempfile::tempdir;

    fn scratch_file(len: usize) -> (tempfile::TempDir, std::path::PathBuf) {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("scratch");
        std::fs::write(&path, vec![0xA5u8; len]).unwrap();
        (temp_dir, path)
    }

    #[test]
    fn test_plan_read_offsets_is_permutation() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut offsets = plan_read_offsets(512, 1000, &mut rng);
        assert_eq!(offsets.len(), 1000);

        offsets.sort_unstable();
        let canonical: Vec<u64> = (0..1000).map(|i| i * 512).collect();
        assert_eq!(offsets, canonical);
    }

    #[test]
    fn test_plan_read_offsets_is_shuffled() {
        let mut rng = SmallRng::seed_from_u64(42);
        let offsets = plan_read_offsets(4096, 256, &mut rng);
        let ascending: Vec<u64> = (0..256).map(|i| i * 4096).collect();
        assert_ne!(offsets, ascending);
    }

    #[test]
    fn test_plan_read_offsets_empty() {
        let mut rng = SmallRng::seed_from_u64(1);
        assert!(plan_read_offsets(512, 0, &mut rng).is_empty());
    }

    #[test]
    fn test_read_all_blocks_when_file_is_large_enough() {
        let (_dir, path) = scratch_file(64 * 1024);

        let samples = read_test(&path, 512, 128, &mut NoProgress).unwrap();
        assert_eq!(samples.len(), 128);

        let positions: Vec<u64> = samples.iter().map(|s| s.block_index).collect();
        assert_eq!(positions, (1..=128).collect::<Vec<u64>>());

        let mut offsets: Vec<u64> = samples.iter().map(|s| s.offset).collect();
        offsets.sort_unstable();
        assert_eq!(offsets, (0..128).map(|i| i * 512).collect::<Vec<u64>>());
    }

    #[test]
    fn test_read_stops_at_end_of_file() {
        // 10 blocks exist but 20 are planned
        let (_dir, path) = scratch_file(10 * 1024);
        let mut rng = SmallRng::seed_from_u64(3);

        let planned = plan_read_offsets(1024, 20, &mut SmallRng::seed_from_u64(3));
        let first_past_end = planned.iter().position(|&o| o >= 10 * 1024).unwrap();

        let samples = read_test_with_rng(&path, 1024, 20, &mut rng, &mut NoProgress).unwrap();
        assert_eq!(samples.len(), first_past_end);
        assert!(samples.len() < 20);
        assert!(samples.iter().all(|s| s.offset < 10 * 1024));
        assert_eq!(
            samples.iter().map(|s| s.offset).collect::<Vec<_>>(),
            planned[..first_past_end].to_vec()
        );
    }

    #[test]
    fn test_read_reports_progress_with_planned_total() {
        let (_dir, path) = scratch_file(8 * 1024);

        let mut updates = Vec::new();
        let mut observer = |u: ProgressUpdate| updates.push(u);
        read_test(&path, 1024, 8, &mut observer).unwrap();

        assert_eq!(updates.len(), 8);
        assert!(updates.iter().all(|u| u.phase == Phase::Read && u.total == 8));
        assert_eq!(updates.last().unwrap().completed, 8);
    }

    #[test]
    fn test_read_missing_file_fails() {
        let temp_dir = tempdir().unwrap();
        let result = read_test(&temp_dir.path().join("absent"), 512, 4, &mut NoProgress);
        assert!(matches!(result, Err(MonkeyError::Io { .. })));
    }
}
