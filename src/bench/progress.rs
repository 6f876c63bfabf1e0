//! Progress reporting between timed operations

use std::time::Duration;
use tokio::sync::mpsc;

/// Which phase a progress update belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Write,
    Read,
}

impl Phase {
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Write => "Writing",
            Phase::Read => "Reading",
        }
    }
}

/// Progress update sent after each block
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressUpdate {
    pub phase: Phase,
    /// Blocks finished so far in this phase
    pub completed: u64,
    /// Blocks planned for this phase
    pub total: u64,
    /// Sum of measured block durations so far
    pub elapsed: Duration,
}

impl ProgressUpdate {
    /// Calculate completion percentage (0.0 to 1.0)
    pub fn completion_percentage(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.completed as f64 / self.total as f64).min(1.0)
        }
    }
}

/// Receives progress between timed block operations.
///
/// Called on the benchmark thread outside the timed region. Anything slow
/// here still delays the next block, so implementations should only record
/// or forward the update.
pub trait ProgressObserver {
    fn on_progress(&mut self, update: ProgressUpdate);
}

/// Observer that discards every update
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    fn on_progress(&mut self, _update: ProgressUpdate) {}
}

impl<F> ProgressObserver for F
where
    F: FnMut(ProgressUpdate),
{
    fn on_progress(&mut self, update: ProgressUpdate) {
        self(update)
    }
}

/// Forwards updates to an async consumer without blocking.
///
/// A full channel drops the update; a closed one is ignored so the run
/// still completes.
impl ProgressObserver for mpsc::Sender<ProgressUpdate> {
    fn on_progress(&mut self, update: ProgressUpdate) {
        let _ = self.try_send(update);
    }
}
