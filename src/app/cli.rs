//! Line-oriented front-end with progress bars

use crate::app::Frontend;
use crate::bench::{run_blocking, NoProgress, Phase, ProgressObserver, ProgressUpdate};
use crate::config::BenchmarkConfig;
use crate::models::BenchmarkResult;
use crate::{Result, BANNER};
use indicatif::{ProgressBar, ProgressStyle};

const BAR_TEMPLATE: &str = "{msg:8} [{bar:40}] {percent:>3}% ({pos}/{len} blocks)";

/// Prints a progress bar per phase, then the text report and banner
#[derive(Debug, Clone)]
pub struct CliFrontend {
    show_progress: bool,
}

impl CliFrontend {
    pub fn new(show_progress: bool) -> Self {
        Self { show_progress }
    }
}

impl Frontend for CliFrontend {
    async fn execute(&mut self, config: BenchmarkConfig) -> Result<BenchmarkResult> {
        config.validate()?;
        if !self.show_progress {
            return run_blocking(config, NoProgress).await;
        }

        let bars = PhaseBars::new(config.write_block_count(), config.read_block_count());
        let result = run_blocking(config, bars.clone()).await;
        bars.finish();
        result
    }

    fn present(&mut self, result: &BenchmarkResult) -> Result<()> {
        println!("\n{}", result.format_result()?);
        println!("{}", BANNER);
        Ok(())
    }
}

/// One bar per phase; the read bar stays hidden until reading starts
#[derive(Clone)]
struct PhaseBars {
    write: ProgressBar,
    read: ProgressBar,
}

impl PhaseBars {
    fn new(write_blocks: u64, read_blocks: u64) -> Self {
        let style = ProgressStyle::with_template(BAR_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> ");

        let write = ProgressBar::new(write_blocks)
            .with_style(style.clone())
            .with_message(Phase::Write.label());
        let read = ProgressBar::hidden()
            .with_style(style)
            .with_message(Phase::Read.label());
        read.set_length(read_blocks);

        Self { write, read }
    }

    fn finish(&self) {
        if !self.write.is_finished() {
            self.write.abandon();
        }
        if !self.read.is_hidden() && !self.read.is_finished() {
            self.read.finish();
        }
    }
}

impl ProgressObserver for PhaseBars {
    fn on_progress(&mut self, update: ProgressUpdate) {
        match update.phase {
            Phase::Write => {
                self.write.set_position(update.completed);
                if update.completed >= update.total {
                    self.write.finish();
                }
            }
            Phase::Read => {
                if self.read.is_hidden() {
                    self.read
                        .set_draw_target(indicatif::ProgressDrawTarget::stderr());
                }
                self.read.set_position(update.completed);
            }
        }
    }
}
