//! Terminal front-end
//!
//! Handles crossterm backend setup and teardown, and drives the running and
//! results screens around a benchmark executed on the blocking pool.

use crate::app::screens::{ResultsScreen, RunningScreen};
use crate::app::Frontend;
use crate::bench::{run_blocking, ProgressUpdate};
use crate::config::BenchmarkConfig;
use crate::models::BenchmarkResult;
use crate::{MonkeyError, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{
    io::{self, Stdout},
    time::{Duration, Instant},
};
use tokio::sync::mpsc;

/// Terminal wrapper that manages crossterm backend and screen state
pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    active: bool,
    last_tick: Instant,
    tick_rate: Duration,
}

impl Tui {
    /// Create a new TUI instance; the terminal is untouched until `init`
    pub fn new() -> io::Result<Self> {
        let backend = CrosstermBackend::new(io::stdout());
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            terminal,
            active: false,
            last_tick: Instant::now(),
            tick_rate: Duration::from_millis(100),
        })
    }

    /// Switch to raw mode and the alternate screen
    pub fn init(&mut self) -> io::Result<()> {
        if self.active {
            return Ok(());
        }
        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        self.active = true;
        self.terminal.hide_cursor()?;
        self.terminal.clear()?;
        Ok(())
    }

    /// Restore terminal to original state
    pub fn restore(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        disable_raw_mode()?;
        execute!(io::stdout(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Draw the UI using the provided render function
    pub fn draw<F>(&mut self, f: F) -> io::Result<()>
    where
        F: FnOnce(&mut ratatui::Frame),
    {
        self.terminal.draw(f)?;
        Ok(())
    }

    /// Wait up to one tick for a key press
    pub fn next_key(&mut self) -> io::Result<Option<KeyEvent>> {
        let timeout = self
            .tick_rate
            .checked_sub(self.last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    return Ok(Some(key));
                }
            }
        }

        if self.last_tick.elapsed() >= self.tick_rate {
            self.last_tick = Instant::now();
        }

        Ok(None)
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        // Ensure terminal is restored even if restore() wasn't called
        let _ = self.restore();
    }
}

/// Full-screen front-end: live gauges while running, report and
/// progress chart afterwards
pub struct TuiFrontend {
    tui: Tui,
    running_screen: RunningScreen,
}

impl TuiFrontend {
    pub fn new() -> Result<Self> {
        Ok(Self {
            tui: Tui::new().map_err(tui_error)?,
            running_screen: RunningScreen::new(),
        })
    }
}

impl Frontend for TuiFrontend {
    async fn execute(&mut self, config: BenchmarkConfig) -> Result<BenchmarkResult> {
        config.validate()?;
        self.running_screen = RunningScreen::for_config(&config);
        self.tui.init().map_err(tui_error)?;

        let (tx, mut rx) = mpsc::channel::<ProgressUpdate>(1024);
        let worker = tokio::spawn(run_blocking(config, tx));

        loop {
            while let Ok(update) = rx.try_recv() {
                self.running_screen.update_progress(update);
            }
            self.tui
                .draw(|f| self.running_screen.render(f))
                .map_err(tui_error)?;

            if worker.is_finished() {
                break;
            }
            // Phases cannot be cancelled; keys are read only to keep the input queue drained
            self.tui.next_key().map_err(tui_error)?;
            tokio::task::yield_now().await;
        }

        let outcome = worker
            .await
            .map_err(|e| MonkeyError::Benchmark(format!("Benchmark task failed: {}", e)))?;
        if let Err(err) = &outcome {
            self.tui.restore().map_err(tui_error)?;
            log::error!("Benchmark failed: {}", err);
        }
        outcome
    }

    fn present(&mut self, result: &BenchmarkResult) -> Result<()> {
        let mut results_screen = ResultsScreen::new(result.clone());
        self.tui.init().map_err(tui_error)?;

        loop {
            self.tui
                .draw(|f| results_screen.render(f))
                .map_err(tui_error)?;

            if let Some(key) = self.tui.next_key().map_err(tui_error)? {
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc | KeyCode::Enter => break,
                    KeyCode::Tab => results_screen.toggle_view(),
                    _ => {}
                }
            }
        }

        self.tui.restore().map_err(tui_error)
    }

    fn finish(&mut self) -> Result<()> {
        self.tui.restore().map_err(tui_error)
    }
}

fn tui_error(err: io::Error) -> MonkeyError {
    MonkeyError::Tui(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tui_creation_leaves_terminal_alone() {
        // Creating the wrapper must not touch the terminal
        if let Ok(mut tui) = Tui::new() {
            assert!(!tui.is_active());
            assert!(tui.restore().is_ok());
        }
    }

    #[tokio::test]
    async fn test_oversized_total_rejected_before_terminal_setup() {
        let Ok(mut frontend) = TuiFrontend::new() else {
            return;
        };
        let config = BenchmarkConfig::default().with_total_megabytes(1 << 54);

        let err = frontend.execute(config).await.unwrap_err();
        assert!(matches!(err, MonkeyError::Config(_)));
        assert!(!frontend.tui.is_active());
        assert!(frontend.finish().is_ok());
    }

    #[test]
    fn test_tui_error_maps_to_tui_variant() {
        let err = tui_error(io::Error::new(io::ErrorKind::Other, "no tty"));
        assert!(matches!(err, MonkeyError::Tui(msg) if msg.contains("no tty")));
    }
}
