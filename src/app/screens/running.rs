//! Running screen implementation
//!
//! Shows one gauge per phase while the engine runs, with the measured time
//! so far.

use crate::bench::{Phase, ProgressUpdate};
use crate::config::BenchmarkConfig;
use crate::util::units::{format_bytes, format_duration};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

/// Running screen component that displays live phase progress
#[derive(Debug, Default)]
pub struct RunningScreen {
    /// One-line description of the run
    headline: String,
    write_progress: Option<ProgressUpdate>,
    read_progress: Option<ProgressUpdate>,
}

impl RunningScreen {
    /// Create a new running screen
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a running screen describing `config`
    pub fn for_config(config: &BenchmarkConfig) -> Self {
        Self {
            headline: format!(
                "{} | {} in {} KB writes, {} B reads",
                config.file_path.display(),
                format_bytes(config.total_megabytes.saturating_mul(1024 * 1024)),
                config.write_block_size_kb,
                config.read_block_size_bytes
            ),
            ..Self::default()
        }
    }

    /// Update the screen with new progress data
    pub fn update_progress(&mut self, update: ProgressUpdate) {
        match update.phase {
            Phase::Write => self.write_progress = Some(update),
            Phase::Read => self.read_progress = Some(update),
        }
    }

    /// The phase currently running, judged by the latest updates
    pub fn current_phase(&self) -> Phase {
        if self.read_progress.is_some() {
            Phase::Read
        } else {
            Phase::Write
        }
    }

    /// Render the running screen
    pub fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(3), // Write gauge
                Constraint::Length(3), // Read gauge
                Constraint::Min(3),    // Status
            ])
            .split(f.size());

        self.render_title(f, chunks[0]);
        render_gauge(f, chunks[1], Phase::Write, self.write_progress.as_ref());
        render_gauge(f, chunks[2], Phase::Read, self.read_progress.as_ref());
        self.render_status(f, chunks[3]);
    }

    fn render_title(&self, f: &mut Frame, area: Rect) {
        let title = Paragraph::new(self.headline.as_str())
            .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .title("monkeytest - Running")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            );

        f.render_widget(title, area);
    }

    fn render_status(&self, f: &mut Frame, area: Rect) {
        let text = vec![
            Line::from(format!("{}...", self.current_phase().label())),
            Line::from("Phases run to completion and cannot be interrupted."),
        ];

        let status = Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .title("Status")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White)),
        );

        f.render_widget(status, area);
    }
}

fn render_gauge(f: &mut Frame, area: Rect, phase: Phase, progress: Option<&ProgressUpdate>) {
    let (ratio, label) = match progress {
        Some(p) => (
            p.completion_percentage(),
            format!(
                "{:.2}% | {}/{} blocks | {}",
                p.completion_percentage() * 100.0,
                p.completed,
                p.total,
                format_duration(p.elapsed)
            ),
        ),
        None => (0.0, "Waiting...".to_string()),
    };

    let gauge = Gauge::default()
        .block(
            Block::default()
                .title(phase.label())
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .gauge_style(Style::default().fg(Color::Green))
        .ratio(ratio.clamp(0.0, 1.0))
        .label(label);

    f.render_widget(gauge, area);
}
