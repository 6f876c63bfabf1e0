//! Results screen implementation
//!
//! Displays the text report next to a percent-complete-over-time chart for
//! one phase at a time.

use crate::bench::Phase;
use crate::models::BenchmarkResult;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

/// Most points handed to the chart per curve
const MAX_CHART_POINTS: usize = 2000;

/// Results screen component
#[derive(Debug)]
pub struct ResultsScreen {
    result: BenchmarkResult,
    /// Phase whose curve is plotted
    plotted: Phase,
}

impl ResultsScreen {
    pub fn new(result: BenchmarkResult) -> Self {
        Self {
            result,
            plotted: Phase::Write,
        }
    }

    pub fn result(&self) -> &BenchmarkResult {
        &self.result
    }

    pub fn plotted_phase(&self) -> Phase {
        self.plotted
    }

    /// Switch the chart between the write and read curves
    pub fn toggle_view(&mut self) {
        self.plotted = match self.plotted {
            Phase::Write => Phase::Read,
            Phase::Read => Phase::Write,
        };
    }

    /// Render the results screen
    pub fn render(&mut self, f: &mut Frame) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(10), Constraint::Length(3)])
            .split(f.size());
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(44), Constraint::Min(20)])
            .split(rows[0]);

        self.render_report(f, columns[0]);
        self.render_chart(f, columns[1]);
        render_help(f, rows[1]);
    }

    fn render_report(&self, f: &mut Frame, area: Rect) {
        let (text, color) = match self.result.format_result() {
            Ok(report) => (report, Color::Green),
            Err(err) => (err.to_string(), Color::Red),
        };

        let report = Paragraph::new(text).block(
            Block::default()
                .title(format!(
                    "Results {}",
                    self.result.started_at.format("%Y-%m-%d %H:%M:%S UTC")
                ))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        );

        f.render_widget(report, area);
    }

    fn render_chart(&self, f: &mut Frame, area: Rect) {
        let curve = match self.plotted {
            Phase::Write => self.result.write_curve(),
            Phase::Read => self.result.read_curve(),
        };
        let points = downsample(&curve, MAX_CHART_POINTS);
        let max_time = points.last().map_or(1.0, |p| p.0).max(f64::EPSILON);

        let datasets = vec![Dataset::default()
            .name(self.plotted.label())
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Cyan))
            .data(&points)];

        let chart = Chart::new(datasets)
            .block(
                Block::default()
                    .title(format!("{} progress", self.plotted.label()))
                    .borders(Borders::ALL),
            )
            .x_axis(
                Axis::default()
                    .title("Time taken (s)")
                    .style(Style::default().fg(Color::Gray))
                    .bounds([0.0, max_time])
                    .labels(vec![
                        Span::raw("0"),
                        Span::raw(format!("{:.2}", max_time / 2.0)),
                        Span::raw(format!("{:.2}", max_time)),
                    ]),
            )
            .y_axis(
                Axis::default()
                    .title("Percent complete")
                    .style(Style::default().fg(Color::Gray))
                    .bounds([0.0, 100.0])
                    .labels(vec![Span::raw("0"), Span::raw("50"), Span::raw("100")]),
            );

        f.render_widget(chart, area);
    }
}

fn render_help(f: &mut Frame, area: Rect) {
    let key = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let help = Paragraph::new(Line::from(vec![
        Span::styled("Tab", key),
        Span::raw(" Switch graph  "),
        Span::styled("q/Esc", key),
        Span::raw(" Quit"),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow)),
    );

    f.render_widget(help, area);
}

/// Keep at most `max` evenly spaced points, always including the last one
fn downsample(points: &[(f64, f64)], max: usize) -> Vec<(f64, f64)> {
    if points.len() <= max || max < 2 {
        return points.to_vec();
    }

    let step = points.len().div_ceil(max - 1);
    let mut sampled: Vec<(f64, f64)> = points.iter().step_by(step).copied().collect();
    if let Some(&last) = points.last() {
        if sampled.last() != Some(&last) {
            sampled.push(last);
        }
    }
    sampled
}
