//! Ratatui-based terminal UI.
//!
//! The TUI provides an input form (year, road dimensions, tax rate), recomputes
//! the estimate after every change, and renders the estimate table, a unit
//! price bar chart and the cost proportion per work item.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, Clear, Gauge, List, ListItem, Paragraph, Row, Table},
};
use tracing::debug;

use crate::app::pipeline::{RunOutput, run_estimate};
use crate::domain::EstimationInput;
use crate::error::AppError;
use crate::estimate::Estimator;

mod form;
mod plotters_chart;

use form::{Field, Form};
use plotters_chart::UnitPriceChart;

/// Start the TUI with an already-loaded estimator.
pub fn run(estimator: Estimator, input: EstimationInput, export_path: PathBuf) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(estimator, input, export_path);
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(4, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(4, format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

struct App {
    estimator: Estimator,
    form: Form,
    export_path: PathBuf,
    status: String,
    run: RunOutput,
}

impl App {
    fn new(estimator: Estimator, input: EstimationInput, export_path: PathBuf) -> Self {
        let form = Form::new(input);
        let run = run_estimate(&estimator, &form.input);
        Self {
            estimator,
            form,
            export_path,
            status: "Ready.".to_string(),
            run,
        }
    }

    fn recompute(&mut self) {
        debug!(input = ?self.form.input, "recomputing estimate");
        self.run = run_estimate(&self.estimator, &self.form.input);
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(4, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(4, format!("Event poll error: {e}")))? {
                continue;
            }

            match event::read().map_err(|e| AppError::new(4, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns `true` when the user asked to quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        if self.form.editing().is_some() {
            self.handle_edit(code);
            return false;
        }

        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Up => self.form.select_prev(),
            KeyCode::Down | KeyCode::Tab => self.form.select_next(),
            KeyCode::Left => {
                self.status = self.form.adjust(-1);
                self.recompute();
            }
            KeyCode::Right => {
                self.status = self.form.adjust(1);
                self.recompute();
            }
            KeyCode::Enter => {
                self.form.begin_edit();
                self.status = format!(
                    "Editing {}. Enter to apply, Esc to cancel.",
                    self.form.selected().label()
                );
            }
            KeyCode::Char('x') => {
                self.status = match crate::io::write_report_json(&self.export_path, &self.run.report) {
                    Ok(()) => format!("Exported: {}", self.export_path.display()),
                    Err(err) => format!("Export failed: {err}"),
                };
            }
            _ => {}
        }
        false
    }

    fn handle_edit(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => {
                self.form.cancel_edit();
                self.status = "Edit canceled.".to_string();
            }
            KeyCode::Enter => {
                self.status = match self.form.commit_edit() {
                    Ok(status) => {
                        self.recompute();
                        status
                    }
                    Err(status) => status,
                };
            }
            KeyCode::Backspace => self.form.backspace(),
            KeyCode::Char(c) => self.form.push_char(c),
            _ => {}
        }
    }

    fn draw(&self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let summary = &self.run.summary;
        let lines = vec![
            Line::from(vec![
                Span::styled("roadcost", Style::default().fg(Color::Cyan)),
                Span::raw(" - road works unit price & cost estimate"),
            ]),
            Line::from(Span::styled(
                format!(
                    "total after tax: {} | rounded: {}",
                    crate::report::fmt_currency(summary.total_with_tax),
                    crate::report::fmt_currency(summary.rounded_total),
                ),
                Style::default().fg(Color::Gray),
            )),
        ];
        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(area);

        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(Field::ALL.len() as u16 + 2), Constraint::Min(0)])
            .split(columns[0]);
        self.draw_form(frame, left[0]);
        self.draw_table(frame, left[1]);

        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(self.run.report.line_costs.len() as u16 + 2),
            ])
            .split(columns[1]);
        self.draw_chart(frame, right[0]);
        self.draw_proportions(frame, right[1]);
    }

    fn draw_form(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let items: Vec<ListItem> = Field::ALL
            .iter()
            .enumerate()
            .map(|(i, &field)| {
                let value = match self.form.editing() {
                    Some(text) if i == self.form.selected_index() => format!("{text}_"),
                    _ => self.form.value_text(field),
                };
                ListItem::new(format!("{:<14} {value}", field.label()))
            })
            .collect();

        let list = List::new(items)
            .block(Block::default().title("Input").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ratatui::widgets::ListState::default();
        state.select(Some(self.form.selected_index()));
        frame.render_stateful_widget(list, area, &mut state);

        if self.form.editing().is_some() {
            let hint = Paragraph::new("Editing…")
                .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
                .alignment(Alignment::Right);
            let rect = Rect {
                x: area.x + 2,
                y: area.y,
                width: area.width.saturating_sub(4),
                height: 1,
            };
            frame.render_widget(hint, rect);
        }
    }

    fn draw_table(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let report = &self.run.report;
        let right = |s: &str| Cell::from(Line::from(s.to_string()).alignment(Alignment::Right));

        let mut rows: Vec<Row> = report
            .rows
            .iter()
            .map(|r| {
                Row::new(vec![
                    Cell::from(r.work_item.clone()),
                    Cell::from(r.unit.clone()),
                    right(&r.volume),
                    right(&r.unit_price),
                    right(&r.line_cost),
                ])
            })
            .collect();
        rows.push(Row::new(vec![Cell::from("")]));
        for s in &report.summary {
            rows.push(
                Row::new(vec![
                    Cell::from(""),
                    Cell::from(""),
                    Cell::from(""),
                    right(&s.label),
                    right(&s.amount),
                ])
                .style(Style::default().fg(Color::Yellow)),
            );
        }

        let header = Row::new(vec![
            Cell::from("Work item"),
            Cell::from("Unit"),
            right("Volume"),
            right("Unit price"),
            right("Line cost"),
        ])
        .style(Style::default().add_modifier(Modifier::BOLD));

        let widths = [
            Constraint::Length(15),
            Constraint::Length(4),
            Constraint::Length(10),
            Constraint::Min(16),
            Constraint::Min(18),
        ];
        let table = Table::new(rows, widths)
            .header(header)
            .block(Block::default().title("Estimate").borders(Borders::ALL));
        frame.render_widget(table, area);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("Unit price per work item").borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let values: Vec<f64> = self.run.report.unit_prices.iter().map(|p| p.value).collect();
        if inner.height < 3 {
            return;
        }
        let chart_rect = Rect {
            height: inner.height - 1,
            ..inner
        };
        let widget = UnitPriceChart {
            values: &values,
            y_bounds: UnitPriceChart::bounds_for(&values),
            y_label: "Rp",
            fmt_y: fmt_axis_rp,
        };
        frame.render_widget(widget, chart_rect);

        let labels = Rect {
            y: inner.y + inner.height - 1,
            height: 1,
            ..inner
        };
        draw_category_labels(frame, labels, &self.run.report.unit_prices);
    }

    fn draw_proportions(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("Cost proportion").borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        for (i, point) in self.run.report.line_costs.iter().enumerate() {
            let y = inner.y + i as u16;
            if y >= inner.y + inner.height {
                break;
            }
            let ratio = (point.share_percent / 100.0).clamp(0.0, 1.0);
            let ratio = if ratio.is_finite() { ratio } else { 0.0 };
            let gauge = Gauge::default()
                .gauge_style(Style::default().fg(Color::Cyan).bg(Color::DarkGray))
                .ratio(ratio)
                .label(format!("{} {:.1}%", point.label, point.share_percent));
            frame.render_widget(
                gauge,
                Rect {
                    y,
                    height: 1,
                    ..inner
                },
            );
        }
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ select  ←/→ adjust  Enter type value  x export  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

/// Centre each work-item label under its bar.
fn draw_category_labels(frame: &mut ratatui::Frame<'_>, area: Rect, points: &[crate::report::SeriesPoint]) {
    let n = points.len();
    if n == 0 || area.width == 0 {
        return;
    }
    let slot = area.width / n as u16;
    if slot == 0 {
        return;
    }
    for (i, point) in points.iter().enumerate() {
        let rect = Rect {
            x: area.x + slot * i as u16,
            y: area.y,
            width: slot,
            height: 1,
        };
        let label = truncate(&point.label, slot as usize);
        frame.render_widget(
            Paragraph::new(label)
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::Gray)),
            rect,
        );
    }
}

/// Compact currency ticks: `450k`, `1.2M`.
fn fmt_axis_rp(v: f64) -> String {
    let a = v.abs();
    if a >= 1e9 {
        format!("{:.1}B", v / 1e9)
    } else if a >= 1e6 {
        format!("{:.1}M", v / 1e6)
    } else if a >= 1e3 {
        format!("{:.0}k", v / 1e3)
    } else {
        format!("{v:.0}")
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('.');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_ticks_are_compact() {
        assert_eq!(fmt_axis_rp(450_000.0), "450k");
        assert_eq!(fmt_axis_rp(1_250_000.0), "1.2M");
        assert_eq!(fmt_axis_rp(-2_000.0), "-2k");
        assert_eq!(fmt_axis_rp(12.4), "12");
    }

    #[test]
    fn truncate_marks_cut_labels() {
        assert_eq!(truncate("Pelaburan Keras", 8), "Pelabur.");
        assert_eq!(truncate("LPA", 8), "LPA");
    }
}
