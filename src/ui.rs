//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Padding, Paragraph, Wrap},
};
use std::time::Duration;

use crate::app::{App, InputMode};
use crate::config::{ControlsSettings, UiSettings};

/// Screen regions that accept mouse clicks, as laid out by the last `draw`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Areas {
    /// Inside of the progress bar border.
    pub progress: Rect,
    /// Inside of the track list border.
    pub list: Rect,
    /// Index of the entry drawn on the first row of `list`.
    pub list_offset: usize,
}

impl Areas {
    /// Column offset into the progress bar, if `(column, row)` falls on it.
    pub fn progress_hit(&self, column: u16, row: u16) -> Option<u16> {
        contains(self.progress, column, row).then(|| column - self.progress.x)
    }

    /// Entry index drawn at `(column, row)`, if any.
    pub fn list_hit(&self, column: u16, row: u16, entries: usize) -> Option<usize> {
        if !contains(self.list, column, row) {
            return None;
        }
        let idx = self.list_offset + usize::from(row - self.list.y);
        (idx < entries).then_some(idx)
    }
}

fn contains(r: Rect, column: u16, row: u16) -> bool {
    column >= r.x && column < r.x + r.width && row >= r.y && row < r.y + r.height
}

/// Render the controls help text, incorporating scrub seconds.
fn controls_text(scrub_seconds: u64) -> String {
    [
        "[space/p] play/pause".to_string(),
        "[h/l] prev/next".to_string(),
        "[j/k] up/down".to_string(),
        "[enter] play selected".to_string(),
        "[d] delete".to_string(),
        "[a] add".to_string(),
        format!("[H/L] scrub -/+{}s", scrub_seconds),
        "[0-9] seek".to_string(),
        "[q] quit".to_string(),
    ]
    .join(" | ")
}

/// Format a `Duration` as `MM:SS`.
fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

fn clock_text(elapsed: Duration, total: Option<Duration>) -> String {
    match total {
        Some(t) => format!(
            "{} / {} / -{}",
            format_mmss(elapsed),
            format_mmss(t),
            format_mmss(t.saturating_sub(elapsed))
        ),
        None => format_mmss(elapsed),
    }
}

/// First visible entry so that `selected` sits near the middle of a window of
/// `height` rows over `total` entries.
fn window_start(total: usize, height: usize, selected: usize) -> usize {
    if total <= height || height == 0 {
        return 0;
    }
    let half = height / 2;
    let start = selected.saturating_sub(half);
    start.min(total - height)
}

/// Render the entire UI into the provided `frame` and report clickable areas.
pub fn draw(
    frame: &mut Frame,
    app: &App,
    ui_settings: &UiSettings,
    controls_settings: &ControlsSettings,
) -> Areas {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(6),
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(3),
            Constraint::Length(4),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" reel ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    // Now playing
    let control = if app.playing { "▶ Playing" } else { "⏸ Paused" };
    let now_playing = Paragraph::new(vec![
        Line::from(format!("Title:  {}", app.title)),
        Line::from(format!("Artist: {}", app.artist)),
        Line::from(format!("Cover:  {}", app.cover)),
        Line::from(format!("{}  [{}]", control, clock_text(app.elapsed, app.total))),
    ])
    .block(
        Block::bordered()
            .padding(Padding {
                left: 1,
                right: 0,
                top: 0,
                bottom: 0,
            })
            .title(" now playing "),
    );
    frame.render_widget(now_playing, chunks[1]);

    // Progress bar
    let progress_block = Block::bordered().title(" progress ");
    let progress_inner = progress_block.inner(chunks[2]);
    let gauge = Gauge::default()
        .block(progress_block)
        .gauge_style(Style::default().add_modifier(Modifier::BOLD))
        .ratio((app.progress / 100.0).clamp(0.0, 1.0))
        .label(format!("{:.0}%", app.progress));
    frame.render_widget(gauge, chunks[2]);

    // Track list. Only build ListItems for the visible window.
    let list_block = Block::default().borders(Borders::ALL).title(format!(
        " playlist ({}) ",
        app.entries.len()
    ));
    let list_inner = list_block.inner(chunks[3]);
    let total = app.entries.len();
    let height = list_inner.height as usize;
    let start = window_start(total, height, app.selected);
    let end = (start + height).min(total);

    let visible_items: Vec<ListItem> = app.entries[start..end]
        .iter()
        .enumerate()
        .map(|(offset, label)| {
            if app.highlighted == Some(start + offset) {
                ListItem::new(format!("♪ {}", label))
                    .style(Style::default().add_modifier(Modifier::BOLD))
            } else {
                ListItem::new(format!("  {}", label))
            }
        })
        .collect();

    let list = List::new(visible_items)
        .block(list_block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ListState::default();
    if total > 0 {
        state.select(Some(app.selected.saturating_sub(start)));
    }
    frame.render_stateful_widget(list, chunks[3], &mut state);

    // Prompt / status line
    let (prompt_title, prompt_text) = match app.input_mode {
        InputMode::AddPath => (" add file or folder (enter adds, esc cancels) ", format!("{}█", app.input)),
        InputMode::Normal => (" status ", app.status.clone().unwrap_or_default()),
    };
    let prompt = Paragraph::new(prompt_text).block(
        Block::bordered()
            .padding(Padding {
                left: 1,
                right: 0,
                top: 0,
                bottom: 0,
            })
            .title(prompt_title),
    );
    frame.render_widget(prompt, chunks[4]);

    let footer = Paragraph::new(controls_text(controls_settings.scrub_seconds))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[5]);

    Areas {
        progress: progress_inner,
        list: list_inner,
        list_offset: start,
    }
}
