//! Terminal display model.
//!
//! `App` is what the playlist controller writes into through `PlayerView`
//! and what `ui::draw` reads from. It also carries the state that only the
//! terminal needs: the list cursor, the add-path prompt and a status line.

use std::time::Duration;

use crate::playlist::PlayerView;

/// Which keymap is active.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum InputMode {
    #[default]
    Normal,
    /// Typing a file or directory path to add.
    AddPath,
}

#[derive(Debug, Default)]
pub struct App {
    pub title: String,
    pub artist: String,
    pub cover: String,
    pub playing: bool,
    pub progress: f64,
    pub entries: Vec<String>,
    pub highlighted: Option<usize>,

    /// Cursor position in `entries`.
    pub selected: usize,
    /// Move the cursor along with the highlighted entry.
    pub follow_current: bool,

    pub input_mode: InputMode,
    pub input: String,
    pub status: Option<String>,

    pub elapsed: Duration,
    pub total: Option<Duration>,
}

impl App {
    pub fn new(follow_current: bool) -> Self {
        Self {
            follow_current,
            ..Self::default()
        }
    }

    pub fn has_entries(&self) -> bool {
        !self.entries.is_empty()
    }

    /// Move the cursor down one entry, wrapping to the top.
    pub fn next(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        self.selected = (self.selected + 1) % self.entries.len();
    }

    /// Move the cursor up one entry, wrapping to the bottom.
    pub fn prev(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        self.selected = if self.selected == 0 {
            self.entries.len() - 1
        } else {
            self.selected - 1
        };
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.entries.len().saturating_sub(1);
    }

    pub fn set_selected(&mut self, idx: usize) {
        self.selected = idx;
        self.clamp_selected();
    }

    /// Enter the add-path prompt with an empty buffer.
    pub fn enter_add_mode(&mut self) {
        self.input_mode = InputMode::AddPath;
        self.input.clear();
    }

    /// Leave the prompt, returning the typed text.
    pub fn take_input(&mut self) -> String {
        self.input_mode = InputMode::Normal;
        std::mem::take(&mut self.input)
    }

    pub fn cancel_input(&mut self) {
        self.input_mode = InputMode::Normal;
        self.input.clear();
    }

    pub fn push_input_char(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn pop_input_char(&mut self) {
        self.input.pop();
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status = Some(msg.into());
    }

    pub fn set_clock(&mut self, elapsed: Duration, total: Option<Duration>) {
        self.elapsed = elapsed;
        self.total = total;
    }

    fn clamp_selected(&mut self) {
        if self.selected >= self.entries.len() {
            self.selected = self.entries.len().saturating_sub(1);
        }
    }
}

impl PlayerView for App {
    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    fn set_artist(&mut self, artist: &str) {
        self.artist = artist.to_string();
    }

    fn set_cover(&mut self, cover: &str) {
        self.cover = cover.to_string();
    }

    fn set_playing(&mut self, playing: bool) {
        self.playing = playing;
    }

    fn set_progress(&mut self, percent: f64) {
        self.progress = percent.clamp(0.0, 100.0);
    }

    fn append_entry(&mut self, label: &str) {
        self.entries.push(label.to_string());
    }

    fn render_entries(&mut self, labels: &[String]) {
        self.entries = labels.to_vec();
        self.clamp_selected();
    }

    fn set_highlight(&mut self, index: Option<usize>) {
        self.highlighted = index.filter(|&i| i < self.entries.len());
        if self.follow_current {
            if let Some(i) = self.highlighted {
                self.selected = i;
            }
        }
    }
}
