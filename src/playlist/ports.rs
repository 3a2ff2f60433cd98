//! The two collaborators the controller drives.
//!
//! Implementations live elsewhere (`audio::AudioPlayer`, `app::App`); tests
//! substitute in-memory doubles.

use std::time::Duration;

use crate::error::Result;
use crate::library::Track;

/// Audio playback primitive: one bound source at a time.
pub trait PlaybackEngine {
    /// Bind the engine to `track`'s audio, paused at the start.
    fn bind(&mut self, track: &Track) -> Result<()>;
    /// Drop the current source, if any.
    fn unbind(&mut self) -> Result<()>;
    fn play(&mut self) -> Result<()>;
    fn pause(&mut self) -> Result<()>;
    /// Jump to `position` within the bound source.
    fn seek(&mut self, position: Duration) -> Result<()>;
    fn current_time(&self) -> Duration;
    /// Length of the bound source, when known.
    fn duration(&self) -> Option<Duration>;
}

/// Display surfaces: now-playing fields, play/pause control, progress bar and
/// the rendered track list.
pub trait PlayerView {
    fn set_title(&mut self, title: &str);
    fn set_artist(&mut self, artist: &str);
    fn set_cover(&mut self, cover: &str);
    /// Show the control as "pause" (`true`) or "play" (`false`).
    fn set_playing(&mut self, playing: bool);
    /// Progress bar fill, in percent.
    fn set_progress(&mut self, percent: f64);
    fn append_entry(&mut self, label: &str);
    /// Replace every list entry, e.g. after renumbering.
    fn render_entries(&mut self, labels: &[String]);
    /// Mark exactly one entry, or none.
    fn set_highlight(&mut self, index: Option<usize>);
}
