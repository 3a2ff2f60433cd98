//! The playlist state machine.
//!
//! `PlaylistController` owns the ordered tracks and the current index, and
//! keeps the playback engine and the display in step with them.

use std::path::Path;
use std::time::Duration;

use tracing::{debug, info};

use crate::config::Settings;
use crate::error::{Error, Result};
use crate::library::{Track, entry_label};

use super::ports::{PlaybackEngine, PlayerView};

/// Playback state as seen by the controller.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PlaybackState {
    /// Nothing loaded (empty playlist).
    #[default]
    Stopped,
    Playing,
    Paused,
}

/// Text and references shown when nothing overrides them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Defaults {
    /// Title shown while the playlist is empty.
    pub empty_title: String,
    /// Artist shown while the playlist is empty.
    pub empty_artist: String,
    /// Cover shown for tracks without one, and while empty.
    pub placeholder_cover: String,
    /// Artist given to newly added tracks.
    pub track_artist: String,
}

impl Defaults {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            empty_title: settings.ui.empty_title.clone(),
            empty_artist: settings.ui.empty_artist.clone(),
            placeholder_cover: settings.ui.placeholder_cover.clone(),
            track_artist: settings.library.default_artist.clone(),
        }
    }
}

impl Default for Defaults {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

pub struct PlaylistController<E, V> {
    tracks: Vec<Track>,
    current: Option<usize>,
    state: PlaybackState,
    engine: E,
    view: V,
    defaults: Defaults,
}

impl<E: PlaybackEngine, V: PlayerView> PlaylistController<E, V> {
    /// Create an empty playlist and put the view into its empty state.
    pub fn new(engine: E, view: V, defaults: Defaults) -> Self {
        let mut controller = Self {
            tracks: Vec::new(),
            current: None,
            state: PlaybackState::Stopped,
            engine,
            view,
            defaults,
        };
        controller.show_empty();
        controller
    }

    #[cfg(test)]
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Index of the loaded track; `None` iff the playlist is empty.
    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.current.and_then(|i| self.tracks.get(i))
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Append one track per file, in the given order, and render their entries.
    ///
    /// When the playlist was empty the first new track is loaded but not played.
    /// Returns the number of tracks added.
    pub fn add_tracks<I, P>(&mut self, files: I) -> Result<usize>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let was_empty = self.tracks.is_empty();
        let before = self.tracks.len();

        for file in files {
            let track = Track::new(file.as_ref(), &self.defaults.track_artist);
            self.view
                .append_entry(&entry_label(self.tracks.len(), &track.display_name));
            self.tracks.push(track);
        }

        let added = self.tracks.len() - before;
        info!(added, total = self.tracks.len(), "added tracks");

        if was_empty && added > 0 {
            self.load_track(0)?;
        }
        Ok(added)
    }

    /// Make `index` the current track: update the now-playing fields, bind the
    /// engine to it (paused) and move the highlight.
    pub fn load_track(&mut self, index: usize) -> Result<()> {
        let len = self.tracks.len();
        let Some(track) = self.tracks.get(index) else {
            return Err(Error::IndexOutOfBounds { index, len });
        };

        self.current = Some(index);
        self.state = PlaybackState::Paused;

        self.view.set_title(&track.display_name);
        self.view.set_artist(&track.artist);
        self.view
            .set_cover(track.cover.as_deref().unwrap_or(&self.defaults.placeholder_cover));
        self.view.set_playing(false);
        self.view.set_progress(0.0);
        self.view.set_highlight(Some(index));

        debug!(index, title = %track.display_name, "loading track");
        self.engine.bind(track)
    }

    /// Start playing the loaded track. No-op on an empty playlist.
    pub fn play(&mut self) -> Result<()> {
        let Some(index) = self.current else {
            debug!("play ignored: playlist is empty");
            return Ok(());
        };

        self.engine.play()?;
        self.state = PlaybackState::Playing;
        self.view.set_playing(true);
        self.view.set_highlight(Some(index));
        Ok(())
    }

    /// Pause playback. The highlight stays on the current entry.
    pub fn pause(&mut self) -> Result<()> {
        if self.current.is_none() {
            return Ok(());
        }

        self.engine.pause()?;
        self.state = PlaybackState::Paused;
        self.view.set_playing(false);
        Ok(())
    }

    /// The play/pause button.
    pub fn toggle_play(&mut self) -> Result<()> {
        match self.state {
            PlaybackState::Playing => self.pause(),
            PlaybackState::Paused | PlaybackState::Stopped => self.play(),
        }
    }

    /// Load and play the following track, wrapping from the last to the first.
    pub fn next(&mut self) -> Result<()> {
        let Some(current) = self.current else {
            return Ok(());
        };
        let next = (current + 1) % self.tracks.len();
        self.load_track(next)?;
        self.play()
    }

    /// Load and play the preceding track, wrapping from the first to the last.
    pub fn previous(&mut self) -> Result<()> {
        let Some(current) = self.current else {
            return Ok(());
        };
        let prev = if current == 0 {
            self.tracks.len() - 1
        } else {
            current - 1
        };
        self.load_track(prev)?;
        self.play()
    }

    /// Load and play the track at `index` (a click on its list entry).
    pub fn select(&mut self, index: usize) -> Result<()> {
        self.load_track(index)?;
        self.play()
    }

    /// Remove the track at `index` and renumber the list.
    ///
    /// Deleting the current track moves on to the track that took its place
    /// (or the first one, if it was last) and plays it; deleting the only
    /// track resets the player. Returns the removed track.
    pub fn delete_track(&mut self, index: usize) -> Result<Track> {
        let len = self.tracks.len();
        if index >= len {
            return Err(Error::IndexOutOfBounds { index, len });
        }

        let removed = self.tracks.remove(index);
        let labels = self.entry_labels();
        self.view.render_entries(&labels);
        info!(index, title = %removed.display_name, remaining = self.tracks.len(), "deleted track");

        match self.current {
            Some(current) if current == index => {
                if self.tracks.is_empty() {
                    self.reset()?;
                } else {
                    let replacement = if index == self.tracks.len() { 0 } else { index };
                    self.load_track(replacement)?;
                    self.play()?;
                }
            }
            Some(current) if index < current => {
                self.current = Some(current - 1);
                self.view.set_highlight(self.current);
            }
            current => self.view.set_highlight(current),
        }

        Ok(removed)
    }

    /// Seek to the position matching a click `click_x` cells into a progress
    /// bar `width` cells wide. Returns the new position, if a seek happened.
    pub fn seek_to(&mut self, click_x: u16, width: u16) -> Result<Option<Duration>> {
        if self.current.is_none() || width == 0 {
            return Ok(None);
        }
        let Some(duration) = self.engine.duration() else {
            return Ok(None);
        };

        let fraction = (f64::from(click_x) / f64::from(width)).clamp(0.0, 1.0);
        let position = duration.mul_f64(fraction);
        self.engine.seek(position)?;
        self.view.set_progress(fraction * 100.0);
        Ok(Some(position))
    }

    /// Scrub `delta_secs` forwards or backwards from the current time.
    pub fn seek_by(&mut self, delta_secs: i64) -> Result<Option<Duration>> {
        if self.current.is_none() {
            return Ok(None);
        }

        let now = self.engine.current_time();
        let delta = Duration::from_secs(delta_secs.unsigned_abs());
        let mut target = if delta_secs >= 0 {
            now.saturating_add(delta)
        } else {
            now.saturating_sub(delta)
        };
        let duration = self.engine.duration();
        if let Some(d) = duration {
            target = target.min(d);
        }

        self.engine.seek(target)?;
        self.view.set_progress(progress_percent(target, duration));
        Ok(Some(target))
    }

    /// Time-update notification from the engine: refresh the progress bar.
    pub fn on_progress_tick(&mut self, current_time: Duration, duration: Option<Duration>) -> f64 {
        let percent = progress_percent(current_time, duration);
        self.view.set_progress(percent);
        percent
    }

    /// End-of-track notification from the engine.
    pub fn on_playback_ended(&mut self) -> Result<()> {
        self.next()
    }

    /// Current list labels, numbered from 1.
    pub fn entry_labels(&self) -> Vec<String> {
        self.tracks
            .iter()
            .enumerate()
            .map(|(i, t)| entry_label(i, &t.display_name))
            .collect()
    }

    fn reset(&mut self) -> Result<()> {
        self.engine.pause()?;
        self.engine.unbind()?;
        self.current = None;
        self.state = PlaybackState::Stopped;
        self.show_empty();
        Ok(())
    }

    fn show_empty(&mut self) {
        self.view.set_title(&self.defaults.empty_title);
        self.view.set_artist(&self.defaults.empty_artist);
        self.view.set_cover(&self.defaults.placeholder_cover);
        self.view.set_playing(false);
        self.view.set_progress(0.0);
        self.view.set_highlight(None);
    }
}

/// Progress bar fill for `current` out of `duration`, clamped to `0..=100`.
///
/// Unknown or zero durations read as 0 %.
pub fn progress_percent(current: Duration, duration: Option<Duration>) -> f64 {
    match duration {
        Some(d) if !d.is_zero() => (current.as_secs_f64() / d.as_secs_f64() * 100.0).clamp(0.0, 100.0),
        _ => 0.0,
    }
}
