//! Audio-related small types and handles.
//!
//! This module defines the commands accepted by the audio thread and the
//! playback information it publishes back.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug)]
pub enum AudioCmd {
    /// Replace the current source with the file at this path, paused at 0.
    Load(PathBuf),
    /// Drop the current source.
    Unload,
    Play,
    Pause,
    /// Jump to an absolute position in the current source.
    Seek(Duration),
    /// Quit the audio thread, optionally fading out over `fade_out_ms` milliseconds.
    Quit { fade_out_ms: u64 },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Runtime playback information shared with the UI thread.
pub struct PlaybackInfo {
    /// Elapsed playback time for the current source.
    pub elapsed: Duration,
    /// Length of the current source, when it could be probed.
    pub duration: Option<Duration>,
    /// Set when the source played to its end; cleared by `take_ended`.
    pub ended: bool,
}

pub type PlaybackHandle = Arc<Mutex<PlaybackInfo>>;
