use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/reel/config.toml` or `~/.config/reel/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `REEL__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub audio: AudioSettings,
    pub ui: UiSettings,
    pub controls: ControlsSettings,
    pub library: LibrarySettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Fade-out duration when quitting (milliseconds).
    /// Set to 0 to stop immediately.
    pub quit_fade_out_ms: u64,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            quit_fade_out_ms: 500,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top "reel" header box.
    pub header_text: String,

    /// Title shown while the playlist is empty.
    pub empty_title: String,

    /// Artist shown while the playlist is empty.
    pub empty_artist: String,

    /// Cover reference used for tracks without their own cover.
    pub placeholder_cover: String,

    /// Whether the list cursor jumps to the current track when it changes.
    pub follow_current: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ reel: press a to add music ~ ".to_string(),
            empty_title: "Song Title".to_string(),
            empty_artist: "Artist Name".to_string(),
            placeholder_cover: "music-logo.png".to_string(),
            follow_current: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ControlsSettings {
    /// Number of seconds to scrub when pressing `H` / `L`.
    pub scrub_seconds: u64,
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self { scrub_seconds: 5 }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// File extensions to treat as audio (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Artist assigned to every added track.
    pub default_artist: String,
    /// Whether to follow symlinks when expanding directories.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
    /// Whether to recurse into subdirectories.
    pub recursive: bool,
    /// Optional cap on directory recursion depth.
    pub max_depth: Option<usize>,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            extensions: vec!["mp3".into(), "flac".into(), "wav".into(), "ogg".into()],
            default_artist: "Unknown Artist".to_string(),
            follow_links: true,
            include_hidden: false,
            recursive: true,
            max_depth: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `tracing` filter directive, e.g. `info` or `reel=debug`.
    /// `REEL_LOG` takes precedence when set.
    pub level: String,
    /// Log file. Defaults to `$XDG_STATE_HOME/reel/reel.log`.
    pub file: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}
