use std::path::{Path, PathBuf};

use super::display::display_name;

/// One playlist entry: a user-selected audio file plus display metadata.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Track {
    pub path: PathBuf,
    pub display_name: String,
    pub artist: String,
    /// Cover reference; `None` means the configured placeholder is shown.
    pub cover: Option<String>,
}

impl Track {
    /// Build a track for `path` credited to `artist`, with no cover of its own.
    pub fn new(path: &Path, artist: &str) -> Self {
        Self {
            path: path.to_path_buf(),
            display_name: display_name(path),
            artist: artist.to_string(),
            cover: None,
        }
    }
}
