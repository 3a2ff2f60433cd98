use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::LibrarySettings;

pub(super) fn is_audio_file(path: &Path, settings: &LibrarySettings) -> bool {
    let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
        return false;
    };
    let ext = ext.to_ascii_lowercase();
    settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .any(|e| !e.is_empty() && e == ext)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Turn user-selected paths into the list of audio files to add, in order.
///
/// Files are kept when their extension is configured, even if hidden: the user
/// named them. Directories contribute their audio files sorted by file name.
pub fn expand_paths<P: AsRef<Path>>(paths: &[P], settings: &LibrarySettings) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for path in paths.iter().map(AsRef::as_ref) {
        if path.is_dir() {
            let before = files.len();
            walk_dir(path, settings, &mut files);
            debug!(dir = %path.display(), found = files.len() - before, "expanded directory");
        } else if path.is_file() {
            if is_audio_file(path, settings) {
                files.push(path.to_path_buf());
            } else {
                warn!(path = %path.display(), "skipping file with unsupported extension");
            }
        } else {
            warn!(path = %path.display(), "skipping path that does not exist");
        }
    }

    files
}

fn walk_dir(dir: &Path, settings: &LibrarySettings, out: &mut Vec<PathBuf>) {
    let mut walker = WalkDir::new(dir)
        .follow_links(settings.follow_links)
        .sort_by_file_name();

    // Non-recursive = only the directory's own entries.
    let depth_cap = if settings.recursive {
        settings.max_depth
    } else {
        Some(1)
    };
    if let Some(d) = depth_cap {
        walker = walker.max_depth(d);
    }

    for entry in walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(Result::ok)
    {
        let path = entry.path();
        if path.is_file() && is_audio_file(path, settings) {
            out.push(path.to_path_buf());
        }
    }
}
