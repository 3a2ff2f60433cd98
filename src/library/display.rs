use std::path::Path;

/// Derive the title shown for a file: its name without the last extension.
///
/// `"a.b.mp3"` becomes `"a.b"`; a name without a dot is kept as is.
pub fn display_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Label for the list entry at zero-based `index`, numbered from 1.
pub fn entry_label(index: usize, display_name: &str) -> String {
    format!("{}. {}", index + 1, display_name)
}
