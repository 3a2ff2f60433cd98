use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What a key press in normal mode asks for.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Action {
    TogglePlay,
    Next,
    Previous,
    CursorDown,
    CursorUp,
    CursorTop,
    CursorBottom,
    Select,
    Delete,
    ScrubBack,
    ScrubForward,
    /// Seek to `n` tenths of the track.
    SeekTenths(u8),
    AddPath,
    Quit,
}

pub fn map_key(key: KeyEvent) -> Option<Action> {
    if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
        return None;
    }
    let action = match key.code {
        KeyCode::Char(' ') | KeyCode::Char('p') => Action::TogglePlay,
        KeyCode::Char('l') | KeyCode::Char('n') | KeyCode::Right => Action::Next,
        KeyCode::Char('h') | KeyCode::Char('b') | KeyCode::Left => Action::Previous,
        KeyCode::Char('j') | KeyCode::Down => Action::CursorDown,
        KeyCode::Char('k') | KeyCode::Up => Action::CursorUp,
        KeyCode::Char('g') | KeyCode::Home => Action::CursorTop,
        KeyCode::Char('G') | KeyCode::End => Action::CursorBottom,
        KeyCode::Enter => Action::Select,
        KeyCode::Char('d') | KeyCode::Char('x') | KeyCode::Delete => Action::Delete,
        KeyCode::Char('H') => Action::ScrubBack,
        KeyCode::Char('L') => Action::ScrubForward,
        KeyCode::Char(c @ '0'..='9') => Action::SeekTenths(c as u8 - b'0'),
        KeyCode::Char('a') => Action::AddPath,
        KeyCode::Char('q') => Action::Quit,
        _ => return None,
    };
    Some(action)
}

/// Expand a leading `~` in a typed path.
pub fn expand_tilde(input: &str, home: Option<PathBuf>) -> PathBuf {
    let input = input.trim();
    match (input.strip_prefix('~'), home) {
        (Some(""), Some(home)) => home,
        (Some(rest), Some(home)) if rest.starts_with('/') => home.join(&rest[1..]),
        _ => PathBuf::from(input),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn playback_keys_have_vim_and_letter_aliases() {
        assert_eq!(map_key(press(KeyCode::Char(' '))), Some(Action::TogglePlay));
        assert_eq!(map_key(press(KeyCode::Char('p'))), Some(Action::TogglePlay));
        assert_eq!(map_key(press(KeyCode::Char('l'))), Some(Action::Next));
        assert_eq!(map_key(press(KeyCode::Char('n'))), Some(Action::Next));
        assert_eq!(map_key(press(KeyCode::Char('h'))), Some(Action::Previous));
        assert_eq!(map_key(press(KeyCode::Char('b'))), Some(Action::Previous));
        assert_eq!(map_key(press(KeyCode::Char('x'))), Some(Action::Delete));
    }

    #[test]
    fn digits_seek_in_tenths() {
        assert_eq!(map_key(press(KeyCode::Char('0'))), Some(Action::SeekTenths(0)));
        assert_eq!(map_key(press(KeyCode::Char('7'))), Some(Action::SeekTenths(7)));
    }

    #[test]
    fn shifted_scrub_keys_differ_from_track_keys() {
        let shifted = KeyEvent::new(KeyCode::Char('L'), KeyModifiers::SHIFT);
        assert_eq!(map_key(shifted), Some(Action::ScrubForward));
        assert_eq!(map_key(press(KeyCode::Char('H'))), Some(Action::ScrubBack));
    }

    #[test]
    fn control_chords_and_unbound_keys_are_ignored() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(ctrl_c), None);
        let ctrl_q = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert_eq!(map_key(ctrl_q), None);
        assert_eq!(map_key(press(KeyCode::Char('z'))), None);
        assert_eq!(map_key(press(KeyCode::Tab)), None);
    }

    #[test]
    fn expand_tilde_uses_home() {
        let home = Some(PathBuf::from("/home/me"));
        assert_eq!(expand_tilde("~", home.clone()), PathBuf::from("/home/me"));
        assert_eq!(
            expand_tilde("~/Music/a.mp3", home.clone()),
            PathBuf::from("/home/me/Music/a.mp3")
        );
        assert_eq!(expand_tilde("  /srv/x  ", home.clone()), PathBuf::from("/srv/x"));
        assert_eq!(expand_tilde("~other/x", home), PathBuf::from("~other/x"));
        assert_eq!(expand_tilde("~/x", None), PathBuf::from("~/x"));
    }
}
