use super::*;
use crate::error::{Error, Result};
use crate::library::Track;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Bind(PathBuf),
    Unbind,
    Play,
    Pause,
    Seek(Duration),
}

#[derive(Default)]
struct FakeEngine {
    calls: Vec<Call>,
    bound: Option<PathBuf>,
    playing: bool,
    position: Duration,
    duration: Option<Duration>,
}

impl PlaybackEngine for FakeEngine {
    fn bind(&mut self, track: &Track) -> Result<()> {
        self.calls.push(Call::Bind(track.path.clone()));
        self.bound = Some(track.path.clone());
        self.playing = false;
        self.position = Duration::ZERO;
        Ok(())
    }

    fn unbind(&mut self) -> Result<()> {
        self.calls.push(Call::Unbind);
        self.bound = None;
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        self.calls.push(Call::Play);
        self.playing = true;
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        self.calls.push(Call::Pause);
        self.playing = false;
        Ok(())
    }

    fn seek(&mut self, position: Duration) -> Result<()> {
        self.calls.push(Call::Seek(position));
        self.position = position;
        Ok(())
    }

    fn current_time(&self) -> Duration {
        self.position
    }

    fn duration(&self) -> Option<Duration> {
        self.duration
    }
}

#[derive(Default)]
struct FakeView {
    title: String,
    artist: String,
    cover: String,
    playing: bool,
    progress: f64,
    entries: Vec<String>,
    highlight: Option<usize>,
}

impl PlayerView for FakeView {
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
        self.progress = percent;
    }
    fn append_entry(&mut self, label: &str) {
        self.entries.push(label.to_string());
    }
    fn render_entries(&mut self, labels: &[String]) {
        self.entries = labels.to_vec();
    }
    fn set_highlight(&mut self, index: Option<usize>) {
        self.highlight = index;
    }
}

type TestController = PlaylistController<FakeEngine, FakeView>;

fn controller() -> TestController {
    PlaylistController::new(FakeEngine::default(), FakeView::default(), Defaults::default())
}

fn with_tracks(names: &[&str]) -> TestController {
    let mut c = controller();
    c.add_tracks(names.iter().map(|n| PathBuf::from(format!("/music/{n}"))))
        .unwrap();
    c
}

fn titles(c: &TestController) -> Vec<&str> {
    c.tracks().iter().map(|t| t.display_name.as_str()).collect()
}

#[test]
fn new_controller_shows_empty_state() {
    let c = controller();
    assert!(c.is_empty());
    assert_eq!(c.current_index(), None);
    assert_eq!(c.state(), PlaybackState::Stopped);
    assert_eq!(c.view().title, "Song Title");
    assert_eq!(c.view().artist, "Artist Name");
    assert_eq!(c.view().cover, "music-logo.png");
    assert_eq!(c.view().highlight, None);
}

#[test]
fn adding_to_empty_playlist_loads_first_without_playing() {
    let c = with_tracks(&["a.mp3", "b.mp3"]);
    assert_eq!(c.current_index(), Some(0));
    assert_eq!(c.view().title, "a");
    assert_eq!(c.view().artist, "Unknown Artist");
    assert_eq!(c.view().cover, "music-logo.png");
    assert_eq!(c.view().highlight, Some(0));
    assert!(!c.view().playing);
    assert_eq!(c.state(), PlaybackState::Paused);
    assert_eq!(c.engine().calls, vec![Call::Bind(PathBuf::from("/music/a.mp3"))]);
    assert_eq!(c.view().entries, vec!["1. a", "2. b"]);
}

#[test]
fn adding_is_append_only_and_keeps_current_track_bound() {
    let mut c = with_tracks(&["a.mp3", "b.mp3"]);
    c.next().unwrap();
    let calls_before = c.engine().calls.len();

    let added = c
        .add_tracks(["/music/c.flac", "/music/d.ogg"])
        .unwrap();
    assert_eq!(added, 2);
    assert_eq!(titles(&c), vec!["a", "b", "c", "d"]);
    assert_eq!(c.current_index(), Some(1));
    assert_eq!(c.state(), PlaybackState::Playing);
    assert_eq!(c.engine().calls.len(), calls_before);
    assert_eq!(c.view().entries, vec!["1. a", "2. b", "3. c", "4. d"]);
}

#[test]
fn adding_nothing_leaves_playlist_empty() {
    let mut c = controller();
    assert_eq!(c.add_tracks(Vec::<PathBuf>::new()).unwrap(), 0);
    assert_eq!(c.current_index(), None);
    assert!(c.engine().calls.is_empty());
}

#[test]
fn next_walks_forward_and_wraps() {
    let mut c = with_tracks(&["a.mp3", "b.mp3"]);

    c.next().unwrap();
    assert_eq!(c.current_index(), Some(1));
    assert_eq!(c.view().title, "b");
    assert!(c.view().playing);
    assert_eq!(c.view().highlight, Some(1));

    c.next().unwrap();
    assert_eq!(c.current_index(), Some(0));
    assert_eq!(c.view().title, "a");
}

#[test]
fn previous_from_first_wraps_to_last() {
    let mut c = with_tracks(&["a.mp3", "b.mp3", "c.mp3"]);
    c.previous().unwrap();
    assert_eq!(c.current_index(), Some(2));
    assert_eq!(c.view().title, "c");
    assert_eq!(c.state(), PlaybackState::Playing);
}

#[test]
fn next_then_previous_returns_to_start_at_every_position() {
    for len in 1..=4 {
        let names: Vec<String> = (0..len).map(|i| format!("t{i}.mp3")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let mut c = with_tracks(&refs);
        for start in 0..len {
            c.select(start).unwrap();
            c.next().unwrap();
            c.previous().unwrap();
            assert_eq!(c.current_index(), Some(start));
            c.previous().unwrap();
            c.next().unwrap();
            assert_eq!(c.current_index(), Some(start));
        }
    }
}

#[test]
fn navigation_on_empty_playlist_is_a_no_op() {
    let mut c = controller();
    c.next().unwrap();
    c.previous().unwrap();
    c.play().unwrap();
    c.pause().unwrap();
    c.toggle_play().unwrap();
    c.on_playback_ended().unwrap();
    assert_eq!(c.current_index(), None);
    assert_eq!(c.state(), PlaybackState::Stopped);
    assert!(c.engine().calls.is_empty());
}

#[test]
fn pause_keeps_highlight_and_toggle_resumes() {
    let mut c = with_tracks(&["a.mp3", "b.mp3"]);
    c.select(1).unwrap();

    c.pause().unwrap();
    assert_eq!(c.state(), PlaybackState::Paused);
    assert!(!c.view().playing);
    assert_eq!(c.view().highlight, Some(1));
    assert!(!c.engine().playing);

    c.toggle_play().unwrap();
    assert_eq!(c.state(), PlaybackState::Playing);
    assert!(c.view().playing);
    assert!(c.engine().playing);

    c.toggle_play().unwrap();
    assert_eq!(c.state(), PlaybackState::Paused);
}

#[test]
fn select_out_of_range_is_an_error_and_changes_nothing() {
    let mut c = with_tracks(&["a.mp3"]);
    let err = c.select(3).unwrap_err();
    assert!(matches!(err, Error::IndexOutOfBounds { index: 3, len: 1 }));
    assert_eq!(c.current_index(), Some(0));
    assert_eq!(c.state(), PlaybackState::Paused);
}

#[test]
fn deleting_before_current_keeps_the_same_track_current() {
    let mut c = with_tracks(&["a.mp3", "b.mp3", "c.mp3"]);
    c.select(2).unwrap();

    let removed = c.delete_track(0).unwrap();
    assert_eq!(removed.display_name, "a");
    assert_eq!(c.current_index(), Some(1));
    assert_eq!(c.current_track().unwrap().display_name, "c");
    assert_eq!(c.view().highlight, Some(1));
    assert_eq!(c.view().entries, vec!["1. b", "2. c"]);
}

#[test]
fn deleting_after_current_leaves_index_alone() {
    let mut c = with_tracks(&["a.mp3", "b.mp3", "c.mp3"]);
    let calls_before = c.engine().calls.len();

    c.delete_track(1).unwrap();
    assert_eq!(c.len(), 2);
    assert_eq!(c.current_index(), Some(0));
    assert_eq!(c.view().highlight, Some(0));
    assert_eq!(titles(&c), vec!["a", "c"]);
    assert_eq!(c.engine().calls.len(), calls_before);
}

#[test]
fn deleting_current_plays_the_track_that_took_its_place() {
    let mut c = with_tracks(&["a.mp3", "b.mp3", "c.mp3"]);
    c.select(1).unwrap();
    c.pause().unwrap();

    c.delete_track(1).unwrap();
    assert_eq!(c.current_index(), Some(1));
    assert_eq!(c.view().title, "c");
    assert_eq!(c.state(), PlaybackState::Playing);
    assert_eq!(c.engine().bound, Some(PathBuf::from("/music/c.mp3")));
}

#[test]
fn deleting_current_last_track_wraps_to_first() {
    let mut c = with_tracks(&["a.mp3", "b.mp3", "c.mp3"]);
    c.select(2).unwrap();

    c.delete_track(2).unwrap();
    assert_eq!(c.current_index(), Some(0));
    assert_eq!(c.view().title, "a");
    assert_eq!(c.view().highlight, Some(0));
    assert!(c.view().playing);
}

#[test]
fn deleting_the_only_track_resets_the_player() {
    let mut c = with_tracks(&["solo.mp3"]);
    c.play().unwrap();
    c.on_progress_tick(Duration::from_secs(3), Some(Duration::from_secs(6)));

    c.delete_track(0).unwrap();
    assert!(c.is_empty());
    assert_eq!(c.current_index(), None);
    assert_eq!(c.state(), PlaybackState::Stopped);
    assert_eq!(c.view().title, "Song Title");
    assert_eq!(c.view().artist, "Artist Name");
    assert!(!c.view().playing);
    assert_eq!(c.view().progress, 0.0);
    assert_eq!(c.view().highlight, None);
    assert!(c.view().entries.is_empty());
    assert_eq!(c.engine().bound, None);
    assert!(!c.engine().playing);
    assert_eq!(c.engine().calls[c.engine().calls.len() - 2..], [Call::Pause, Call::Unbind]);
}

#[test]
fn delete_out_of_range_is_an_error() {
    let mut c = with_tracks(&["a.mp3"]);
    assert!(matches!(
        c.delete_track(1),
        Err(Error::IndexOutOfBounds { index: 1, len: 1 })
    ));
    assert_eq!(c.len(), 1);
}

#[test]
fn re_adding_a_deleted_file_appends_it_at_the_end() {
    let mut c = with_tracks(&["a.mp3", "b.mp3", "c.mp3"]);
    c.delete_track(0).unwrap();
    c.add_tracks(["/music/a.mp3"]).unwrap();
    assert_eq!(titles(&c), vec!["b", "c", "a"]);
    assert_eq!(c.view().entries, vec!["1. b", "2. c", "3. a"]);
}

#[test]
fn adding_after_the_playlist_emptied_loads_the_new_first_track() {
    let mut c = with_tracks(&["a.mp3"]);
    c.delete_track(0).unwrap();
    c.add_tracks(["/music/z.mp3"]).unwrap();
    assert_eq!(c.current_index(), Some(0));
    assert_eq!(c.view().title, "z");
    assert_eq!(c.state(), PlaybackState::Paused);
}

#[test]
fn playback_ended_advances_like_next() {
    let mut c = with_tracks(&["a.mp3", "b.mp3"]);
    c.play().unwrap();
    c.on_playback_ended().unwrap();
    assert_eq!(c.current_index(), Some(1));
    assert_eq!(c.state(), PlaybackState::Playing);
    c.on_playback_ended().unwrap();
    assert_eq!(c.current_index(), Some(0));
}

#[test]
fn progress_percent_bounds() {
    let d = Some(Duration::from_secs(200));
    assert_eq!(progress_percent(Duration::ZERO, d), 0.0);
    assert_eq!(progress_percent(Duration::from_secs(200), d), 100.0);
    assert_eq!(progress_percent(Duration::from_secs(50), d), 25.0);
    assert_eq!(progress_percent(Duration::from_secs(300), d), 100.0);
    assert_eq!(progress_percent(Duration::from_secs(5), None), 0.0);
    assert_eq!(progress_percent(Duration::from_secs(5), Some(Duration::ZERO)), 0.0);
}

#[test]
fn progress_tick_updates_the_bar() {
    let mut c = with_tracks(&["a.mp3"]);
    let p = c.on_progress_tick(Duration::from_secs(30), Some(Duration::from_secs(120)));
    assert_eq!(p, 25.0);
    assert_eq!(c.view().progress, 25.0);
}

fn with_duration(secs: u64, names: &[&str]) -> TestController {
    let engine = FakeEngine {
        duration: Some(Duration::from_secs(secs)),
        ..FakeEngine::default()
    };
    let mut c = PlaylistController::new(engine, FakeView::default(), Defaults::default());
    c.add_tracks(names.iter().map(|n| PathBuf::from(format!("/music/{n}"))))
        .unwrap();
    c
}

#[test]
fn seek_to_maps_click_fraction_onto_duration() {
    let mut c = with_duration(200, &["a.mp3"]);

    let pos = c.seek_to(25, 100).unwrap();
    assert_eq!(pos, Some(Duration::from_secs(50)));
    assert_eq!(c.engine().position, Duration::from_secs(50));
    assert_eq!(c.view().progress, 25.0);

    // Clicks past the bar clamp to the end.
    assert_eq!(c.seek_to(150, 100).unwrap(), Some(Duration::from_secs(200)));
}

#[test]
fn seek_is_a_no_op_without_width_duration_or_tracks() {
    // FakeEngine starts with an unknown duration.
    let mut c = with_tracks(&["a.mp3"]);
    assert_eq!(c.seek_to(10, 100).unwrap(), None);

    let mut c = with_duration(60, &[]);
    assert_eq!(c.seek_to(10, 100).unwrap(), None);
    c.add_tracks(["/music/a.mp3"]).unwrap();
    assert_eq!(c.seek_to(10, 0).unwrap(), None);
    assert!(!c.engine().calls.iter().any(|call| matches!(call, Call::Seek(_))));
}

#[test]
fn seek_by_clamps_to_track_bounds() {
    let mut c = with_duration(60, &["a.mp3"]);

    assert_eq!(c.seek_by(-5).unwrap(), Some(Duration::ZERO));
    assert_eq!(c.seek_by(45).unwrap(), Some(Duration::from_secs(45)));
    assert_eq!(c.seek_by(45).unwrap(), Some(Duration::from_secs(60)));
    assert_eq!(c.view().progress, 100.0);
}

#[test]
fn custom_defaults_flow_into_tracks_and_reset() {
    let defaults = Defaults {
        empty_title: "Nothing here".into(),
        empty_artist: "-".into(),
        placeholder_cover: "blank.png".into(),
        track_artist: "Various".into(),
    };
    let mut c = PlaylistController::new(FakeEngine::default(), FakeView::default(), defaults);
    assert_eq!(c.view().title, "Nothing here");

    c.add_tracks(["/music/x.wav"]).unwrap();
    assert_eq!(c.view().artist, "Various");
    assert_eq!(c.view().cover, "blank.png");

    c.delete_track(0).unwrap();
    assert_eq!(c.view().artist, "-");
}
