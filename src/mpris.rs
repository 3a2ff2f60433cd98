//! MPRIS remote control on the session bus.
//!
//! Media keys and tools like `playerctl` reach the player through here; each
//! call is forwarded to the event loop as a `ControlCmd`.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, mpsc::Sender};
use std::time::Duration;

use async_io::{Timer, block_on};
use tracing::{debug, warn};
use zbus::{Connection, interface};
use zvariant::{ObjectPath, OwnedValue, Value};

use crate::library::Track;
use crate::playlist::PlaybackState;

const OBJECT_PATH: &str = "/org/mpris/MediaPlayer2";
const BUS_NAME: &str = "org.mpris.MediaPlayer2.reel";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ControlCmd {
    Quit,
    Play,
    Pause,
    PlayPause,
    Next,
    Prev,
}

#[derive(Debug, Default)]
struct SharedState {
    playback: PlaybackState,
    track_id: Option<String>,
    title: Option<String>,
    artist: Vec<String>,
    url: Option<String>,
    art_url: Option<String>,
    length: Option<Duration>,
}

pub struct MprisHandle {
    state: Arc<Mutex<SharedState>>,
}

impl MprisHandle {
    /// A handle not connected to any bus.
    #[cfg(test)]
    pub fn detached() -> Self {
        Self {
            state: Arc::new(Mutex::new(SharedState::default())),
        }
    }

    #[cfg(test)]
    pub fn title(&self) -> Option<String> {
        self.state.lock().ok().and_then(|s| s.title.clone())
    }

    pub fn set_playback(&self, playback: PlaybackState) {
        if let Ok(mut s) = self.state.lock() {
            s.playback = playback;
        }
    }

    /// Length of the current track, once the audio thread has probed it.
    pub fn set_length(&self, length: Option<Duration>) {
        if let Ok(mut s) = self.state.lock() {
            s.length = length;
        }
    }

    /// Publish the current track (`None` when the playlist is empty).
    pub fn set_track_metadata(&self, index: Option<usize>, track: Option<&Track>, cover: &str) {
        let Ok(mut s) = self.state.lock() else {
            return;
        };
        match (index, track) {
            (Some(i), Some(t)) => {
                s.track_id = Some(format!("{OBJECT_PATH}/track/{i}"));
                s.title = Some(t.display_name.clone());
                s.artist = vec![t.artist.clone()];
                s.url = Some(format!("file://{}", t.path.display()));
                s.art_url = Some(t.cover.clone().unwrap_or_else(|| cover.to_string()));
            }
            _ => {
                s.track_id = None;
                s.title = None;
                s.artist.clear();
                s.url = None;
                s.art_url = None;
                s.length = None;
            }
        }
    }
}

fn owned(v: Value<'_>) -> Option<OwnedValue> {
    OwnedValue::try_from(v).ok()
}

struct RootIface {
    tx: Sender<ControlCmd>,
}

#[interface(name = "org.mpris.MediaPlayer2")]
impl RootIface {
    fn raise(&self) {
        // No-op for TUI.
    }

    fn quit(&self) {
        let _ = self.tx.send(ControlCmd::Quit);
    }

    #[zbus(property)]
    fn can_quit(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_raise(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn has_track_list(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn identity(&self) -> &str {
        "reel"
    }

    #[zbus(property)]
    fn supported_uri_schemes(&self) -> Vec<String> {
        vec!["file".to_string()]
    }

    #[zbus(property)]
    fn supported_mime_types(&self) -> Vec<String> {
        vec![]
    }
}

struct PlayerIface {
    tx: Sender<ControlCmd>,
    state: Arc<Mutex<SharedState>>,
}

#[interface(name = "org.mpris.MediaPlayer2.Player")]
impl PlayerIface {
    fn next(&self) {
        let _ = self.tx.send(ControlCmd::Next);
    }

    fn previous(&self) {
        let _ = self.tx.send(ControlCmd::Prev);
    }

    fn play(&self) {
        let _ = self.tx.send(ControlCmd::Play);
    }

    fn pause(&self) {
        let _ = self.tx.send(ControlCmd::Pause);
    }

    fn play_pause(&self) {
        let _ = self.tx.send(ControlCmd::PlayPause);
    }

    /// There is no separate stopped-but-loaded state; stopping pauses.
    fn stop(&self) {
        let _ = self.tx.send(ControlCmd::Pause);
    }

    #[zbus(property)]
    fn playback_status(&self) -> &str {
        let Ok(s) = self.state.lock() else {
            return "Stopped";
        };
        match s.playback {
            PlaybackState::Stopped => "Stopped",
            PlaybackState::Playing => "Playing",
            PlaybackState::Paused => "Paused",
        }
    }

    #[zbus(property)]
    fn can_control(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_play(&self) -> bool {
        self.has_track()
    }

    #[zbus(property)]
    fn can_pause(&self) -> bool {
        self.has_track()
    }

    #[zbus(property)]
    fn can_go_next(&self) -> bool {
        self.has_track()
    }

    #[zbus(property)]
    fn can_go_previous(&self) -> bool {
        self.has_track()
    }

    #[zbus(property)]
    fn metadata(&self) -> HashMap<String, OwnedValue> {
        let mut map = HashMap::new();
        let Ok(s) = self.state.lock() else {
            return map;
        };

        if let Some(path) = s.track_id.as_deref().and_then(|id| ObjectPath::try_from(id).ok()) {
            if let Some(v) = owned(Value::from(path)) {
                map.insert("mpris:trackid".to_string(), v);
            }
        }
        if let Some(v) = s.title.clone().and_then(|t| owned(Value::from(t))) {
            map.insert("xesam:title".to_string(), v);
        }
        if !s.artist.is_empty() {
            if let Some(v) = owned(Value::from(s.artist.clone())) {
                map.insert("xesam:artist".to_string(), v);
            }
        }
        if let Some(len) = s.length {
            let micros = i64::try_from(len.as_micros()).unwrap_or(i64::MAX);
            if let Some(v) = owned(Value::from(micros)) {
                map.insert("mpris:length".to_string(), v);
            }
        }
        if let Some(v) = s.url.clone().and_then(|u| owned(Value::from(u))) {
            map.insert("xesam:url".to_string(), v);
        }
        if let Some(v) = s.art_url.clone().and_then(|u| owned(Value::from(u))) {
            map.insert("mpris:artUrl".to_string(), v);
        }
        map
    }
}

impl PlayerIface {
    fn has_track(&self) -> bool {
        self.state
            .lock()
            .map(|s| s.track_id.is_some())
            .unwrap_or(false)
    }
}

/// Register the MPRIS service on a background thread. Failures are logged and
/// leave the player without remote control.
pub fn spawn_mpris(tx: Sender<ControlCmd>) -> MprisHandle {
    let state = Arc::new(Mutex::new(SharedState::default()));

    let state_for_thread = state.clone();
    std::thread::spawn(move || {
        block_on(async move {
            let connection = match Connection::session().await {
                Ok(c) => c,
                Err(e) => {
                    warn!(error = %e, "MPRIS: failed to connect to session bus");
                    return;
                }
            };

            if let Err(e) = connection.request_name(BUS_NAME).await {
                warn!(error = %e, "MPRIS: failed to acquire name");
                return;
            }

            let object_server = connection.object_server();

            if let Err(e) = object_server.at(OBJECT_PATH, RootIface { tx: tx.clone() }).await {
                warn!(error = %e, "MPRIS: failed to register root iface");
                return;
            }

            if let Err(e) = object_server
                .at(
                    OBJECT_PATH,
                    PlayerIface {
                        tx,
                        state: state_for_thread,
                    },
                )
                .await
            {
                warn!(error = %e, "MPRIS: failed to register player iface");
                return;
            }
            debug!(name = BUS_NAME, "MPRIS service registered");

            // Keep the service alive.
            loop {
                Timer::after(Duration::from_secs(3600)).await;
            }
        });
    });

    MprisHandle { state }
}
