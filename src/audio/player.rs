use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use tracing::info;

use crate::error::{Error, Result};
use crate::library::Track;
use crate::playlist::PlaybackEngine;

use super::thread::spawn_audio_thread;
use super::types::{AudioCmd, PlaybackHandle, PlaybackInfo};

/// Handle to the audio thread. Commands are fire-and-forget; state comes
/// back through the shared `PlaybackInfo`.
pub struct AudioPlayer {
    tx: Sender<AudioCmd>,
    playback: PlaybackHandle,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl AudioPlayer {
    /// Start the audio thread and wait until the output device is open.
    pub fn new() -> Result<Self> {
        let (tx, rx) = mpsc::channel::<AudioCmd>();
        let (ready_tx, ready_rx) = mpsc::sync_channel::<std::result::Result<(), String>>(1);
        let playback_info: PlaybackHandle = Arc::new(Mutex::new(PlaybackInfo::default()));

        let audio_handle = spawn_audio_thread(rx, playback_info.clone(), ready_tx);

        match ready_rx.recv() {
            Ok(Ok(())) => info!("audio output ready"),
            Ok(Err(msg)) => return Err(Error::NoAudioDevice(msg)),
            Err(_) => return Err(Error::AudioDisconnected),
        }

        Ok(Self {
            tx,
            playback: playback_info,
            join: Mutex::new(Some(audio_handle)),
        })
    }

    /// Snapshot of the shared playback information.
    pub fn info(&self) -> PlaybackInfo {
        self.playback
            .lock()
            .map(|i| i.clone())
            .unwrap_or_default()
    }

    /// Consume the "reached end of source" notification, if one is pending.
    pub fn take_ended(&self) -> bool {
        self.playback
            .lock()
            .map(|mut i| std::mem::take(&mut i.ended))
            .unwrap_or(false)
    }

    fn send(&self, cmd: AudioCmd) -> Result<()> {
        self.tx.send(cmd).map_err(|_| Error::AudioDisconnected)
    }

    /// Fade out whatever is playing, stop the audio thread and wait for it.
    pub fn quit_softly(&self, fade_out: Duration) {
        let _ = self.send(AudioCmd::Quit {
            fade_out_ms: fade_millis(fade_out),
        });

        if let Ok(mut j) = self.join.lock() {
            if let Some(h) = j.take() {
                let _ = h.join();
            }
        }
    }

    fn update(&self, f: impl FnOnce(&mut PlaybackInfo)) {
        if let Ok(mut i) = self.playback.lock() {
            f(&mut i);
        }
    }
}

impl PlaybackEngine for AudioPlayer {
    fn bind(&mut self, track: &Track) -> Result<()> {
        // Reset eagerly so a stale end-of-track or elapsed time from the
        // previous source is never observed before the thread catches up.
        self.update(|i| *i = PlaybackInfo::default());
        self.send(AudioCmd::Load(track.path.clone()))
    }

    fn unbind(&mut self) -> Result<()> {
        self.update(|i| *i = PlaybackInfo::default());
        self.send(AudioCmd::Unload)
    }

    fn play(&mut self) -> Result<()> {
        self.send(AudioCmd::Play)
    }

    fn pause(&mut self) -> Result<()> {
        self.send(AudioCmd::Pause)
    }

    fn seek(&mut self, position: Duration) -> Result<()> {
        self.update(|i| i.elapsed = position);
        self.send(AudioCmd::Seek(position))
    }

    fn current_time(&self) -> Duration {
        self.info().elapsed
    }

    fn duration(&self) -> Option<Duration> {
        self.info().duration
    }
}

/// Whole milliseconds in `fade_out`, saturating instead of wrapping.
pub(super) fn fade_millis(fade_out: Duration) -> u64 {
    u64::try_from(fade_out.as_millis()).unwrap_or(u64::MAX)
}
