use std::path::PathBuf;
use std::sync::mpsc::{Receiver, RecvTimeoutError, SyncSender};
use std::thread;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use rodio::{OutputStream, OutputStreamBuilder, Sink};
use tracing::{debug, error, warn};

use super::sink::{create_sink_at, elapsed_at, probe_duration};
use super::types::{AudioCmd, PlaybackHandle, PlaybackInfo};

/// How often the thread publishes elapsed time and checks for end of track.
const TICK: Duration = Duration::from_millis(200);

/// Everything the audio thread knows about the bound source.
struct Deck {
    path: Option<PathBuf>,
    sink: Option<Sink>,
    paused: bool,
    // Track start time and accumulated elapsed when paused.
    started_at: Option<Instant>,
    accumulated: Duration,
    duration: Option<Duration>,
}

impl Deck {
    fn new() -> Self {
        Self {
            path: None,
            sink: None,
            paused: true,
            started_at: None,
            accumulated: Duration::ZERO,
            duration: None,
        }
    }

    fn elapsed(&self) -> Duration {
        elapsed_at(
            self.accumulated,
            self.started_at.map(|st| st.elapsed()),
            self.duration,
        )
    }

    fn load(&mut self, stream: &OutputStream, path: PathBuf, info: &PlaybackHandle) {
        self.unload(info);

        match create_sink_at(stream, &path, Duration::ZERO) {
            Ok(sink) => {
                self.duration = probe_duration(&path);
                debug!(path = %path.display(), duration = ?self.duration, "source loaded");
                self.sink = Some(sink);
                self.path = Some(path);
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "cannot play file");
            }
        }
        self.publish(info, |i| {
            i.ended = false;
        });
    }

    fn unload(&mut self, info: &PlaybackHandle) {
        if let Some(s) = self.sink.take() {
            s.stop();
        }
        *self = Self::new();
        self.publish(info, |i| i.ended = false);
    }

    fn play(&mut self, info: &PlaybackHandle) {
        let Some(ref s) = self.sink else {
            return;
        };
        if self.paused {
            s.play();
            self.paused = false;
            self.started_at = Some(Instant::now());
            self.publish(info, |_| {});
        }
    }

    fn pause(&mut self, info: &PlaybackHandle) {
        let Some(ref s) = self.sink else {
            return;
        };
        if !self.paused {
            s.pause();
            self.accumulated = self.elapsed();
            self.started_at = None;
            self.paused = true;
            self.publish(info, |_| {});
        }
    }

    /// Scrubbing: rebuild the current sink and skip into the file.
    fn seek(&mut self, stream: &OutputStream, position: Duration, info: &PlaybackHandle) {
        let Some(path) = self.path.clone() else {
            return;
        };
        let position = match self.duration {
            Some(d) => position.min(d),
            None => position,
        };

        let new_sink = match create_sink_at(stream, &path, position) {
            Ok(s) => s,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "seek failed");
                return;
            }
        };
        if let Some(s) = self.sink.as_ref() {
            s.stop();
        }
        if self.paused {
            self.started_at = None;
        } else {
            new_sink.play();
            self.started_at = Some(Instant::now());
        }
        self.sink = Some(new_sink);
        self.accumulated = position;
        self.publish(info, |i| i.ended = false);
    }

    /// Periodic check: publish elapsed time and flag the end of the source.
    fn tick(&mut self, info: &PlaybackHandle) {
        let finished = match self.sink {
            Some(ref s) => !self.paused && s.empty(),
            None => false,
        };
        if finished {
            self.accumulated = self.duration.unwrap_or_else(|| self.elapsed());
            self.started_at = None;
            self.paused = true;
            self.publish(info, |i| i.ended = true);
        } else if !self.paused {
            self.publish(info, |_| {});
        }
    }

    fn publish(&self, info: &PlaybackHandle, extra: impl FnOnce(&mut PlaybackInfo)) {
        if let Ok(mut i) = info.lock() {
            i.elapsed = self.elapsed();
            i.duration = self.duration;
            extra(&mut i);
        }
    }
}

fn fade_out_sink(sink: &Sink, fade_out_ms: u64) {
    if fade_out_ms == 0 {
        sink.set_volume(0.0);
        return;
    }
    let steps: u64 = 20;
    let step_ms = (fade_out_ms / steps).max(1);
    sink.set_volume(1.0);
    for step in 1..=steps {
        let t = step as f32 / steps as f32;
        sink.set_volume(1.0 - t);
        thread::sleep(Duration::from_millis(step_ms));
    }
    sink.set_volume(0.0);
}

/// Spawn the thread that owns the output stream. `ready` receives `Ok(())`
/// once the device is open, or the reason it could not be opened.
pub(super) fn spawn_audio_thread(
    rx: Receiver<AudioCmd>,
    playback_info: PlaybackHandle,
    ready: SyncSender<Result<(), String>>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut stream = match OutputStreamBuilder::open_default_stream() {
            Ok(s) => s,
            Err(e) => {
                error!(error = %e, "no audio output device");
                let _ = ready.send(Err(e.to_string()));
                return;
            }
        };
        // rodio logs to stderr when OutputStream is dropped. That's useful in debugging,
        // but noisy for a TUI app.
        stream.log_on_drop(false);
        let _ = ready.send(Ok(()));

        let mut deck = Deck::new();

        loop {
            match rx.recv_timeout(TICK) {
                Ok(cmd) => match cmd {
                    AudioCmd::Load(path) => deck.load(&stream, path, &playback_info),
                    AudioCmd::Unload => deck.unload(&playback_info),
                    AudioCmd::Play => deck.play(&playback_info),
                    AudioCmd::Pause => deck.pause(&playback_info),
                    AudioCmd::Seek(position) => deck.seek(&stream, position, &playback_info),
                    AudioCmd::Quit { fade_out_ms } => {
                        if let Some(ref s) = deck.sink {
                            if !deck.paused {
                                fade_out_sink(s, fade_out_ms);
                            }
                            s.stop();
                        }
                        debug!("audio thread exiting");
                        break;
                    }
                },
                Err(RecvTimeoutError::Timeout) => deck.tick(&playback_info),
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    })
}
