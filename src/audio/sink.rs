//! Utilities for creating `rodio` sinks from audio files.
//!
//! The helpers here encapsulate opening/decoding a file, preparing a paused
//! `Sink` at the requested start position, and probing the file's length.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use lofty::prelude::AudioFile;
use rodio::{Decoder, OutputStream, Sink, Source};

use crate::error::{Error, Result};

/// Create a paused `Sink` for the file at `path` that starts playback at `start_at`.
pub(super) fn create_sink_at(handle: &OutputStream, path: &Path, start_at: Duration) -> Result<Sink> {
    let file = File::open(path).map_err(Error::Open)?;

    let source = Decoder::new(BufReader::new(file))?
        // `skip_duration` is our seeking primitive; even Duration::ZERO is fine.
        .skip_duration(start_at);

    let sink = Sink::connect_new(handle.mixer());
    sink.append(source);
    sink.pause();
    Ok(sink)
}

/// Read the stream length from the file's headers. Tags are not consulted.
pub(super) fn probe_duration(path: &Path) -> Option<Duration> {
    let tagged = lofty::read_from_path(path).ok()?;
    let duration = tagged.properties().duration();
    (!duration.is_zero()).then_some(duration)
}

/// Elapsed time from the accumulated total plus the running segment, capped at `duration`.
pub(super) fn elapsed_at(
    accumulated: Duration,
    running_for: Option<Duration>,
    duration: Option<Duration>,
) -> Duration {
    let elapsed = accumulated + running_for.unwrap_or(Duration::ZERO);
    match duration {
        Some(d) => elapsed.min(d),
        None => elapsed,
    }
}
