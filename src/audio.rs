//! Audio playback backed by `rodio`.
//!
//! A dedicated thread owns the output stream and the current sink; the rest
//! of the program talks to it through `AudioPlayer`, which implements the
//! playlist's `PlaybackEngine` port.

mod player;
mod sink;
mod thread;
mod types;

pub use player::AudioPlayer;
pub use types::PlaybackInfo;
