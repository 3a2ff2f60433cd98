//! Error type shared by the playlist controller, audio engine and runtime.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// A playlist position outside `0..len` was requested.
    #[error("track index {index} out of bounds (playlist has {len} tracks)")]
    IndexOutOfBounds { index: usize, len: usize },

    /// The audio thread has gone away; commands can no longer be delivered.
    #[error("audio thread is not running")]
    AudioDisconnected,

    #[error("no audio output device: {0}")]
    NoAudioDevice(String),

    #[error("failed to open audio file: {0}")]
    Open(#[source] std::io::Error),

    #[error("failed to decode audio file: {0}")]
    Decode(#[from] rodio::decoder::DecoderError),

    #[error("configuration error: {0}")]
    Config(#[from] ::config::ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
