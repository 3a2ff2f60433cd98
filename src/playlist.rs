//! Playlist controller: the ordered track list, the current index, and the
//! rules that keep the playback engine and the display consistent with them.
//!
//! The engine and the display are reached only through the traits in
//! `ports`, so the controller runs unchanged against `rodio` and `ratatui` or
//! against test doubles.

mod controller;
mod ports;

pub use controller::*;
pub use ports::{PlaybackEngine, PlayerView};

#[cfg(test)]
mod tests;
