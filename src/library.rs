//! Track construction from user-selected paths.
//!
//! Files are taken as given; directories are expanded into the audio files
//! they contain.

mod display;
mod expand;
mod model;

pub use display::{display_name, entry_label};
pub use expand::expand_paths;
pub use model::Track;
