//! Application module: exposes the display model used by the TUI and runtime.
//!
//! The `App` model lives in `app::model` and holds what the screen shows,
//! plus the list cursor and input prompt.

mod model;

pub use model::*;
