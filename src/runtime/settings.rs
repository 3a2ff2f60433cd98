use std::path::Path;

use tracing::warn;

use crate::config;
use crate::error::{Error, Result};

/// Load settings, falling back to defaults when the file is unreadable or
/// invalid. A file named with `--config` must load, so a typo in it stops
/// startup instead of silently running on defaults.
pub fn load_settings(explicit: Option<&Path>) -> Result<config::Settings> {
    match config::Settings::load(explicit) {
        Ok(s) => {
            if let Err(msg) = s.validate() {
                eprintln!("reel: invalid config, using defaults: {msg}");
                warn!(%msg, "invalid config, using defaults");
                Ok(config::Settings::default())
            } else {
                Ok(s)
            }
        }
        Err(e) if explicit.is_some() => Err(Error::from(e)),
        Err(e) => {
            let e = Error::from(e);
            eprintln!("reel: failed to load config, using defaults: {e}");
            warn!(error = %e, "failed to load config, using defaults");
            Ok(config::Settings::default())
        }
    }
}
