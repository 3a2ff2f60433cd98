use std::fs::{self, OpenOptions};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::{LoggingSettings, default_log_path};
use crate::error::Result;

/// Route `tracing` output to the log file. The terminal belongs to the UI, so
/// nothing is written to stdout or stderr.
///
/// `REEL_LOG` takes precedence over `logging.level`.
pub fn init_logging(settings: &LoggingSettings) -> Result<()> {
    let Some(path) = settings.file.clone().or_else(default_log_path) else {
        return Ok(());
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    let filter = EnvFilter::try_from_env("REEL_LOG")
        .unwrap_or_else(|_| EnvFilter::new(settings.level.as_str()));

    // A subscriber may already be installed (tests); keep the existing one.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
    Ok(())
}
