use std::{
    env,
    path::{Path, PathBuf},
};

use super::schema::Settings;

/// Configuration loading helpers.
///
/// `Settings::load` reads an optional config file, then environment variables
/// (prefix `REEL__`), and falls back to struct defaults.
impl Settings {
    /// Load settings from an optional config file and the environment.
    ///
    /// `explicit` (from `--config`) wins over `REEL_CONFIG_PATH` and XDG defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path(explicit);

        let mut builder = ::config::Config::builder();

        // A path given on the command line must exist; the fallbacks are optional.
        if let Some(path) = &config_path {
            builder = builder
                .add_source(::config::File::from(path.as_path()).required(explicit.is_some()));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("REEL")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        if self.library.extensions.iter().all(|e| e.trim().is_empty()) {
            return Err("library.extensions must name at least one extension".to_string());
        }
        if self.ui.placeholder_cover.trim().is_empty() {
            return Err("ui.placeholder_cover must not be empty".to_string());
        }
        Ok(())
    }

    /// Render the effective settings as TOML.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/// Resolve the config path from `explicit`, `REEL_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(p) = explicit {
        return Some(p.to_path_buf());
    }
    if let Some(p) = env::var_os("REEL_CONFIG_PATH") {
        return Some(PathBuf::from(p));
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/reel/config.toml`
/// or `~/.config/reel/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    xdg_dir("XDG_CONFIG_HOME", ".config").map(|d| d.join("reel").join("config.toml"))
}

/// Compute the default log path under `$XDG_STATE_HOME/reel/reel.log`
/// or `~/.local/state/reel/reel.log`.
pub fn default_log_path() -> Option<PathBuf> {
    xdg_dir("XDG_STATE_HOME", ".local/state").map(|d| d.join("reel").join("reel.log"))
}

fn xdg_dir(var: &str, home_fallback: &str) -> Option<PathBuf> {
    if let Some(dir) = env::var_os(var) {
        Some(PathBuf::from(dir))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(home_fallback))
    }
}
