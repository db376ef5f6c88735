use std::{
    env,
    path::{Path, PathBuf},
};

use crate::error::ConfigurationError;

use super::schema::Settings;

/// Configuration loading helpers.
///
/// `Settings::load` reads an optional config file, then environment variables
/// (prefix `RONDO__`), and falls back to struct defaults.
impl Settings {
    /// Load settings. `explicit_path` (from the command line) must exist;
    /// the resolved default path is optional.
    pub fn load(explicit_path: Option<PathBuf>) -> Result<Self, ConfigurationError> {
        let required = explicit_path.is_some();
        let config_path = explicit_path.or_else(resolve_config_path);

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(required));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("RONDO")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let mut settings: Settings = cfg.try_deserialize()?;
        settings.config_dir = config_path
            .as_deref()
            .and_then(Path::parent)
            .map(Path::to_path_buf);
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if !(0.0..=1.0).contains(&self.player.initial_volume) {
            return Err(ConfigurationError::Invalid(
                "player.initial_volume must be within 0.0..=1.0".to_string(),
            ));
        }
        if self.audio.tick_ms == 0 {
            return Err(ConfigurationError::Invalid(
                "audio.tick_ms must be >= 1".to_string(),
            ));
        }
        if !(self.controls.volume_step > 0.0 && self.controls.volume_step <= 1.0) {
            return Err(ConfigurationError::Invalid(
                "controls.volume_step must be within (0.0, 1.0]".to_string(),
            ));
        }
        Ok(())
    }
}

/// Resolve the config path from `RONDO_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("RONDO_CONFIG_PATH") {
        return Some(PathBuf::from(p));
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/rondo/config.toml`
/// or `~/.config/rondo/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    xdg_dir("XDG_CONFIG_HOME", ".config").map(|d| d.join("rondo").join("config.toml"))
}

/// `$XDG_STATE_HOME/rondo/rondo.log` or `~/.local/state/rondo/rondo.log`.
pub fn default_log_path() -> Option<PathBuf> {
    xdg_dir("XDG_STATE_HOME", ".local/state").map(|d| d.join("rondo").join("rondo.log"))
}

fn xdg_dir(var: &str, home_fallback: &str) -> Option<PathBuf> {
    if let Some(xdg) = env::var_os(var) {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(home_fallback))
    }
}
