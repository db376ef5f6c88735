use std::path::PathBuf;

use crate::config;

/// Load and validate settings, falling back to defaults on failure.
///
/// The second value is a warning to surface once logging is up.
pub fn load_settings(cli_path: Option<PathBuf>) -> (config::Settings, Option<String>) {
    match config::Settings::load(cli_path) {
        Ok(s) => {
            if let Err(msg) = s.validate() {
                let warning = format!("invalid config, using defaults: {msg}");
                eprintln!("rondo: {warning}");
                (config::Settings::default(), Some(warning))
            } else {
                (s, None)
            }
        }
        Err(e) => {
            let warning = format!("failed to load config, using defaults: {e}");
            eprintln!("rondo: {warning}");
            (config::Settings::default(), Some(warning))
        }
    }
}
