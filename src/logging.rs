//! File logging.
//!
//! The terminal belongs to the UI, so log records go to a file.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{LogSettings, default_log_path};

/// Install the global `tracing` subscriber writing to the configured file.
///
/// Returns the log file path, or `None` when logging is disabled or no
/// path could be resolved. `RUST_LOG` overrides `log.level`.
pub fn init(settings: &LogSettings) -> io::Result<Option<PathBuf>> {
    if !settings.enabled {
        return Ok(None);
    }
    let Some(path) = settings.file.clone().or_else(default_log_path) else {
        return Ok(None);
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.level));

    // A subscriber may already be installed (tests); keep it.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .try_init();

    Ok(Some(path))
}
