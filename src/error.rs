//! Error types shared across the player.
//!
//! `ConfigurationError` is fatal and only produced at startup.
//! `PlaybackError` is reported by a playback bridge; the transport
//! controller records it and keeps running.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("playlist is empty: configure [[playlist.tracks]], playlist.file or playlist.dir")]
    EmptyPlaylist,

    #[error("failed to load settings: {0}")]
    Load(#[from] ::config::ConfigError),

    #[error("failed to read playlist file {path:?}: {source}")]
    PlaylistFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse playlist file {path:?}: {source}")]
    PlaylistParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid setting: {0}")]
    Invalid(String),
}

#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("no audio source loaded")]
    NoSource,

    #[error("failed to open {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to decode {path:?}: {reason}")]
    Decode { path: PathBuf, reason: String },

    #[error("seek failed: {0}")]
    Seek(String),

    #[error("audio output unavailable: {0}")]
    Output(String),

    #[error("audio thread is not running")]
    Disconnected,
}
