use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/rondo/config.toml` or `~/.config/rondo/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `RONDO__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub playlist: PlaylistSettings,
    pub player: PlayerSettings,
    pub audio: AudioSettings,
    pub controls: ControlsSettings,
    pub ui: UiSettings,
    pub log: LogSettings,

    /// Directory of the config file the settings came from. Relative
    /// playlist paths resolve against it.
    #[serde(skip)]
    pub config_dir: Option<PathBuf>,
}

/// One playlist entry as written in configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TrackEntry {
    /// Display name.
    pub name: String,
    /// Audio file.
    #[serde(alias = "audio")]
    pub src: PathBuf,
    /// Still image shown while the track is current.
    #[serde(default, alias = "img", alias = "artwork")]
    pub art: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaylistSettings {
    /// Inline playlist. Wins over `file` and `dir` when non-empty.
    pub tracks: Vec<TrackEntry>,
    /// Standalone TOML playlist with `[[tracks]]` entries.
    pub file: Option<PathBuf>,
    /// Directory to scan when neither `tracks` nor `file` is given.
    pub dir: Option<PathBuf>,
    /// File extensions to treat as audio during a scan (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Whether the scan recurses into subdirectories.
    pub recursive: bool,
}

impl Default for PlaylistSettings {
    fn default() -> Self {
        Self {
            tracks: Vec::new(),
            file: None,
            dir: None,
            extensions: vec!["mp3".into(), "flac".into(), "wav".into(), "ogg".into()],
            recursive: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    /// Volume at startup, in `[0, 1]`.
    pub initial_volume: f32,
    /// Enable the mute toggle.
    pub mute_control: bool,
    /// Enable rewind / fast-forward by a fixed number of seconds.
    pub skip_control: bool,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            initial_volume: 0.5,
            mute_control: true,
            skip_control: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// How often the audio thread reports playback position (milliseconds).
    pub tick_ms: u64,
    /// Fade-out duration when quitting (milliseconds).
    /// Set to 0 to stop immediately.
    pub quit_fade_out_ms: u64,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            tick_ms: 250,
            quit_fade_out_ms: 300,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ControlsSettings {
    /// Seconds to rewind / fast-forward per key press.
    pub skip_seconds: u64,
    /// Volume change per key press.
    pub volume_step: f32,
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self {
            skip_seconds: 10,
            volume_step: 0.05,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,
    /// Whether the playlist cursor jumps to the current track after a track change.
    pub follow_playback: bool,
    /// Whether the now-playing panel lists the artwork file.
    pub show_artwork: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ round and round it goes ~ ".to_string(),
            follow_playback: true,
            show_artwork: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    pub enabled: bool,
    /// Log file. Defaults to `$XDG_STATE_HOME/rondo/rondo.log`.
    pub file: Option<PathBuf>,
    /// `tracing` filter directive; `RUST_LOG` takes precedence.
    pub level: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            file: None,
            level: "info".to_string(),
        }
    }
}
