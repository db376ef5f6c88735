use tracing::info;

use crate::app::Capabilities;
use crate::config;
use crate::error::ConfigurationError;
use crate::playlist::{self, Playlist};

/// Resolve the playlist from settings. An empty result is fatal.
pub fn load_playlist(settings: &config::Settings) -> Result<Playlist, ConfigurationError> {
    let playlist = playlist::build_playlist(&settings.playlist, settings.config_dir.as_deref())?;
    info!(tracks = playlist.len(), "playlist ready");
    Ok(playlist)
}

/// Optional controls enabled by `[player]`.
pub fn capabilities(player: &config::PlayerSettings) -> Capabilities {
    Capabilities {
        mute: player.mute_control,
        skip: player.skip_control,
    }
}
