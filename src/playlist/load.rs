use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::config::{PlaylistSettings, TrackEntry};
use crate::error::ConfigurationError;

use super::model::Track;
use super::scan::scan;
use super::store::Playlist;

/// Contents of a standalone playlist file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PlaylistFile {
    #[serde(alias = "track")]
    tracks: Vec<TrackEntry>,
}

/// Build the playlist from settings.
///
/// Sources are tried in order: inline `tracks`, then `file`, then `dir`.
/// Relative paths resolve against `base_dir` (the config file's directory),
/// or against the playlist file's own directory for entries read from it.
pub fn build_playlist(
    settings: &PlaylistSettings,
    base_dir: Option<&Path>,
) -> Result<Playlist, ConfigurationError> {
    let tracks = if !settings.tracks.is_empty() {
        debug!(count = settings.tracks.len(), "using inline playlist");
        from_entries(&settings.tracks, base_dir)
    } else if let Some(file) = &settings.file {
        let path = resolve(file, base_dir);
        debug!(?path, "reading playlist file");
        read_playlist_file(&path)?
    } else if let Some(dir) = &settings.dir {
        let dir = resolve(dir, base_dir);
        debug!(?dir, "scanning playlist directory");
        scan(&dir, settings)
    } else {
        Vec::new()
    };

    Playlist::new(tracks)
}

fn read_playlist_file(path: &Path) -> Result<Vec<Track>, ConfigurationError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigurationError::PlaylistFile {
        path: path.to_path_buf(),
        source,
    })?;
    let file: PlaylistFile =
        toml::from_str(&text).map_err(|source| ConfigurationError::PlaylistParse {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(from_entries(&file.tracks, path.parent()))
}

fn from_entries(entries: &[TrackEntry], base_dir: Option<&Path>) -> Vec<Track> {
    entries
        .iter()
        .map(|e| Track {
            name: e.name.clone(),
            audio_source: resolve(&e.src, base_dir),
            artwork_source: e.art.as_deref().map(|a| resolve(a, base_dir)),
        })
        .collect()
}

fn resolve(path: &Path, base_dir: Option<&Path>) -> PathBuf {
    match base_dir {
        Some(base) if path.is_relative() => base.join(path),
        _ => path.to_path_buf(),
    }
}
