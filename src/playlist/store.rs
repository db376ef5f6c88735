use crate::error::ConfigurationError;

use super::model::Track;

/// Immutable, non-empty playlist with wrap-around navigation.
#[derive(Debug, Clone)]
pub struct Playlist {
    tracks: Vec<Track>,
}

impl Playlist {
    /// An empty playlist is a configuration error: there is nothing to play.
    pub fn new(tracks: Vec<Track>) -> Result<Self, ConfigurationError> {
        if tracks.is_empty() {
            return Err(ConfigurationError::EmptyPlaylist);
        }
        Ok(Self { tracks })
    }

    /// # Panics
    /// If `index >= self.len()`.
    pub fn get(&self, index: usize) -> &Track {
        &self.tracks[index]
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn next(&self, index: usize) -> usize {
        (index + 1) % self.len()
    }

    pub fn previous(&self, index: usize) -> usize {
        (index + self.len() - 1) % self.len()
    }
}
