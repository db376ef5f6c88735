//! In-memory `PlaybackBridge` for tests.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::PlaybackError;

use super::bridge::PlaybackBridge;
use super::types::Generation;

#[derive(Debug)]
pub struct FakeBridge {
    pub source: Option<PathBuf>,
    pub loads: Vec<(PathBuf, Generation)>,
    pub playing: bool,
    pub position: Duration,
    pub duration: Option<Duration>,
    pub seeks: Vec<Duration>,
    pub volume: f32,
    pub muted: bool,
    pub fail_load: bool,
    pub fail_play: bool,
    pub fail_seek: bool,
}

impl Default for FakeBridge {
    fn default() -> Self {
        Self {
            source: None,
            loads: Vec::new(),
            playing: false,
            position: Duration::ZERO,
            duration: None,
            seeks: Vec::new(),
            volume: 1.0,
            muted: false,
            fail_load: false,
            fail_play: false,
            fail_seek: false,
        }
    }
}

impl FakeBridge {
    pub fn with_duration(secs: u64) -> Self {
        Self {
            duration: Some(Duration::from_secs(secs)),
            ..Self::default()
        }
    }
}

impl PlaybackBridge for FakeBridge {
    fn set_source(&mut self, source: &Path) {
        self.source = Some(source.to_path_buf());
    }

    fn load(&mut self, generation: Generation) -> Result<(), PlaybackError> {
        let path = self.source.clone().ok_or(PlaybackError::NoSource)?;
        self.playing = false;
        self.position = Duration::ZERO;
        if self.fail_load {
            return Err(PlaybackError::Decode {
                path,
                reason: "unsupported format".to_string(),
            });
        }
        self.loads.push((path, generation));
        Ok(())
    }

    fn play(&mut self) -> Result<(), PlaybackError> {
        if self.fail_play {
            return Err(PlaybackError::Output("device busy".to_string()));
        }
        self.playing = true;
        Ok(())
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn position(&self) -> Duration {
        self.position
    }

    fn duration(&self) -> Option<Duration> {
        self.duration
    }

    fn seek(&mut self, to: Duration) -> Result<(), PlaybackError> {
        if self.fail_seek {
            return Err(PlaybackError::Seek("source is not seekable".to_string()));
        }
        self.position = to;
        self.seeks.push(to);
        Ok(())
    }

    fn set_volume(&mut self, level: f32) {
        self.volume = level;
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }
}
