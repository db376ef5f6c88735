use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use crate::config::AudioSettings;
use crate::error::PlaybackError;

use super::bridge::PlaybackBridge;
use super::thread::spawn_audio_thread;
use super::types::{AudioCmd, BridgeEvent, Generation, PlaybackHandle, PlaybackInfo, Reply};

/// `PlaybackBridge` backed by `rodio` on a dedicated audio thread.
///
/// Requests that can fail (load, play, seek) wait for the audio thread's
/// answer; the rest are fire-and-forget.
pub struct RodioBridge {
    tx: Sender<AudioCmd>,
    playback: PlaybackHandle,
    source: Option<PathBuf>,
    join: Option<JoinHandle<()>>,
}

impl RodioBridge {
    pub fn new(events: Sender<BridgeEvent>, audio_settings: AudioSettings) -> Self {
        let (tx, rx) = mpsc::channel::<AudioCmd>();
        let playback_info: PlaybackHandle = Arc::new(Mutex::new(PlaybackInfo::default()));

        let audio_handle = spawn_audio_thread(rx, events, playback_info.clone(), audio_settings);

        Self {
            tx,
            playback: playback_info,
            source: None,
            join: Some(audio_handle),
        }
    }

    fn request(&self, cmd: impl FnOnce(Reply<()>) -> AudioCmd) -> Result<(), PlaybackError> {
        let (reply_tx, reply_rx) = mpsc::channel();
        self.tx
            .send(cmd(reply_tx))
            .map_err(|_| PlaybackError::Disconnected)?;
        reply_rx.recv().map_err(|_| PlaybackError::Disconnected)?
    }

    fn info(&self) -> PlaybackInfo {
        self.playback
            .lock()
            .map(|info| info.clone())
            .unwrap_or_default()
    }

    /// Fade out, stop the audio thread and wait for it to finish.
    pub fn quit_softly(&mut self, fade_out: Duration) {
        let _ = self.tx.send(AudioCmd::Quit {
            fade_out_ms: fade_out.as_millis() as u64,
        });

        if let Some(h) = self.join.take() {
            let _ = h.join();
        }
    }
}

impl PlaybackBridge for RodioBridge {
    fn set_source(&mut self, source: &Path) {
        self.source = Some(source.to_path_buf());
    }

    fn load(&mut self, generation: Generation) -> Result<(), PlaybackError> {
        let path = self.source.clone().ok_or(PlaybackError::NoSource)?;
        self.request(|reply| AudioCmd::Load {
            path,
            generation,
            reply,
        })
    }

    fn play(&mut self) -> Result<(), PlaybackError> {
        self.request(|reply| AudioCmd::Play { reply })
    }

    fn pause(&mut self) {
        let _ = self.tx.send(AudioCmd::Pause);
    }

    fn position(&self) -> Duration {
        self.info().position
    }

    fn duration(&self) -> Option<Duration> {
        self.info().duration
    }

    fn seek(&mut self, to: Duration) -> Result<(), PlaybackError> {
        self.request(|reply| AudioCmd::Seek { to, reply })
    }

    fn set_volume(&mut self, level: f32) {
        let _ = self.tx.send(AudioCmd::SetVolume(level));
    }

    fn set_muted(&mut self, muted: bool) {
        let _ = self.tx.send(AudioCmd::SetMuted(muted));
    }
}
