use std::time::Duration;

use tracing::{debug, info, warn};

use crate::audio::{BridgeEvent, BridgeEventKind, Generation, PlaybackBridge};
use crate::error::PlaybackError;
use crate::playlist::{Playlist, Track};

use super::state::PlayerState;

/// Optional transport controls, selected by configuration.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Capabilities {
    /// Mute toggle.
    pub mute: bool,
    /// Rewind / fast-forward by a number of seconds.
    pub skip: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            mute: true,
            skip: true,
        }
    }
}

/// Drives the playback bridge and owns the player state.
///
/// Every load bumps a generation counter; bridge notifications from an
/// older generation are dropped, so a late progress tick or end-of-track
/// from a previous source can never touch the current one.
///
/// Bridge failures never propagate: they land in
/// [`PlayerState::last_error`] and the log.
pub struct TransportController<B> {
    playlist: Playlist,
    state: PlayerState,
    bridge: B,
    generation: Generation,
    capabilities: Capabilities,
}

impl<B: PlaybackBridge> TransportController<B> {
    /// Cue the first track (loaded, not playing) at `initial_volume`.
    pub fn new(
        playlist: Playlist,
        bridge: B,
        capabilities: Capabilities,
        initial_volume: f32,
    ) -> Self {
        let mut controller = Self {
            playlist,
            state: PlayerState::new(initial_volume),
            bridge,
            generation: Generation::default(),
            capabilities,
        };
        controller.bridge.set_volume(controller.state.volume);
        controller.bridge.set_muted(false);
        controller.cue(0);
        controller
    }

    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    #[cfg(test)]
    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn current_track(&self) -> &Track {
        self.playlist.get(self.state.current_index)
    }

    #[cfg(test)]
    pub fn bridge(&self) -> &B {
        &self.bridge
    }

    pub fn bridge_mut(&mut self) -> &mut B {
        &mut self.bridge
    }

    /// Load `index` from position zero and start playing it. Selecting the
    /// current track restarts it.
    pub fn load_track(&mut self, index: usize) {
        if self.cue(index) {
            self.play();
        }
    }

    /// Load without playing. Returns whether the bridge accepted the source.
    fn cue(&mut self, index: usize) -> bool {
        if index >= self.playlist.len() {
            warn!(index, len = self.playlist.len(), "track index out of range");
            return false;
        }

        self.generation = self.generation.next();
        self.state.current_index = index;
        self.state.is_playing = false;
        self.state.reset_progress();

        let track = self.playlist.get(index);
        info!(index, name = %track.name, generation = %self.generation, "loading track");
        self.bridge.set_source(&track.audio_source);
        match self.bridge.load(self.generation) {
            Ok(()) => {
                self.state.last_error = None;
                true
            }
            Err(err) => {
                self.report(err);
                false
            }
        }
    }

    pub fn play(&mut self) {
        match self.bridge.play() {
            Ok(()) => self.state.is_playing = true,
            Err(err) => {
                self.state.is_playing = false;
                self.report(err);
            }
        }
    }

    pub fn pause(&mut self) {
        self.bridge.pause();
        self.state.is_playing = false;
    }

    pub fn toggle_play(&mut self) {
        if self.state.is_playing {
            self.pause();
        } else {
            self.play();
        }
    }

    pub fn next(&mut self) {
        let index = self.playlist.next(self.state.current_index);
        self.load_track(index);
    }

    pub fn previous(&mut self) {
        let index = self.playlist.previous(self.state.current_index);
        self.load_track(index);
    }

    /// End of the current source: advance, wrapping to the first track.
    pub fn on_track_ended(&mut self, generation: Generation) {
        if self.is_current(generation) {
            self.next();
        }
    }

    /// Jump to `percent` of the track. Ignored while the duration is unknown.
    pub fn seek(&mut self, percent: f64) {
        if percent.is_nan() {
            return;
        }
        let percent = percent.clamp(0.0, 100.0);
        let Some(duration) = self.known_duration() else {
            debug!(percent, "seek ignored: duration unknown");
            return;
        };

        match self.bridge.seek(duration.mul_f64(percent / 100.0)) {
            // Shown right away; the next progress tick confirms it.
            Ok(()) => self.state.progress_percent = percent,
            Err(err) => self.report(err),
        }
    }

    /// Move the playback position by `delta_seconds`, clamped to the track.
    pub fn skip_by(&mut self, delta_seconds: f64) {
        if !self.capabilities.skip {
            debug!("skip control disabled");
            return;
        }
        if !delta_seconds.is_finite() {
            return;
        }
        let Some(duration) = self.known_duration() else {
            debug!(delta_seconds, "skip ignored: duration unknown");
            return;
        };

        let target = (self.bridge.position().as_secs_f64() + delta_seconds)
            .clamp(0.0, duration.as_secs_f64());
        if let Err(err) = self.bridge.seek(Duration::from_secs_f64(target)) {
            self.report(err);
        }
    }

    /// Set the output level. A positive level lifts mute.
    pub fn set_volume(&mut self, level: f32) {
        if level.is_nan() {
            return;
        }
        let level = level.clamp(0.0, 1.0);
        self.bridge.set_volume(level);
        self.state.volume = level;

        if level > 0.0 && self.state.is_muted {
            self.bridge.set_muted(false);
            self.state.is_muted = false;
        }
    }

    /// `set_volume(volume + delta)`, rounded to whole percent.
    pub fn nudge_volume(&mut self, delta: f32) {
        let level = ((self.state.volume + delta) * 100.0).round() / 100.0;
        self.set_volume(level);
    }

    pub fn toggle_mute(&mut self) {
        if !self.capabilities.mute {
            debug!("mute control disabled");
            return;
        }
        let muted = !self.state.is_muted;
        self.bridge.set_muted(muted);
        self.state.is_muted = muted;
    }

    /// Position report from the bridge.
    pub fn on_progress(
        &mut self,
        generation: Generation,
        position: Duration,
        duration: Option<Duration>,
    ) {
        if !self.is_current(generation) {
            return;
        }
        // Metadata not loaded yet.
        let Some(duration) = duration.filter(|d| !d.is_zero()) else {
            return;
        };
        self.state.apply_progress(position, duration);
    }

    pub fn handle_event(&mut self, event: BridgeEvent) {
        match event.kind {
            BridgeEventKind::Progress { position, duration } => {
                self.on_progress(event.generation, position, duration)
            }
            BridgeEventKind::Ended => self.on_track_ended(event.generation),
            BridgeEventKind::Failed(reason) => {
                if self.is_current(event.generation) {
                    self.state.is_playing = false;
                    self.report(PlaybackError::Output(reason));
                }
            }
        }
    }

    fn is_current(&self, generation: Generation) -> bool {
        if generation != self.generation {
            debug!(stale = %generation, current = %self.generation, "dropping stale notification");
            return false;
        }
        true
    }

    fn known_duration(&self) -> Option<Duration> {
        self.bridge.duration().filter(|d| !d.is_zero())
    }

    fn report(&mut self, err: PlaybackError) {
        warn!(error = %err, index = self.state.current_index, "playback error");
        self.state.last_error = Some(err.to_string());
    }
}
