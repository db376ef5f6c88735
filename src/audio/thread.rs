use std::path::PathBuf;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::thread::JoinHandle;
use std::time::Duration;

use rodio::mixer::Mixer;
use rodio::{OutputStreamBuilder, Sink};
use tracing::{debug, warn};

use crate::config::AudioSettings;
use crate::error::PlaybackError;

use super::sink::open_sink_at;
use super::types::{AudioCmd, BridgeEvent, BridgeEventKind, Generation, PlaybackHandle};

/// The audio thread's view of the loaded source.
pub(super) struct Deck {
    sink: Option<Sink>,
    path: Option<PathBuf>,
    generation: Generation,
    duration: Option<Duration>,
    /// Added to the sink's own position after a rebuild-seek.
    offset: Duration,
    paused: bool,
    ended: bool,
    volume: f32,
    muted: bool,
}

impl Deck {
    pub(super) fn new() -> Self {
        Self {
            sink: None,
            path: None,
            generation: Generation::default(),
            duration: None,
            offset: Duration::ZERO,
            paused: true,
            ended: false,
            volume: 1.0,
            muted: false,
        }
    }

    pub(super) fn gain(&self) -> f32 {
        if self.muted { 0.0 } else { self.volume }
    }

    pub(super) fn generation(&self) -> Generation {
        self.generation
    }

    pub(super) fn duration(&self) -> Option<Duration> {
        self.duration
    }

    pub(super) fn position(&self) -> Duration {
        self.offset + self.sink.as_ref().map_or(Duration::ZERO, Sink::get_pos)
    }

    pub(super) fn load(
        &mut self,
        mixer: &Mixer,
        path: PathBuf,
        generation: Generation,
    ) -> Result<(), PlaybackError> {
        if let Some(old) = self.sink.take() {
            old.stop();
        }
        // Adopt the generation even on failure so nothing stale is reported.
        self.generation = generation;
        self.path = None;
        self.duration = None;
        self.offset = Duration::ZERO;
        self.paused = true;
        self.ended = false;

        let opened = open_sink_at(mixer, &path, Duration::ZERO)?;
        opened.sink.set_volume(self.gain());
        self.sink = Some(opened.sink);
        self.duration = opened.duration;
        self.path = Some(path);
        Ok(())
    }

    pub(super) fn play(&mut self) -> Result<(), PlaybackError> {
        let sink = self.sink.as_ref().ok_or(PlaybackError::NoSource)?;
        sink.play();
        self.paused = false;
        Ok(())
    }

    pub(super) fn pause(&mut self) {
        if let Some(sink) = self.sink.as_ref() {
            sink.pause();
        }
        self.paused = true;
    }

    fn seek(&mut self, mixer: &Mixer, to: Duration) -> Result<(), PlaybackError> {
        let to = self.duration.map_or(to, |d| to.min(d));
        let sink = self.sink.as_ref().ok_or(PlaybackError::NoSource)?;

        match sink.try_seek(to) {
            Ok(()) => {
                self.offset = Duration::ZERO;
                self.ended = false;
                Ok(())
            }
            Err(err) => {
                debug!(%err, "in-place seek unsupported, rebuilding sink");
                self.reopen_at(mixer, to)
            }
        }
    }

    /// Replace the sink with one that skips `to` into the file. The old sink
    /// keeps playing if the file can no longer be opened.
    pub(super) fn reopen_at(&mut self, mixer: &Mixer, to: Duration) -> Result<(), PlaybackError> {
        let path = self.path.clone().ok_or(PlaybackError::NoSource)?;
        let opened = open_sink_at(mixer, &path, to)
            .map_err(|err| PlaybackError::Seek(format!("cannot reopen at {to:?}: {err}")))?;
        opened.sink.set_volume(self.gain());
        if !self.paused {
            opened.sink.play();
        }
        if let Some(old) = self.sink.replace(opened.sink) {
            old.stop();
        }
        self.offset = to;
        self.ended = false;
        Ok(())
    }

    pub(super) fn set_volume(&mut self, level: f32) {
        self.volume = level.clamp(0.0, 1.0);
        self.apply_gain();
    }

    pub(super) fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        self.apply_gain();
    }

    fn apply_gain(&self) {
        if let Some(sink) = self.sink.as_ref() {
            sink.set_volume(self.gain());
        }
    }

    /// Periodic check: progress while playing, a single `Ended` once drained.
    pub(super) fn tick(&mut self) -> Option<BridgeEventKind> {
        let sink = self.sink.as_ref()?;
        if self.paused || self.ended {
            return None;
        }
        if sink.empty() {
            self.ended = true;
            return Some(BridgeEventKind::Ended);
        }
        Some(self.progress())
    }

    fn progress(&self) -> BridgeEventKind {
        BridgeEventKind::Progress {
            position: self.position(),
            duration: self.duration,
        }
    }

    fn fade_out(&self, fade_out_ms: u64) {
        let Some(sink) = self.sink.as_ref() else {
            return;
        };
        if fade_out_ms > 0 && !self.paused {
            let steps: u64 = 20;
            let step_ms = (fade_out_ms / steps).max(1);
            let start = self.gain();
            for step in 1..=steps {
                let t = step as f32 / steps as f32;
                sink.set_volume(start * (1.0 - t));
                thread::sleep(Duration::from_millis(step_ms));
            }
        }
        sink.stop();
    }
}

pub(super) fn spawn_audio_thread(
    rx: Receiver<AudioCmd>,
    events: Sender<BridgeEvent>,
    playback_info: PlaybackHandle,
    audio_settings: AudioSettings,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let stream = match OutputStreamBuilder::open_default_stream() {
            Ok(mut stream) => {
                // rodio logs to stderr when OutputStream is dropped; that would
                // scribble over the TUI.
                stream.log_on_drop(false);
                Ok(stream)
            }
            Err(err) => {
                let reason = err.to_string();
                warn!(%reason, "no audio output device");
                let _ = events.send(BridgeEvent {
                    generation: Generation::default(),
                    kind: BridgeEventKind::Failed(reason.clone()),
                });
                Err(reason)
            }
        };

        let mut deck = Deck::new();
        let tick = Duration::from_millis(audio_settings.tick_ms.max(1));
        debug!(?tick, "audio thread started");

        let publish = |deck: &Deck| {
            if let Ok(mut info) = playback_info.lock() {
                info.position = deck.position();
                info.duration = deck.duration();
            }
        };
        let emit = |deck: &Deck, kind: BridgeEventKind| {
            let _ = events.send(BridgeEvent {
                generation: deck.generation(),
                kind,
            });
        };

        loop {
            match rx.recv_timeout(tick) {
                Ok(cmd) => match cmd {
                    AudioCmd::Load {
                        path,
                        generation,
                        reply,
                    } => {
                        let result = match stream.as_ref() {
                            Ok(stream) => deck.load(stream.mixer(), path, generation),
                            Err(reason) => Err(PlaybackError::Output(reason.clone())),
                        };
                        publish(&deck);
                        let _ = reply.send(result);
                    }
                    AudioCmd::Play { reply } => {
                        let _ = reply.send(deck.play());
                    }
                    AudioCmd::Pause => {
                        deck.pause();
                        publish(&deck);
                    }
                    AudioCmd::Seek { to, reply } => {
                        let result = match stream.as_ref() {
                            Ok(stream) => deck.seek(stream.mixer(), to),
                            Err(reason) => Err(PlaybackError::Output(reason.clone())),
                        };
                        publish(&deck);
                        if result.is_ok() {
                            emit(&deck, deck.progress());
                        }
                        let _ = reply.send(result);
                    }
                    AudioCmd::SetVolume(level) => deck.set_volume(level),
                    AudioCmd::SetMuted(muted) => deck.set_muted(muted),
                    AudioCmd::Quit { fade_out_ms } => {
                        deck.fade_out(fade_out_ms);
                        debug!("audio thread quitting");
                        break;
                    }
                },
                Err(RecvTimeoutError::Timeout) => {
                    if let Some(kind) = deck.tick() {
                        publish(&deck);
                        emit(&deck, kind);
                    }
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    })
}
