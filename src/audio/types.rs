//! Audio-related small types and handles.
//!
//! This module defines the load generation, the notifications the audio
//! thread emits, the commands it accepts and the playback info it shares.

use std::fmt;
use std::path::PathBuf;
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::error::PlaybackError;

/// Load generation. Bumped on every track load; notifications carry the
/// generation that was current when they were issued.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BridgeEvent {
    pub generation: Generation,
    pub kind: BridgeEventKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BridgeEventKind {
    /// Playback position moved. Sent on every tick while playing and after a seek.
    Progress {
        position: Duration,
        duration: Option<Duration>,
    },
    /// The loaded source played to its end. Sent once per load.
    Ended,
    /// Playback failed outside of any request, e.g. no output device.
    Failed(String),
}

pub(super) type Reply<T> = Sender<Result<T, PlaybackError>>;

#[derive(Debug)]
pub(super) enum AudioCmd {
    /// Replace the current sink with a paused one for `path`.
    Load {
        path: PathBuf,
        generation: Generation,
        reply: Reply<()>,
    },
    /// Start or resume the current sink.
    Play { reply: Reply<()> },
    /// Pause the current sink.
    Pause,
    /// Jump to an absolute position in the current source.
    Seek { to: Duration, reply: Reply<()> },
    /// Set the stored output level.
    SetVolume(f32),
    /// Silence or restore output without touching the stored level.
    SetMuted(bool),
    /// Quit the audio thread, fading out over `fade_out_ms` milliseconds.
    Quit { fade_out_ms: u64 },
}

/// Playback information published by the audio thread.
#[derive(Debug, Clone, Default)]
pub(super) struct PlaybackInfo {
    pub position: Duration,
    pub duration: Option<Duration>,
}

pub(super) type PlaybackHandle = Arc<Mutex<PlaybackInfo>>;
