use std::path::Path;
use std::time::Duration;

use crate::error::PlaybackError;

use super::types::Generation;

/// The audio decode/output capability.
///
/// Progress and end-of-track notifications are delivered out of band as
/// [`BridgeEvent`](super::BridgeEvent)s tagged with the generation passed
/// to the most recent [`load`](PlaybackBridge::load).
pub trait PlaybackBridge {
    /// Point the bridge at a new audio source. Takes effect on the next `load`.
    fn set_source(&mut self, source: &Path);

    /// Load the current source, positioned at zero and paused. Any previously
    /// loaded source stops and emits nothing further.
    fn load(&mut self, generation: Generation) -> Result<(), PlaybackError>;

    fn play(&mut self) -> Result<(), PlaybackError>;

    fn pause(&mut self);

    fn position(&self) -> Duration;

    /// Total length of the loaded source, `None` until known.
    fn duration(&self) -> Option<Duration>;

    fn seek(&mut self, to: Duration) -> Result<(), PlaybackError>;

    /// Output level in `[0, 1]`. Independent of the muted flag.
    fn set_volume(&mut self, level: f32);

    fn set_muted(&mut self, muted: bool);
}
