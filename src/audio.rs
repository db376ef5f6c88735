//! The playback bridge: the audio capability the transport controller drives.
//!
//! `PlaybackBridge` is the seam. `RodioBridge` implements it on top of a
//! dedicated audio thread that owns the output stream and reports progress
//! back over a channel.

mod bridge;
mod rodio_bridge;
mod sink;
mod thread;
mod types;

pub use bridge::PlaybackBridge;
pub use rodio_bridge::RodioBridge;
pub use types::{BridgeEvent, BridgeEventKind, Generation};

#[cfg(test)]
pub mod fake;
