//! Application module: player state, the transport controller and the
//! UI-facing `App` model.
//!
//! `TransportController` is the only thing that mutates `PlayerState` or
//! talks to the playback bridge. `App` adds the playlist cursor on top.

mod controller;
mod model;
mod state;
mod time;

pub use controller::{Capabilities, TransportController};
pub use model::App;
