//! The playlist: a fixed, ordered list of tracks built once from
//! configuration.

mod load;
mod model;
mod scan;
mod store;

pub use load::build_playlist;
pub use model::Track;
pub use store::Playlist;

#[cfg(test)]
mod tests;
