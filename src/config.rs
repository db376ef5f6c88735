//! Configuration loader and schema types.
//!
//! The playlist itself is configuration: it is read once at startup and
//! never changes while the player runs.

mod load;
mod schema;

pub use load::default_log_path;
pub use schema::*;

#[cfg(test)]
mod tests;
