//! Core types: players, run configuration, positions and their storage.

pub mod config;
pub mod player;
pub mod position;

pub use config::{BoardConfig, FallbackPolicy, SearchConfig};
pub use player::{PlayerId, PlayerMap};
pub use position::{Position, PositionStore};
