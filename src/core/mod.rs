//! Core engine types: gems, seats, RNG, configuration, errors.
//!
//! Everything above this module (catalog, board, players, codec, resolver)
//! is built from these value types.

pub mod config;
pub mod error;
pub mod gem;
pub mod player;
pub mod rng;

pub use config::{GameConfig, DEFAULT_POINTS_TO_WIN};
pub use error::EngineError;
pub use gem::{Color, Gems, COLORED, GEM_SLOTS, GOLD};
pub use player::{PlayerId, SEATS};
pub use rng::GameRng;
