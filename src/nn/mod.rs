//! Network integration: observation encoding and policy networks.
//!
//! - **Encoding**: `StateEncoder` trait and `GemEncoder`, the fixed
//!   251-wide observation
//! - **Policy**: `PolicyNetwork`, `mask_policy`, and `UniformPolicy` as a
//!   baseline
//!
//! ```
//! use std::sync::Arc;
//! use gem_engine::cards::Catalog;
//! use gem_engine::core::GameConfig;
//! use gem_engine::nn::{GemEncoder, StateEncoder, OBSERVATION_WIDTH};
//! use gem_engine::rules::Game;
//!
//! let game = Game::new(Arc::new(Catalog::standard()), GameConfig::default());
//! let encoded = GemEncoder.encode(&game, game.active_id());
//! assert_eq!(encoded.len(), OBSERVATION_WIDTH);
//! ```

pub mod encoder;
pub mod traits;

pub use encoder::{
    GemEncoder, StateEncoder, BOARD_WIDTH, CARD_WIDTH, NOBLE_WIDTH, OBSERVATION_WIDTH,
    PLAYER_WIDTH,
};
pub use traits::{mask_policy, EncodedState, PolicyNetwork, UniformPolicy};
