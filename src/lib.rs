//! # gem-engine
//!
//! A deterministic rules engine for a two-player gem-trading card game,
//! built for reinforcement-learning agents.
//!
//! ## Design Principles
//!
//! 1. **One action space**: every move is an index in `0..141`. The legal
//!    mask and the turn resolver read the same layout table, so a set mask
//!    bit always decodes to a move that applies cleanly.
//!
//! 2. **Explicit dependencies**: the card catalog is an `Arc<Catalog>`
//!    handed to each game, and every source of chance is a seeded
//!    `GameRng`. A seed plus a sequence of decisions replays a game exactly.
//!
//! 3. **Checked turn boundaries**: contract violations come back as
//!    `EngineError`; bank bounds, hand limits and gem conservation are
//!    asserted after every move.
//!
//! ## Modules
//!
//! - `core`: gems, seats, RNG, configuration, errors
//! - `cards`: card and noble definitions, the catalog, tier decks
//! - `codec`: the action-space layout, `Move` encode/decode, `LegalMask`
//! - `board`: gem bank, shop rows, noble row
//! - `player`: per-seat state, legal-mask generation, auto spend/take
//! - `rules`: `Game`, the turn resolver, manual moves
//! - `agents`: decision sources
//! - `nn`: observation encoding and policy networks
//! - `training`: the full-game driver
//!
//! ```
//! use std::sync::Arc;
//! use gem_engine::{Catalog, Game, GameConfig, Gems, PlayerId};
//!
//! let config = GameConfig::default().with_starting_player(PlayerId::new(0));
//! let mut game = Game::new(Arc::new(Catalog::standard()), config);
//!
//! // Index 0: take white, blue and green with no discards
//! game.apply_index(0).unwrap();
//! assert_eq!(game.player(PlayerId::new(0)).gems, Gems::colored([1, 1, 1, 0, 0]));
//! assert_eq!(game.board().gems, Gems::new([3, 3, 3, 4, 4, 5]));
//! ```

pub mod agents;
pub mod board;
pub mod cards;
pub mod codec;
pub mod core;
pub mod nn;
pub mod player;
pub mod rules;
pub mod training;

// Re-export commonly used types
pub use crate::core::{
    Color, EngineError, GameConfig, GameRng, Gems, PlayerId, COLORED, GOLD, SEATS,
};

pub use crate::cards::{Card, CardId, CardRef, Catalog, Noble, NobleId, NobleRef};

pub use crate::codec::{CardSource, LegalMask, Move, ReserveTarget, TakeKind, ACTION_DIM};

pub use crate::board::{Board, STARTING_BANK};

pub use crate::player::{Player, PlayerSummary, TakeResolution};

pub use crate::rules::{Game, GameResult, ManualMove, TurnOutcome};

pub use crate::agents::{Decision, DecisionSource, PolicyAgent, RandomAgent, ScriptedAgent};

pub use crate::nn::{EncodedState, GemEncoder, PolicyNetwork, StateEncoder, UniformPolicy, OBSERVATION_WIDTH};

pub use crate::training::{GameSummary, SelfPlayConfig, SelfPlayStats, SelfPlayWorker};
