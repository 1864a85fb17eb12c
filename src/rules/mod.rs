//! Turn resolution.
//!
//! `Game` owns the board and both seats, tracks turn order, and applies
//! moves for the active player. Every move is checked against the active
//! player's legal mask before anything changes; after it resolves, bank
//! bounds, hand limits and gem conservation are asserted.
//!
//! - `game`: `Game`, `TurnOutcome`, `GameResult`
//! - `manual`: `ManualMove`, moves with explicit discard and spend vectors

pub mod game;
pub mod manual;

pub use game::{Game, GameResult, TurnOutcome};
pub use manual::ManualMove;
