//! Per-seat player state, legal-mask generation and automatic resolvers.
//!
//! - `state`: `Player` and its lookahead copy
//! - `payment`: `auto_spend`, `auto_take`, affordability
//! - `legal`: `Player::legal_mask`

mod legal;
mod payment;
mod state;

pub use payment::TakeResolution;
pub use state::{Player, PlayerSummary};
