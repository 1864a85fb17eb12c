//! Discrete action-space codec.
//!
//! Maps a flat index in `0..ACTION_DIM` to a fully-determined move and back.
//! Both the legal-mask generator (`Player::legal_mask`) and the turn
//! resolver (`Game::apply_index`) go through `Move::encode`/`Move::decode`,
//! which read region offsets and enumeration order from `table` only.
//!
//! ## Modules
//!
//! - `table`: region widths, offsets and take enumeration order
//! - `moves`: `Move` and the encode/decode pair
//! - `mask`: `LegalMask`, the 141-bit legality vector

pub mod mask;
pub mod moves;
pub mod table;

pub use mask::LegalMask;
pub use moves::{CardSource, Move, ReserveTarget};
pub use table::{
    forced_discards, Region, TakeKind, ACTION_DIM, BACKUP_DISCARD, BUY_DIM, BUY_OFFSET,
    GEM_LIMIT, NOBLE_SLOTS, RESERVE_DIM, RESERVE_LIMIT, RESERVE_OFFSET, SHOP_SLOTS, TAKE_DIM,
    TIERS,
};
