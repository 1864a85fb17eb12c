//! The shared board: gem bank, shop tiers and the noble row.

mod state;

pub use state::{Board, STARTING_BANK};
