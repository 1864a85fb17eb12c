//! Card system: definitions, the shared catalog, and per-tier decks.
//!
//! ## Key Types
//!
//! - `Card` / `Noble`: immutable definitions handed around as `Arc`s
//! - `Catalog`: every card and noble, built once per process
//! - `Deck`: a shuffled per-game draw pile for one tier

pub mod catalog;
pub mod deck;
pub mod definition;

pub use catalog::{Catalog, CatalogData};
pub use deck::Deck;
pub use definition::{Card, CardId, CardRef, Noble, NobleId, NobleRef, NOBLE_POINTS};
