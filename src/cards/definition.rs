//! Card and noble definitions.
//!
//! Both are immutable once the catalog is built. Zones (decks, shop slots,
//! reserved lists, the noble row) hold `Arc` handles to the same value, so a
//! card moving from the shop to a player's reserve is a pointer move.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::core::{Color, Gems};

/// Points awarded by every noble.
pub const NOBLE_POINTS: u8 = 3;

/// Shared handle to an immutable card.
pub type CardRef = Arc<Card>;

/// Shared handle to an immutable noble.
pub type NobleRef = Arc<Noble>;

/// Unique card identifier across all tiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u16);

impl CardId {
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Unique noble identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NobleId(pub u8);

impl NobleId {
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for NobleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Noble({})", self.0)
    }
}

/// A purchasable development card.
///
/// ```
/// use gem_engine::cards::{Card, CardId};
/// use gem_engine::core::{Color, Gems};
///
/// let card = Card::new(CardId::new(0), 0, Color::Black, 0, Gems::colored([1, 1, 1, 1, 0]));
/// assert_eq!(card.cost.total(), 4);
/// assert_eq!(card.cost[Color::Gold], 0);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,

    /// 0, 1 or 2.
    pub tier: u8,

    /// Color of the permanent discount this card grants once owned.
    pub color: Color,

    pub points: u8,

    /// Colored cost; the gold slot is always zero.
    pub cost: Gems,
}

impl Card {
    #[must_use]
    pub fn new(id: CardId, tier: u8, color: Color, points: u8, cost: Gems) -> Self {
        Self {
            id,
            tier,
            color,
            points,
            cost,
        }
    }
}

/// A noble tile. Visits a player whose owned cards meet `requirement`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Noble {
    pub id: NobleId,
    pub points: u8,

    /// Owned-card counts per color; gold slot is always zero.
    pub requirement: Gems,
}

impl Noble {
    #[must_use]
    pub fn new(id: NobleId, requirement: Gems) -> Self {
        Self {
            id,
            points: NOBLE_POINTS,
            requirement,
        }
    }

    /// Whether owned-card counts satisfy this noble.
    #[must_use]
    pub fn is_satisfied_by(&self, owned_cards: &Gems) -> bool {
        owned_cards.covers(&self.requirement)
    }
}
