//! The card and noble catalog.
//!
//! A `Catalog` is built once and shared (`Arc<Catalog>`) by every game that
//! draws from it. Decks copy `Arc` handles out of it; nothing ever mutates it.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::definition::{Card, CardId, CardRef, Noble, NobleId, NobleRef};
use crate::codec::table::{NOBLE_SLOTS, TIERS};
use crate::core::{Color, EngineError, Gems, COLORED, GOLD};

/// Serialized form accepted by `Catalog::from_json`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CatalogData {
    pub cards: Vec<Card>,
    pub nobles: Vec<Noble>,
}

/// Read-only set of all cards (grouped by tier) and nobles.
///
/// ## Example
///
/// ```
/// use gem_engine::cards::{Catalog, CardId};
///
/// let catalog = Catalog::standard();
/// assert_eq!(catalog.tier(0).len(), 40);
/// assert_eq!(catalog.nobles().len(), 10);
/// assert!(catalog.card(CardId::new(0)).is_some());
/// ```
#[derive(Clone, Debug)]
pub struct Catalog {
    tiers: [Vec<CardRef>; TIERS],
    nobles: Vec<NobleRef>,
    by_id: FxHashMap<CardId, CardRef>,
}

impl Catalog {
    /// Build a catalog, validating every definition.
    pub fn new(cards: Vec<Card>, nobles: Vec<Noble>) -> Result<Self, EngineError> {
        let mut seen_nobles = Vec::with_capacity(nobles.len());

        for card in &cards {
            if usize::from(card.tier) >= TIERS {
                return Err(EngineError::InvalidCatalog(format!(
                    "{} has tier {}",
                    card.id, card.tier
                )));
            }
            if card.color.is_gold() {
                return Err(EngineError::InvalidCatalog(format!("{} produces gold", card.id)));
            }
            if card.cost[GOLD] != 0 || !card.cost.is_non_negative() {
                return Err(EngineError::InvalidCatalog(format!(
                    "{} has invalid cost {}",
                    card.id, card.cost
                )));
            }
        }

        for noble in &nobles {
            if noble.requirement[GOLD] != 0 || !noble.requirement.is_non_negative() {
                return Err(EngineError::InvalidCatalog(format!(
                    "{} has invalid requirement {}",
                    noble.id, noble.requirement
                )));
            }
            if seen_nobles.contains(&noble.id) {
                return Err(EngineError::InvalidCatalog(format!("duplicate {}", noble.id)));
            }
            seen_nobles.push(noble.id);
        }

        if nobles.len() < NOBLE_SLOTS {
            return Err(EngineError::InvalidCatalog(format!(
                "need at least {} nobles, got {}",
                NOBLE_SLOTS,
                nobles.len()
            )));
        }

        let catalog = Self::from_parts(cards, nobles);
        let total: usize = catalog.tiers.iter().map(Vec::len).sum();
        if catalog.by_id.len() != total {
            return Err(EngineError::InvalidCatalog("duplicate card id".to_string()));
        }

        Ok(catalog)
    }

    /// Parse and validate a JSON catalog.
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let data: CatalogData =
            serde_json::from_str(json).map_err(|e| EngineError::InvalidCatalog(e.to_string()))?;
        Self::new(data.cards, data.nobles)
    }

    /// The standard 90-card, 10-noble set.
    #[must_use]
    pub fn standard() -> Self {
        Self::from_parts(standard_cards(), standard_nobles())
    }

    fn from_parts(cards: Vec<Card>, nobles: Vec<Noble>) -> Self {
        let mut tiers: [Vec<CardRef>; TIERS] = Default::default();
        let mut by_id = FxHashMap::default();

        for card in cards {
            let card = Arc::new(card);
            by_id.insert(card.id, Arc::clone(&card));
            tiers[usize::from(card.tier)].push(card);
        }

        Self {
            tiers,
            nobles: nobles.into_iter().map(Arc::new).collect(),
            by_id,
        }
    }

    /// All cards of one tier, in catalog order.
    #[must_use]
    pub fn tier(&self, tier: usize) -> &[CardRef] {
        &self.tiers[tier]
    }

    #[must_use]
    pub fn nobles(&self) -> &[NobleRef] {
        &self.nobles
    }

    #[must_use]
    pub fn card(&self, id: CardId) -> Option<&CardRef> {
        self.by_id.get(&id)
    }

    #[must_use]
    pub fn noble(&self, id: NobleId) -> Option<&NobleRef> {
        self.nobles.iter().find(|n| n.id == id)
    }

    /// Total number of cards across tiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Export as serializable data.
    #[must_use]
    pub fn to_data(&self) -> CatalogData {
        CatalogData {
            cards: self
                .tiers
                .iter()
                .flatten()
                .map(|c| Card::clone(c))
                .collect(),
            nobles: self.nobles.iter().map(|n| Noble::clone(n)).collect(),
        }
    }
}

// Per-tier (points, cost) rows for a white card, cost written relative to the
// card's own color: slot j is the color `j` steps after it. Every other color
// uses the same rows rotated, which keeps the set symmetric.
const TIER_1: [(u8, [i8; COLORED]); 8] = [
    (0, [0, 1, 1, 1, 1]),
    (0, [0, 1, 2, 1, 1]),
    (0, [0, 2, 2, 0, 1]),
    (0, [3, 1, 0, 0, 1]),
    (0, [0, 0, 0, 2, 1]),
    (0, [0, 2, 0, 0, 2]),
    (0, [0, 3, 0, 0, 0]),
    (1, [0, 0, 4, 0, 0]),
];

const TIER_2: [(u8, [i8; COLORED]); 6] = [
    (1, [0, 0, 3, 2, 2]),
    (1, [2, 3, 0, 3, 0]),
    (2, [0, 0, 1, 4, 2]),
    (2, [0, 0, 0, 5, 0]),
    (2, [0, 0, 0, 5, 3]),
    (3, [6, 0, 0, 0, 0]),
];

const TIER_3: [(u8, [i8; COLORED]); 4] = [
    (3, [0, 3, 3, 5, 3]),
    (4, [0, 0, 0, 0, 7]),
    (4, [3, 0, 0, 3, 6]),
    (5, [3, 0, 0, 0, 7]),
];

const NOBLES: [[i8; COLORED]; 10] = [
    [4, 4, 0, 0, 0],
    [0, 4, 4, 0, 0],
    [0, 0, 4, 4, 0],
    [0, 0, 0, 4, 4],
    [4, 0, 0, 0, 4],
    [3, 3, 3, 0, 0],
    [0, 3, 3, 3, 0],
    [0, 0, 3, 3, 3],
    [3, 0, 0, 3, 3],
    [3, 3, 0, 0, 3],
];

fn standard_cards() -> Vec<Card> {
    let tiers: [&[(u8, [i8; COLORED])]; TIERS] = [&TIER_1, &TIER_2, &TIER_3];
    let mut cards = Vec::with_capacity(90);
    let mut next_id = 0u16;

    for (tier, rows) in tiers.iter().enumerate() {
        for color in Color::COLORED {
            for &(points, relative) in rows.iter() {
                let mut cost = Gems::ZERO;
                for (step, &amount) in relative.iter().enumerate() {
                    cost[(color.index() + step) % COLORED] = amount;
                }
                cards.push(Card::new(CardId::new(next_id), tier as u8, color, points, cost));
                next_id += 1;
            }
        }
    }

    cards
}

fn standard_nobles() -> Vec<Noble> {
    NOBLES
        .iter()
        .enumerate()
        .map(|(i, &req)| Noble::new(NobleId::new(i as u8), Gems::colored(req)))
        .collect()
}
