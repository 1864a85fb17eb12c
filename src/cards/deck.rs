//! Per-tier draw piles.

use super::catalog::Catalog;
use super::definition::CardRef;
use crate::core::GameRng;

/// Shuffled draw pile for one tier. Cards are drawn from the tail.
#[derive(Clone, Debug)]
pub struct Deck {
    tier: usize,
    cards: Vec<CardRef>,
}

impl Deck {
    /// Fresh shuffled deck holding every catalog card of `tier`.
    pub fn new(catalog: &Catalog, tier: usize, rng: &mut GameRng) -> Self {
        let mut cards = catalog.tier(tier).to_vec();
        rng.shuffle(&mut cards);
        Self { tier, cards }
    }

    /// Deck with a fixed order; the last card is drawn first.
    pub fn from_cards(tier: usize, cards: Vec<CardRef>) -> Self {
        Self { tier, cards }
    }

    /// Draw the top card, `None` once exhausted.
    pub fn draw(&mut self) -> Option<CardRef> {
        self.cards.pop()
    }

    #[must_use]
    pub fn tier(&self) -> usize {
        self.tier
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_deck_holds_whole_tier() {
        let catalog = Catalog::standard();
        let mut rng = GameRng::new(1);
        let deck = Deck::new(&catalog, 1, &mut rng);

        assert_eq!(deck.tier(), 1);
        assert_eq!(deck.len(), 30);
    }

    #[test]
    fn test_draw_until_empty() {
        let catalog = Catalog::standard();
        let mut rng = GameRng::new(1);
        let mut deck = Deck::new(&catalog, 2, &mut rng);

        let mut drawn = 0;
        while let Some(card) = deck.draw() {
            assert_eq!(card.tier, 2);
            drawn += 1;
        }
        assert_eq!(drawn, 20);
        assert!(deck.is_empty());
        assert!(deck.draw().is_none());
    }

    #[test]
    fn test_shuffle_depends_on_seed() {
        let catalog = Catalog::standard();
        let order = |seed| {
            let mut deck = Deck::new(&catalog, 0, &mut GameRng::new(seed));
            std::iter::from_fn(|| deck.draw()).map(|c| c.id).collect::<Vec<_>>()
        };

        assert_eq!(order(5), order(5));
        assert_ne!(order(5), order(6));
    }

    #[test]
    fn test_cards_are_shared_with_catalog() {
        let catalog = Catalog::standard();
        let mut deck = Deck::new(&catalog, 0, &mut GameRng::new(3));
        let card = deck.draw().unwrap();
        assert!(Arc::ptr_eq(&card, catalog.card(card.id).unwrap()));
    }

    #[test]
    fn test_from_cards_draws_tail_first() {
        let catalog = Catalog::standard();
        let cards = catalog.tier(0)[..3].to_vec();
        let mut deck = Deck::from_cards(0, cards.clone());

        assert_eq!(deck.draw().unwrap().id, cards[2].id);
        assert_eq!(deck.len(), 2);
    }
}
