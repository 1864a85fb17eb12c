//! Per-seat player state.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::sync::Arc;

use crate::cards::{Card, CardId, CardRef, Noble, NobleId};
use crate::codec::table::RESERVE_LIMIT;
use crate::core::{Gems, PlayerId, COLORED};

/// Held gems, owned cards, reservations and score for one seat.
///
/// `cards` counts owned cards per color and doubles as a permanent discount;
/// its gold slot is always zero. Only the turn resolver mutates reservations
/// and ownership.
#[derive(Clone, Debug)]
pub struct Player {
    pub id: PlayerId,
    pub gems: Gems,
    pub cards: Gems,
    pub reserved: SmallVec<[CardRef; RESERVE_LIMIT]>,
    pub card_ids: [Vec<CardId>; COLORED],
    pub noble_ids: SmallVec<[NobleId; 3]>,
    pub points: u8,
    pub victor: bool,
}

/// Plain-data view of a player for reporting.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub id: PlayerId,
    pub gems: Gems,
    pub cards: Gems,
    pub reserved: Vec<CardId>,
    pub nobles: Vec<NobleId>,
    pub points: u8,
    pub victor: bool,
}

impl Player {
    #[must_use]
    pub fn new(id: PlayerId) -> Self {
        Self {
            id,
            gems: Gems::ZERO,
            cards: Gems::ZERO,
            reserved: SmallVec::new(),
            card_ids: Default::default(),
            noble_ids: SmallVec::new(),
            points: 0,
            victor: false,
        }
    }

    /// Clear everything for a new game, keeping the seat.
    pub fn reset(&mut self) {
        *self = Self::new(self.id);
    }

    /// Copy for lookahead: numeric state is duplicated, card handles are shared.
    #[must_use]
    pub fn lookahead_copy(&self) -> Self {
        Self {
            id: self.id,
            gems: self.gems,
            cards: self.cards,
            reserved: self.reserved.iter().map(Arc::clone).collect(),
            card_ids: self.card_ids.clone(),
            noble_ids: self.noble_ids.clone(),
            points: self.points,
            victor: self.victor,
        }
    }

    /// Held gems plus owned-card discounts.
    #[must_use]
    pub fn effective_gems(&self) -> Gems {
        self.gems + self.cards
    }

    /// Credit a purchased card. Payment is handled separately.
    pub fn receive_card(&mut self, card: &Card) {
        self.cards[card.color] += 1;
        self.points += card.points;
        self.card_ids[card.color.index()].push(card.id);
    }

    /// Credit a noble visit.
    pub fn receive_noble(&mut self, noble: &Noble) {
        self.points += noble.points;
        self.noble_ids.push(noble.id);
    }

    /// Total owned cards.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.card_ids.iter().map(Vec::len).sum()
    }

    #[must_use]
    pub fn summary(&self) -> PlayerSummary {
        PlayerSummary {
            id: self.id,
            gems: self.gems,
            cards: self.cards,
            reserved: self.reserved.iter().map(|c| c.id).collect(),
            nobles: self.noble_ids.to_vec(),
            points: self.points,
            victor: self.victor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Catalog;
    use crate::core::Color;

    #[test]
    fn test_new_player_is_empty() {
        let player = Player::new(PlayerId::new(1));
        assert_eq!(player.id, PlayerId::new(1));
        assert_eq!(player.gems, Gems::ZERO);
        assert_eq!(player.effective_gems(), Gems::ZERO);
        assert_eq!(player.card_count(), 0);
        assert!(!player.victor);
    }

    #[test]
    fn test_receive_card_updates_counts_and_points() {
        let catalog = Catalog::standard();
        let card = catalog
            .tier(1)
            .iter()
            .find(|c| c.color == Color::Green && c.points == 3)
            .unwrap();

        let mut player = Player::new(PlayerId::new(0));
        player.gems = Gems::new([1, 0, 0, 0, 0, 1]);
        player.receive_card(card);

        assert_eq!(player.cards[Color::Green], 1);
        assert_eq!(player.points, 3);
        assert_eq!(player.card_ids[Color::Green.index()], vec![card.id]);
        assert_eq!(player.effective_gems(), Gems::new([1, 0, 1, 0, 0, 1]));
    }

    #[test]
    fn test_receive_noble() {
        let catalog = Catalog::standard();
        let noble = &catalog.nobles()[0];
        let mut player = Player::new(PlayerId::new(0));

        player.receive_noble(noble);
        assert_eq!(player.points, 3);
        assert_eq!(player.noble_ids.as_slice(), &[noble.id]);
    }

    #[test]
    fn test_lookahead_copy_is_independent_but_shares_cards() {
        let catalog = Catalog::standard();
        let mut player = Player::new(PlayerId::new(0));
        player.gems = Gems::new([2, 1, 0, 0, 0, 1]);
        player.reserved.push(Arc::clone(&catalog.tier(0)[0]));

        let mut copy = player.lookahead_copy();
        copy.gems[Color::White] = 0;
        copy.points = 9;

        assert_eq!(player.gems[Color::White], 2);
        assert_eq!(player.points, 0);
        assert!(Arc::ptr_eq(&copy.reserved[0], &player.reserved[0]));
    }

    #[test]
    fn test_reset_keeps_seat() {
        let mut player = Player::new(PlayerId::new(1));
        player.points = 12;
        player.gems = Gems::gold(2);
        player.reset();

        assert_eq!(player.id, PlayerId::new(1));
        assert_eq!(player.points, 0);
        assert_eq!(player.gems, Gems::ZERO);
    }

    #[test]
    fn test_summary_serializes() {
        let player = Player::new(PlayerId::new(0));
        let json = serde_json::to_string(&player.summary()).unwrap();
        let back: PlayerSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(back, player.summary());
    }
}
