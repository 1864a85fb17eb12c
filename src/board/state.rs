//! Shared board state.

use std::sync::Arc;

use crate::cards::{CardRef, Catalog, Deck, NobleRef};
use crate::codec::table::{NOBLE_SLOTS, SHOP_SLOTS, TIERS};
use crate::core::{Gems, GameRng, GOLD};

/// Bank at the start of a two-player game: four of each color, five gold.
pub const STARTING_BANK: Gems = Gems::new([4, 4, 4, 4, 4, 5]);

/// Gem bank, three shop tiers backed by decks, and the noble row.
///
/// The board trusts its callers: gem deltas are applied without bounds
/// checks, since the legal mask guarantees them. Shop slots are refilled from
/// the tier deck as soon as a card leaves them.
#[derive(Clone, Debug)]
pub struct Board {
    pub gems: Gems,
    decks: [Deck; TIERS],
    shop: [[Option<CardRef>; SHOP_SLOTS]; TIERS],
    nobles: [Option<NobleRef>; NOBLE_SLOTS],
}

impl Board {
    /// Deal a fresh board: shuffle each tier, fill the shop, pick nobles.
    pub fn new(catalog: &Catalog, rng: &mut GameRng) -> Self {
        let decks = [
            Deck::new(catalog, 0, rng),
            Deck::new(catalog, 1, rng),
            Deck::new(catalog, 2, rng),
        ];

        let mut nobles: Vec<NobleRef> = catalog.nobles().to_vec();
        rng.shuffle(&mut nobles);

        Self::from_parts(STARTING_BANK, decks, nobles)
    }

    /// Board from explicit decks and nobles (first `NOBLE_SLOTS` are used).
    ///
    /// The shop is filled by drawing from each deck in slot order.
    pub fn from_parts(gems: Gems, mut decks: [Deck; TIERS], nobles: Vec<NobleRef>) -> Self {
        let shop = std::array::from_fn(|tier| {
            std::array::from_fn(|_| decks[tier].draw())
        });

        let mut row: [Option<NobleRef>; NOBLE_SLOTS] = Default::default();
        for (slot, noble) in row.iter_mut().zip(nobles) {
            *slot = Some(noble);
        }

        Self {
            gems,
            decks,
            shop,
            nobles: row,
        }
    }

    /// Remove `delta` from the bank.
    pub fn take_gems(&mut self, delta: Gems) {
        self.gems -= delta;
    }

    /// Add `delta` back to the bank.
    pub fn return_gems(&mut self, delta: Gems) {
        self.gems += delta;
    }

    /// Remove the card in a shop slot and refill the slot from the deck.
    pub fn take_card(&mut self, tier: usize, slot: usize) -> Option<CardRef> {
        let replacement = self.decks[tier].draw();
        std::mem::replace(&mut self.shop[tier][slot], replacement)
    }

    /// Take a shop card into a reservation, plus one gold if the bank has any.
    pub fn reserve(&mut self, tier: usize, slot: usize) -> (Option<CardRef>, Gems) {
        let gold = self.reservation_gold();
        (self.take_card(tier, slot), gold)
    }

    /// Reserve the top card of a tier's deck, plus one gold if the bank has any.
    pub fn reserve_from_deck(&mut self, tier: usize) -> (Option<CardRef>, Gems) {
        let gold = self.reservation_gold();
        (self.decks[tier].draw(), gold)
    }

    fn reservation_gold(&self) -> Gems {
        if self.gems[GOLD] > 0 {
            Gems::gold(1)
        } else {
            Gems::ZERO
        }
    }

    /// Card in a shop slot, if any.
    #[must_use]
    pub fn card(&self, tier: usize, slot: usize) -> Option<&CardRef> {
        self.shop[tier][slot].as_ref()
    }

    /// One tier's shop row.
    #[must_use]
    pub fn shop_row(&self, tier: usize) -> &[Option<CardRef>; SHOP_SLOTS] {
        &self.shop[tier]
    }

    /// All shop slots, tier-major.
    pub fn shop_cards(&self) -> impl Iterator<Item = Option<&CardRef>> + '_ {
        self.shop.iter().flat_map(|row| row.iter().map(Option::as_ref))
    }

    /// Cards left in a tier's deck.
    #[must_use]
    pub fn deck_len(&self, tier: usize) -> usize {
        self.decks[tier].len()
    }

    #[must_use]
    pub fn nobles(&self) -> &[Option<NobleRef>; NOBLE_SLOTS] {
        &self.nobles
    }

    /// Detach the noble in a row slot.
    pub fn remove_noble(&mut self, slot: usize) -> Option<NobleRef> {
        self.nobles[slot].take()
    }

    /// Whether `card` is currently face-up in the shop.
    #[must_use]
    pub fn in_shop(&self, card: &CardRef) -> bool {
        self.shop_cards().flatten().any(|c| Arc::ptr_eq(c, card))
    }
}
