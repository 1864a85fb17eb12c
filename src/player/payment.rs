//! Automatic payment and discard resolution.
//!
//! Index moves carry no spend or discard vectors, so these resolvers fill
//! them in. Both trust the legal mask: `auto_spend` does not re-check
//! affordability and `auto_take` does not re-check the bank.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::state::Player;
use crate::cards::Card;
use crate::codec::table::GEM_LIMIT;
use crate::core::{GameRng, Gems, COLORED, GOLD};

/// Outcome of `auto_take`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TakeResolution {
    /// Requested gems minus discards; what the bank must give up.
    pub net: Gems,
    /// Gems the player had to put back.
    pub discarded: Gems,
}

impl TakeResolution {
    #[must_use]
    pub fn discard_count(&self) -> usize {
        self.discarded.total() as usize
    }
}

impl Player {
    /// Affordability of `card` as `(without gold, with gold)`.
    #[must_use]
    pub fn can_afford(&self, card: &Card) -> (bool, bool) {
        let gold_needed = card.cost.shortfall(&self.effective_gems()).total();
        (gold_needed == 0, gold_needed <= i32::from(self.gems[GOLD]))
    }

    /// Whether buying `card` offers a real choice about spending gold.
    ///
    /// False when the card is free after discounts, or when the player's gold
    /// is all needed anyway.
    #[must_use]
    pub fn gold_choice_exists(&self, card: &Card) -> bool {
        let cost = card.cost.shortfall(&self.cards);
        let colored_cost = cost.colored_total();
        let colored_pay = self.gems.min(&cost).colored_total();
        let gold_needed = colored_cost - colored_pay;
        let gold = i32::from(self.gems[GOLD]);

        if colored_cost == 0 {
            false
        } else if gold_needed == 0 {
            gold > 0
        } else {
            gold > gold_needed
        }
    }

    /// Pay for a card: discount by owned cards, pay colored gems first, then
    /// (if permitted) cover the rest with gold. Returns the spend vector.
    pub fn auto_spend(&mut self, raw_cost: &Gems, with_gold: bool) -> Gems {
        let cost = raw_cost.shortfall(&self.cards);
        let mut spent = self.gems.min(&cost);

        if with_gold {
            spent[GOLD] = (cost.total() - spent.total()) as i8;
        }
        debug_assert_eq!(spent.total(), cost.total(), "auto_spend on unaffordable cost");

        self.gems -= spent;
        spent
    }

    /// Add `take` to holdings, discarding back down to the gem limit.
    ///
    /// Discards prefer held colors that are not part of `take`, then any held
    /// color; ties are broken by `rng`. Gold is never discarded, so a gold
    /// award always survives in `net`.
    pub fn auto_take(&mut self, take: Gems, rng: &mut GameRng) -> TakeResolution {
        let gold_award = take[GOLD] > 0;
        self.gems += take;

        let excess = (self.gems.total() - GEM_LIMIT).max(0);
        let mut discarded = Gems::ZERO;

        for _ in 0..excess {
            let held = |c: &usize| self.gems[*c] > 0;
            let mut pool: SmallVec<[usize; COLORED]> =
                (0..COLORED).filter(held).filter(|&c| take[c] == 0).collect();
            if pool.is_empty() {
                pool = (0..COLORED).filter(held).collect();
            }

            let Some(&color) = rng.choose(&pool) else {
                break;
            };
            self.gems[color] -= 1;
            discarded[color] += 1;
        }

        let mut net = take - discarded;
        if gold_award {
            net[GOLD] = 1;
        }

        TakeResolution { net, discarded }
    }
}
