//! Legal-move mask generation.
//!
//! Bits are set by encoding `Move` values, never by computing indices here,
//! so the mask and the resolver's decoder share one layout.

use super::state::Player;
use crate::board::Board;
use crate::codec::table::{
    forced_discards, TakeKind, GEM_LIMIT, RESERVE_LIMIT, SHOP_SLOTS, TAKE_TWO_SAME_MIN_BANK, TIERS,
};
use crate::codec::{CardSource, LegalMask, Move, ReserveTarget};
use crate::cards::Card;
use crate::core::Gems;

impl Player {
    /// Every move this player may make against `board`.
    #[must_use]
    pub fn legal_mask(&self, board: &Board) -> LegalMask {
        let mut mask = LegalMask::empty();
        self.mark_takes(&board.gems, &mut mask);
        self.mark_buys(board, &mut mask);
        self.mark_reserves(board, &mut mask);
        mask
    }

    fn mark_takes(&self, bank: &Gems, mask: &mut LegalMask) {
        let held = self.gems.total();
        debug_assert!(held <= GEM_LIMIT, "{} holds {} gems", self.id, held);

        for kind in TakeKind::ALL {
            let discards = forced_discards(held, kind.gems_taken()) as u8;

            for choice in 0..kind.choices() {
                let wanted = kind.gems(choice);
                let available = match kind {
                    TakeKind::TwoSame => bank[choice] >= TAKE_TWO_SAME_MIN_BANK,
                    _ => bank.covers(&wanted),
                };
                if available {
                    mask.allow(Move::Take {
                        kind,
                        choice: choice as u8,
                        discards,
                    });
                }
            }
        }

        if held == GEM_LIMIT {
            mask.allow(Move::BackupDiscard);
        }
    }

    fn mark_buys(&self, board: &Board, mask: &mut LegalMask) {
        for tier in 0..TIERS {
            for slot in 0..SHOP_SLOTS {
                if let Some(card) = board.card(tier, slot) {
                    let source = CardSource::Shop {
                        tier: tier as u8,
                        slot: slot as u8,
                    };
                    self.mark_buy(card, source, mask);
                }
            }
        }

        for (position, card) in self.reserved.iter().enumerate() {
            self.mark_buy(card, CardSource::Reserved(position as u8), mask);
        }
    }

    fn mark_buy(&self, card: &Card, source: CardSource, mask: &mut LegalMask) {
        let (without_gold, with_gold) = self.can_afford(card);
        if without_gold {
            mask.allow(Move::Buy {
                source,
                with_gold: false,
            });
        }
        if with_gold {
            mask.allow(Move::Buy {
                source,
                with_gold: true,
            });
        }
    }

    fn mark_reserves(&self, board: &Board, mask: &mut LegalMask) {
        if self.reserved.len() >= RESERVE_LIMIT {
            return;
        }

        for tier in 0..TIERS {
            for slot in 0..SHOP_SLOTS {
                if board.card(tier, slot).is_some() {
                    mask.allow(Move::Reserve {
                        tier: tier as u8,
                        target: ReserveTarget::Shop(slot as u8),
                    });
                }
            }
            if board.deck_len(tier) > 0 {
                mask.allow(Move::Reserve {
                    tier: tier as u8,
                    target: ReserveTarget::Deck,
                });
            }
        }
    }
}
