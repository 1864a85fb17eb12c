//! Decoded moves and the index codec.
//!
//! `Move::encode` and `Move::decode` are exact inverses over
//! `0..ACTION_DIM`. The legal-mask generator sets bits by encoding moves and
//! the turn resolver decodes indices, so both sides read the layout from
//! `table` and nowhere else.

use serde::{Deserialize, Serialize};

use super::table::{
    TakeKind, ACTION_DIM, BACKUP_DISCARD, BUY_OFFSET, BUY_RESERVED_OFFSET, BUY_VARIANTS,
    RESERVE_LIMIT, RESERVE_OFFSET, RESERVE_PER_TIER, SHOP_SLOTS, TIERS,
};
use crate::core::{EngineError, Gems};

/// Where a purchased card comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardSource {
    /// A face-up shop slot.
    Shop { tier: u8, slot: u8 },
    /// The acting player's reserved list, by position.
    Reserved(u8),
}

/// What a reservation takes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReserveTarget {
    /// A face-up shop slot of the tier.
    Shop(u8),
    /// The top of the tier's deck, unseen.
    Deck,
}

/// One move of the discrete action space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    /// Take gems; `discards` is the number of automatic discards the take forces.
    Take {
        kind: TakeKind,
        choice: u8,
        discards: u8,
    },
    /// Return one held gem without taking any. Only legal at exactly 10 gems.
    BackupDiscard,
    Buy {
        source: CardSource,
        with_gold: bool,
    },
    Reserve {
        tier: u8,
        target: ReserveTarget,
    },
}

impl Move {
    /// Flat index of this move.
    ///
    /// ```
    /// use gem_engine::codec::{Move, TakeKind, CardSource, ReserveTarget};
    ///
    /// let take = Move::Take { kind: TakeKind::ThreeDistinct, choice: 0, discards: 0 };
    /// assert_eq!(take.encode(), 0);
    ///
    /// let buy = Move::Buy { source: CardSource::Reserved(2), with_gold: true };
    /// assert_eq!(buy.encode(), 125);
    ///
    /// let reserve = Move::Reserve { tier: 2, target: ReserveTarget::Deck };
    /// assert_eq!(reserve.encode(), 140);
    /// ```
    #[must_use]
    pub fn encode(&self) -> usize {
        match *self {
            Move::Take {
                kind,
                choice,
                discards,
            } => {
                debug_assert!(usize::from(choice) < kind.choices());
                debug_assert!(usize::from(discards) < kind.discard_slots());
                kind.offset() + usize::from(choice) * kind.discard_slots() + usize::from(discards)
            }
            Move::BackupDiscard => BACKUP_DISCARD,
            Move::Buy { source, with_gold } => {
                let base = match source {
                    CardSource::Shop { tier, slot } => {
                        BUY_OFFSET
                            + (usize::from(tier) * SHOP_SLOTS + usize::from(slot)) * BUY_VARIANTS
                    }
                    CardSource::Reserved(position) => {
                        BUY_RESERVED_OFFSET + usize::from(position) * BUY_VARIANTS
                    }
                };
                base + usize::from(with_gold)
            }
            Move::Reserve { tier, target } => {
                let local = match target {
                    ReserveTarget::Shop(slot) => usize::from(slot),
                    ReserveTarget::Deck => SHOP_SLOTS,
                };
                RESERVE_OFFSET + usize::from(tier) * RESERVE_PER_TIER + local
            }
        }
    }

    /// Move named by `index`.
    pub fn decode(index: usize) -> Result<Move, EngineError> {
        if index >= ACTION_DIM {
            return Err(EngineError::IndexOutOfRange(index));
        }

        if index < BACKUP_DISCARD {
            let kind = TakeKind::ALL
                .into_iter()
                .rev()
                .find(|k| index >= k.offset())
                .unwrap_or(TakeKind::ThreeDistinct);
            let local = index - kind.offset();
            return Ok(Move::Take {
                kind,
                choice: (local / kind.discard_slots()) as u8,
                discards: (local % kind.discard_slots()) as u8,
            });
        }

        if index == BACKUP_DISCARD {
            return Ok(Move::BackupDiscard);
        }

        if index < RESERVE_OFFSET {
            let with_gold = (index - BUY_OFFSET) % BUY_VARIANTS == 1;
            let source = if index < BUY_RESERVED_OFFSET {
                let slot_index = (index - BUY_OFFSET) / BUY_VARIANTS;
                CardSource::Shop {
                    tier: (slot_index / SHOP_SLOTS) as u8,
                    slot: (slot_index % SHOP_SLOTS) as u8,
                }
            } else {
                CardSource::Reserved(((index - BUY_RESERVED_OFFSET) / BUY_VARIANTS) as u8)
            };
            return Ok(Move::Buy { source, with_gold });
        }

        let local = index - RESERVE_OFFSET;
        let tier = (local / RESERVE_PER_TIER) as u8;
        let target = match local % RESERVE_PER_TIER {
            slot if slot < SHOP_SLOTS => ReserveTarget::Shop(slot as u8),
            _ => ReserveTarget::Deck,
        };
        Ok(Move::Reserve { tier, target })
    }

    /// Gems requested by a take move, zero for everything else.
    #[must_use]
    pub fn requested_gems(&self) -> Gems {
        match *self {
            Move::Take { kind, choice, .. } => kind.gems(usize::from(choice)),
            _ => Gems::ZERO,
        }
    }

    /// Every move of the action space in index order.
    pub fn all() -> impl Iterator<Item = Move> {
        let takes = TakeKind::ALL.into_iter().flat_map(|kind| {
            (0..kind.choices()).flat_map(move |choice| {
                (0..kind.discard_slots()).map(move |discards| Move::Take {
                    kind,
                    choice: choice as u8,
                    discards: discards as u8,
                })
            })
        });
        let shop_buys = (0..TIERS * SHOP_SLOTS).flat_map(|i| {
            [false, true].into_iter().map(move |with_gold| Move::Buy {
                source: CardSource::Shop {
                    tier: (i / SHOP_SLOTS) as u8,
                    slot: (i % SHOP_SLOTS) as u8,
                },
                with_gold,
            })
        });
        let reserved_buys = (0..RESERVE_LIMIT).flat_map(|p| {
            [false, true].into_iter().map(move |with_gold| Move::Buy {
                source: CardSource::Reserved(p as u8),
                with_gold,
            })
        });
        let reserves = (0..TIERS).flat_map(|tier| {
            (0..SHOP_SLOTS)
                .map(|s| ReserveTarget::Shop(s as u8))
                .chain(std::iter::once(ReserveTarget::Deck))
                .map(move |target| Move::Reserve {
                    tier: tier as u8,
                    target,
                })
        });

        takes
            .chain(std::iter::once(Move::BackupDiscard))
            .chain(shop_buys)
            .chain(reserved_buys)
            .chain(reserves)
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Move::Take { discards, .. } => {
                write!(f, "take {} (discard {})", self.requested_gems(), discards)
            }
            Move::BackupDiscard => write!(f, "discard one gem"),
            Move::Buy { source, with_gold } => {
                let gold = if *with_gold { " with gold" } else { "" };
                match source {
                    CardSource::Shop { tier, slot } => {
                        write!(f, "buy tier {} slot {}{}", tier, slot, gold)
                    }
                    CardSource::Reserved(p) => write!(f, "buy reserved {}{}", p, gold),
                }
            }
            Move::Reserve { tier, target } => match target {
                ReserveTarget::Shop(slot) => write!(f, "reserve tier {} slot {}", tier, slot),
                ReserveTarget::Deck => write!(f, "reserve tier {} deck top", tier),
            },
        }
    }
}
