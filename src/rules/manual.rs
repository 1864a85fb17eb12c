//! Fully-specified moves.
//!
//! A `ManualMove` carries its own discard and spend vectors instead of
//! leaving them to `auto_take`/`auto_spend`. It still maps onto exactly one
//! codec index, so it passes through the same legal mask as an index move.

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::cards::Card;
use crate::codec::table::{forced_discards, TakeKind, GEM_LIMIT, RESERVE_LIMIT, SHOP_SLOTS, TIERS};
use crate::codec::{CardSource, Move, ReserveTarget};
use crate::core::{EngineError, Gems, COLORED, GOLD};
use crate::player::Player;

/// A move with every choice spelled out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ManualMove {
    /// Take `take` from the bank and return `discard`. A zero take with a
    /// single discarded gem is the backup discard.
    Take { take: Gems, discard: Gems },
    /// Buy a card paying exactly `spend`.
    Buy { source: CardSource, spend: Gems },
    /// Reserve a card. `take_gold: false` declines the gold award.
    Reserve {
        tier: u8,
        target: ReserveTarget,
        take_gold: bool,
        discard: Gems,
    },
}

impl ManualMove {
    /// Codec index this move occupies.
    pub fn index(&self) -> Result<usize, EngineError> {
        let mv = match *self {
            ManualMove::Take { take, discard } => {
                if !discard.is_non_negative() {
                    return Err(EngineError::InfeasibleMove("negative discard"));
                }
                if take.is_zero() && discard.total() == 1 {
                    Move::BackupDiscard
                } else {
                    let (kind, choice) = TakeKind::classify(&take)
                        .ok_or(EngineError::InfeasibleMove("not a legal gem combination"))?;
                    let discards = discard.total() as usize;
                    if discards > kind.gems_taken() {
                        return Err(EngineError::InfeasibleMove("more discards than gems taken"));
                    }
                    Move::Take {
                        kind,
                        choice: choice as u8,
                        discards: discards as u8,
                    }
                }
            }
            ManualMove::Buy { source, spend } => {
                check_source(source)?;
                Move::Buy {
                    source,
                    with_gold: spend[GOLD] > 0,
                }
            }
            ManualMove::Reserve { tier, target, .. } => {
                check_tier(tier)?;
                if let ReserveTarget::Shop(slot) = target {
                    check_slot(slot)?;
                }
                Move::Reserve { tier, target }
            }
        };
        Ok(mv.encode())
    }

    /// Check the explicit vectors against what `player` holds and what
    /// `board` offers.
    pub fn validate(&self, player: &Player, board: &Board) -> Result<(), EngineError> {
        match *self {
            ManualMove::Take { take, discard } => {
                check_discard(player.gems + take, discard)?;
                if (player.gems + take - discard).total() > GEM_LIMIT {
                    return Err(EngineError::InfeasibleMove("hand would exceed the gem limit"));
                }
                Ok(())
            }
            ManualMove::Buy { source, spend } => {
                let card = source_card(player, board, source)
                    .ok_or(EngineError::InfeasibleMove("no card at that source"))?;
                check_spend(player, card, spend)
            }
            ManualMove::Reserve {
                take_gold, discard, ..
            } => {
                let gold = match (take_gold, board.gems[GOLD] > 0) {
                    (true, true) => Gems::gold(1),
                    (true, false) => {
                        return Err(EngineError::InfeasibleMove("bank has no gold to award"))
                    }
                    (false, _) => Gems::ZERO,
                };
                check_discard(player.gems + gold, discard)?;
                let forced = forced_discards(player.gems.total(), gold.total() as usize);
                if discard.total() as usize != forced {
                    return Err(EngineError::InfeasibleMove("discard count does not match the overflow"));
                }
                Ok(())
            }
        }
    }
}

fn check_tier(tier: u8) -> Result<(), EngineError> {
    if usize::from(tier) < TIERS {
        Ok(())
    } else {
        Err(EngineError::InfeasibleMove("tier out of range"))
    }
}

fn check_slot(slot: u8) -> Result<(), EngineError> {
    if usize::from(slot) < SHOP_SLOTS {
        Ok(())
    } else {
        Err(EngineError::InfeasibleMove("shop slot out of range"))
    }
}

fn check_source(source: CardSource) -> Result<(), EngineError> {
    match source {
        CardSource::Shop { tier, slot } => {
            check_tier(tier)?;
            check_slot(slot)
        }
        CardSource::Reserved(position) if usize::from(position) < RESERVE_LIMIT => Ok(()),
        CardSource::Reserved(_) => Err(EngineError::InfeasibleMove("reserved position out of range")),
    }
}

fn source_card<'a>(player: &'a Player, board: &'a Board, source: CardSource) -> Option<&'a Card> {
    match source {
        CardSource::Shop { tier, slot } => board
            .card(usize::from(tier), usize::from(slot))
            .map(|c| &**c),
        CardSource::Reserved(position) => player.reserved.get(usize::from(position)).map(|c| &**c),
    }
}

fn check_discard(available: Gems, discard: Gems) -> Result<(), EngineError> {
    if !discard.is_non_negative() {
        return Err(EngineError::InfeasibleMove("negative discard"));
    }
    if !available.covers(&discard) {
        return Err(EngineError::InfeasibleMove("discard exceeds holdings"));
    }
    Ok(())
}

/// A spend must come out of held gems, never overpay a color, and cover the
/// cost left after card discounts exactly, with gold making up the rest.
fn check_spend(player: &Player, card: &Card, spend: Gems) -> Result<(), EngineError> {
    if !spend.is_non_negative() || !player.gems.covers(&spend) {
        return Err(EngineError::InfeasibleMove("spend exceeds holdings"));
    }
    let cost = card.cost.shortfall(&player.cards);
    if (0..COLORED).any(|c| spend[c] > cost[c]) {
        return Err(EngineError::InfeasibleMove("spend overpays a color"));
    }
    if spend.total() != cost.total() {
        return Err(EngineError::InfeasibleMove("spend does not match the discounted cost"));
    }
    Ok(())
}
