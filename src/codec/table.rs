//! The action-space layout.
//!
//! Every index in `0..ACTION_DIM` names exactly one move. The space is cut
//! into three regions, and the take region is further cut into four groups
//! plus a trailing backup-discard index:
//!
//! | region  | group            | choices | sub-slots | offset |
//! |---------|------------------|---------|-----------|--------|
//! | take    | three distinct   | 10      | 4         | 0      |
//! | take    | two same         | 5       | 3         | 40     |
//! | take    | two distinct     | 10      | 3         | 55     |
//! | take    | one              | 5       | 2         | 85     |
//! | take    | backup discard   | 1       | -         | 95     |
//! | buy     | shop (tier-major)| 12      | 2         | 96     |
//! | buy     | reserved         | 3       | 2         | 120    |
//! | reserve | per tier: 4 shop slots + deck | 15 | 1  | 126    |
//!
//! Take sub-slots count the discards the move forces; buy sub-slots are
//! `[without gold, with gold]`. All offsets below are derived from the
//! widths, so changing a width moves every later region with it.

use serde::{Deserialize, Serialize};

use crate::core::{Color, Gems, COLORED};

/// Card tiers.
pub const TIERS: usize = 3;

/// Face-up shop slots per tier.
pub const SHOP_SLOTS: usize = 4;

/// Nobles dealt onto the board.
pub const NOBLE_SLOTS: usize = 3;

/// Maximum reserved cards per player.
pub const RESERVE_LIMIT: usize = 3;

/// Maximum gems a player may hold at a turn boundary.
pub const GEM_LIMIT: i32 = 10;

/// Bank must hold at least this many of a color before two of it are taken.
pub const TAKE_TWO_SAME_MIN_BANK: i8 = 4;

/// The four kinds of gem take, in index order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TakeKind {
    ThreeDistinct,
    TwoSame,
    TwoDistinct,
    One,
}

const COMBOS_3: [[usize; 3]; 10] = [
    [0, 1, 2],
    [0, 1, 3],
    [0, 1, 4],
    [0, 2, 3],
    [0, 2, 4],
    [0, 3, 4],
    [1, 2, 3],
    [1, 2, 4],
    [1, 3, 4],
    [2, 3, 4],
];

const COMBOS_2: [[usize; 2]; 10] = [
    [0, 1],
    [0, 2],
    [0, 3],
    [0, 4],
    [1, 2],
    [1, 3],
    [1, 4],
    [2, 3],
    [2, 4],
    [3, 4],
];

impl TakeKind {
    pub const ALL: [TakeKind; 4] = [
        TakeKind::ThreeDistinct,
        TakeKind::TwoSame,
        TakeKind::TwoDistinct,
        TakeKind::One,
    ];

    /// Number of base choices in this group.
    #[must_use]
    pub const fn choices(self) -> usize {
        match self {
            TakeKind::ThreeDistinct => COMBOS_3.len(),
            TakeKind::TwoSame => COLORED,
            TakeKind::TwoDistinct => COMBOS_2.len(),
            TakeKind::One => COLORED,
        }
    }

    /// Gems taken by any choice in this group.
    #[must_use]
    pub const fn gems_taken(self) -> usize {
        match self {
            TakeKind::ThreeDistinct => 3,
            TakeKind::TwoSame | TakeKind::TwoDistinct => 2,
            TakeKind::One => 1,
        }
    }

    /// Discard-count sub-slots per choice: 0 through `gems_taken` discards.
    #[must_use]
    pub const fn discard_slots(self) -> usize {
        self.gems_taken() + 1
    }

    /// Indices occupied by this group.
    #[must_use]
    pub const fn width(self) -> usize {
        self.choices() * self.discard_slots()
    }

    /// First index of this group.
    #[must_use]
    pub const fn offset(self) -> usize {
        match self {
            TakeKind::ThreeDistinct => TAKE_OFFSET,
            TakeKind::TwoSame => TakeKind::ThreeDistinct.offset() + TakeKind::ThreeDistinct.width(),
            TakeKind::TwoDistinct => TakeKind::TwoSame.offset() + TakeKind::TwoSame.width(),
            TakeKind::One => TakeKind::TwoDistinct.offset() + TakeKind::TwoDistinct.width(),
        }
    }

    /// Gem vector requested by `choice`.
    ///
    /// Panics if `choice >= self.choices()`.
    #[must_use]
    pub fn gems(self, choice: usize) -> Gems {
        let mut gems = Gems::ZERO;
        match self {
            TakeKind::ThreeDistinct => COMBOS_3[choice].iter().for_each(|&c| gems[c] = 1),
            TakeKind::TwoSame => gems[choice] = 2,
            TakeKind::TwoDistinct => COMBOS_2[choice].iter().for_each(|&c| gems[c] = 1),
            TakeKind::One => {
                assert!(choice < COLORED, "Take choice out of range");
                gems[choice] = 1;
            }
        }
        gems
    }

    /// Inverse of `gems`: the group and choice that request exactly `take`.
    #[must_use]
    pub fn classify(take: &Gems) -> Option<(TakeKind, usize)> {
        if take[Color::Gold] != 0 || !take.is_non_negative() {
            return None;
        }
        Self::ALL.into_iter().find_map(|kind| {
            (0..kind.choices())
                .find(|&choice| kind.gems(choice) == *take)
                .map(|choice| (kind, choice))
        })
    }
}

/// Discards forced when a player holding `held_total` gems takes `taken` more.
#[must_use]
pub fn forced_discards(held_total: i32, taken: usize) -> usize {
    (held_total + taken as i32 - GEM_LIMIT).max(0) as usize
}

pub const TAKE_OFFSET: usize = 0;

/// The single index after the four take groups.
pub const BACKUP_DISCARD: usize = TakeKind::One.offset() + TakeKind::One.width();

pub const TAKE_DIM: usize = BACKUP_DISCARD + 1;

/// Two bits per purchasable slot: without gold, with gold.
pub const BUY_VARIANTS: usize = 2;

pub const BUY_OFFSET: usize = TAKE_OFFSET + TAKE_DIM;

/// First buy index addressing a reserved card.
pub const BUY_RESERVED_OFFSET: usize = BUY_OFFSET + TIERS * SHOP_SLOTS * BUY_VARIANTS;

pub const BUY_DIM: usize = (TIERS * SHOP_SLOTS + RESERVE_LIMIT) * BUY_VARIANTS;

pub const RESERVE_OFFSET: usize = BUY_OFFSET + BUY_DIM;

/// Reserve targets per tier: each shop slot plus the deck top.
pub const RESERVE_PER_TIER: usize = SHOP_SLOTS + 1;

pub const RESERVE_DIM: usize = TIERS * RESERVE_PER_TIER;

/// Width of the whole action space.
pub const ACTION_DIM: usize = RESERVE_OFFSET + RESERVE_DIM;

/// Which region an index falls in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Region {
    Take,
    Buy,
    Reserve,
}

impl Region {
    /// Region of `index`, `None` past the end of the space.
    #[must_use]
    pub const fn of(index: usize) -> Option<Region> {
        if index < BUY_OFFSET {
            Some(Region::Take)
        } else if index < RESERVE_OFFSET {
            Some(Region::Buy)
        } else if index < ACTION_DIM {
            Some(Region::Reserve)
        } else {
            None
        }
    }

    /// Half-open index range of this region.
    #[must_use]
    pub const fn range(self) -> std::ops::Range<usize> {
        match self {
            Region::Take => TAKE_OFFSET..BUY_OFFSET,
            Region::Buy => BUY_OFFSET..RESERVE_OFFSET,
            Region::Reserve => RESERVE_OFFSET..ACTION_DIM,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions() {
        assert_eq!(TAKE_DIM, 96);
        assert_eq!(BUY_DIM, 30);
        assert_eq!(RESERVE_DIM, 15);
        assert_eq!(ACTION_DIM, 141);
    }

    #[test]
    fn test_take_group_offsets() {
        assert_eq!(TakeKind::ThreeDistinct.offset(), 0);
        assert_eq!(TakeKind::TwoSame.offset(), 40);
        assert_eq!(TakeKind::TwoDistinct.offset(), 55);
        assert_eq!(TakeKind::One.offset(), 85);
        assert_eq!(BACKUP_DISCARD, 95);
    }

    #[test]
    fn test_region_boundaries() {
        assert_eq!(BUY_OFFSET, 96);
        assert_eq!(BUY_RESERVED_OFFSET, 120);
        assert_eq!(RESERVE_OFFSET, 126);

        assert_eq!(Region::of(0), Some(Region::Take));
        assert_eq!(Region::of(95), Some(Region::Take));
        assert_eq!(Region::of(96), Some(Region::Buy));
        assert_eq!(Region::of(125), Some(Region::Buy));
        assert_eq!(Region::of(126), Some(Region::Reserve));
        assert_eq!(Region::of(140), Some(Region::Reserve));
        assert_eq!(Region::of(141), None);

        let covered: usize = [Region::Take, Region::Buy, Region::Reserve]
            .iter()
            .map(|r| r.range().len())
            .sum();
        assert_eq!(covered, ACTION_DIM);
    }

    #[test]
    fn test_take_gems_shapes() {
        for kind in TakeKind::ALL {
            for choice in 0..kind.choices() {
                let gems = kind.gems(choice);
                assert_eq!(gems.total(), kind.gems_taken() as i32);
                assert_eq!(gems[Color::Gold], 0);
            }
        }

        assert_eq!(TakeKind::ThreeDistinct.gems(0), Gems::colored([1, 1, 1, 0, 0]));
        assert_eq!(TakeKind::ThreeDistinct.gems(9), Gems::colored([0, 0, 1, 1, 1]));
        assert_eq!(TakeKind::TwoSame.gems(3), Gems::colored([0, 0, 0, 2, 0]));
        assert_eq!(TakeKind::TwoDistinct.gems(4), Gems::colored([0, 1, 1, 0, 0]));
        assert_eq!(TakeKind::One.gems(4), Gems::colored([0, 0, 0, 0, 1]));
    }

    #[test]
    fn test_classify_inverts_gems() {
        for kind in TakeKind::ALL {
            for choice in 0..kind.choices() {
                assert_eq!(TakeKind::classify(&kind.gems(choice)), Some((kind, choice)));
            }
        }

        assert_eq!(TakeKind::classify(&Gems::ZERO), None);
        assert_eq!(TakeKind::classify(&Gems::gold(1)), None);
        assert_eq!(TakeKind::classify(&Gems::colored([1, 1, 1, 1, 0])), None);
        assert_eq!(TakeKind::classify(&Gems::colored([2, 1, 0, 0, 0])), None);
    }

    #[test]
    fn test_forced_discards() {
        assert_eq!(forced_discards(0, 3), 0);
        assert_eq!(forced_discards(7, 3), 0);
        assert_eq!(forced_discards(8, 3), 1);
        assert_eq!(forced_discards(10, 3), 3);
        assert_eq!(forced_discards(10, 2), 2);
        assert_eq!(forced_discards(9, 1), 0);
        assert_eq!(forced_discards(10, 1), 1);
    }
}
