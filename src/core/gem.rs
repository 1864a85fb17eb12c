//! Gem colors and the six-slot gem vector.
//!
//! Every quantity of gems in the engine (bank, holdings, costs, card discounts,
//! deltas) is a `Gems` value laid out as `[white, blue, green, red, black, gold]`.
//! Deltas may be negative; holdings and the bank never are at a turn boundary.

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Index, IndexMut, Neg, Sub, SubAssign};

/// Number of non-gold colors.
pub const COLORED: usize = 5;

/// Number of gem slots including gold.
pub const GEM_SLOTS: usize = 6;

/// Index of the gold slot.
pub const GOLD: usize = 5;

/// A gem color. Gold is the wildcard and never appears on a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Color {
    White,
    Blue,
    Green,
    Red,
    Black,
    Gold,
}

impl Color {
    /// The five colors a card can produce, in slot order.
    pub const COLORED: [Color; COLORED] = [
        Color::White,
        Color::Blue,
        Color::Green,
        Color::Red,
        Color::Black,
    ];

    /// Slot of this color in a `Gems` vector.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Color for a slot index, `None` past gold.
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Color::White),
            1 => Some(Color::Blue),
            2 => Some(Color::Green),
            3 => Some(Color::Red),
            4 => Some(Color::Black),
            5 => Some(Color::Gold),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_gold(self) -> bool {
        matches!(self, Color::Gold)
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Color::White => "white",
            Color::Blue => "blue",
            Color::Green => "green",
            Color::Red => "red",
            Color::Black => "black",
            Color::Gold => "gold",
        };
        f.write_str(name)
    }
}

/// Six-slot gem vector: five colors followed by gold.
///
/// ```
/// use gem_engine::core::{Color, Gems};
///
/// let bank = Gems::new([4, 4, 4, 4, 4, 5]);
/// let take = Gems::from_colors(&[Color::White, Color::Blue, Color::Green]);
///
/// assert_eq!(bank - take, Gems::new([3, 3, 3, 4, 4, 5]));
/// assert_eq!(take.total(), 3);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Gems(pub [i8; GEM_SLOTS]);

impl Gems {
    pub const ZERO: Gems = Gems([0; GEM_SLOTS]);

    #[must_use]
    pub const fn new(slots: [i8; GEM_SLOTS]) -> Self {
        Self(slots)
    }

    /// Five colored amounts with zero gold.
    #[must_use]
    pub const fn colored(slots: [i8; COLORED]) -> Self {
        Self([slots[0], slots[1], slots[2], slots[3], slots[4], 0])
    }

    /// One gem of each listed color.
    #[must_use]
    pub fn from_colors(colors: &[Color]) -> Self {
        let mut gems = Self::ZERO;
        for &color in colors {
            gems[color] += 1;
        }
        gems
    }

    /// A single gold gem.
    #[must_use]
    pub const fn gold(count: i8) -> Self {
        Self([0, 0, 0, 0, 0, count])
    }

    /// Sum over all six slots.
    #[must_use]
    pub fn total(&self) -> i32 {
        self.0.iter().map(|&g| i32::from(g)).sum()
    }

    /// Sum over the five colored slots.
    #[must_use]
    pub fn colored_total(&self) -> i32 {
        self.0[..COLORED].iter().map(|&g| i32::from(g)).sum()
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&g| g == 0)
    }

    /// True when every slot is at least zero.
    #[must_use]
    pub fn is_non_negative(&self) -> bool {
        self.0.iter().all(|&g| g >= 0)
    }

    /// True when every slot of `self` is at least the matching slot of `other`.
    #[must_use]
    pub fn covers(&self, other: &Gems) -> bool {
        self.0.iter().zip(other.0.iter()).all(|(a, b)| a >= b)
    }

    /// Slot-wise `max(self - other, 0)`.
    #[must_use]
    pub fn shortfall(&self, other: &Gems) -> Gems {
        let mut out = Gems::ZERO;
        for i in 0..GEM_SLOTS {
            out.0[i] = (self.0[i] - other.0[i]).max(0);
        }
        out
    }

    /// Slot-wise minimum.
    #[must_use]
    pub fn min(&self, other: &Gems) -> Gems {
        let mut out = Gems::ZERO;
        for i in 0..GEM_SLOTS {
            out.0[i] = self.0[i].min(other.0[i]);
        }
        out
    }

    /// Copy with the gold slot zeroed.
    #[must_use]
    pub fn without_gold(mut self) -> Gems {
        self.0[GOLD] = 0;
        self
    }

    /// Colors with a positive amount, in slot order (gold included).
    pub fn present(&self) -> impl Iterator<Item = Color> + '_ {
        self.0
            .iter()
            .enumerate()
            .filter(|(_, &g)| g > 0)
            .filter_map(|(i, _)| Color::from_index(i))
    }
}

impl Index<usize> for Gems {
    type Output = i8;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IndexMut<usize> for Gems {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.0[index]
    }
}

impl Index<Color> for Gems {
    type Output = i8;

    fn index(&self, color: Color) -> &Self::Output {
        &self.0[color.index()]
    }
}

impl IndexMut<Color> for Gems {
    fn index_mut(&mut self, color: Color) -> &mut Self::Output {
        &mut self.0[color.index()]
    }
}

impl Add for Gems {
    type Output = Gems;

    fn add(mut self, rhs: Gems) -> Gems {
        self += rhs;
        self
    }
}

impl AddAssign for Gems {
    fn add_assign(&mut self, rhs: Gems) {
        for i in 0..GEM_SLOTS {
            self.0[i] += rhs.0[i];
        }
    }
}

impl Sub for Gems {
    type Output = Gems;

    fn sub(mut self, rhs: Gems) -> Gems {
        self -= rhs;
        self
    }
}

impl SubAssign for Gems {
    fn sub_assign(&mut self, rhs: Gems) {
        for i in 0..GEM_SLOTS {
            self.0[i] -= rhs.0[i];
        }
    }
}

impl Neg for Gems {
    type Output = Gems;

    fn neg(self) -> Gems {
        Gems::ZERO - self
    }
}

impl std::fmt::Display for Gems {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [w, u, g, r, k, au] = self.0;
        write!(f, "[w{w} u{u} g{g} r{r} k{k} *{au}]")
    }
}
