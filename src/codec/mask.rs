//! Fixed-width legal-move mask.

use serde::{Deserialize, Serialize};

use super::moves::Move;
use super::table::ACTION_DIM;

const WORDS: usize = (ACTION_DIM + 63) / 64;

/// Bitset over the action space. Bit `i` is set iff index `i` is legal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LegalMask {
    words: [u64; WORDS],
}

impl LegalMask {
    /// All-illegal mask.
    #[must_use]
    pub const fn empty() -> Self {
        Self { words: [0; WORDS] }
    }

    /// Set one index.
    ///
    /// Panics if `index >= ACTION_DIM`.
    pub fn set(&mut self, index: usize) {
        assert!(index < ACTION_DIM, "Mask index out of range");
        self.words[index / 64] |= 1u64 << (index % 64);
    }

    /// Mark a move legal.
    pub fn allow(&mut self, mv: Move) {
        self.set(mv.encode());
    }

    /// Whether `index` is legal. Out-of-range indices are never legal.
    #[must_use]
    pub fn is_legal(&self, index: usize) -> bool {
        index < ACTION_DIM && (self.words[index / 64] >> (index % 64)) & 1 == 1
    }

    /// Number of legal indices.
    #[must_use]
    pub fn count(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// Legal indices in ascending order.
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        (0..ACTION_DIM).filter(move |&i| self.is_legal(i))
    }

    /// Legal indices within `range`.
    pub fn indices_in(&self, range: std::ops::Range<usize>) -> impl Iterator<Item = usize> + '_ {
        range.filter(move |&i| self.is_legal(i))
    }

    /// Expand to one boolean per index, the form policies consume.
    #[must_use]
    pub fn to_bools(&self) -> Vec<bool> {
        (0..ACTION_DIM).map(|i| self.is_legal(i)).collect()
    }
}
