//! The decision-source seam between the engine and whoever picks moves.

use serde::{Deserialize, Serialize};

use crate::codec::LegalMask;
use crate::nn::EncodedState;
use crate::rules::{Game, ManualMove};

/// A chosen move: either a codec index or a fully-specified manual move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    Index(usize),
    Manual(ManualMove),
}

impl From<usize> for Decision {
    fn from(index: usize) -> Self {
        Decision::Index(index)
    }
}

impl From<ManualMove> for Decision {
    fn from(manual: ManualMove) -> Self {
        Decision::Manual(manual)
    }
}

/// Picks the active player's next move.
///
/// `observation` and `mask` are computed for the active player. An index
/// decision should have its mask bit set; the engine rejects it otherwise.
pub trait DecisionSource {
    fn decide(&mut self, game: &Game, observation: &EncodedState, mask: &LegalMask) -> Decision;
}

impl<F> DecisionSource for F
where
    F: FnMut(&Game, &EncodedState, &LegalMask) -> Decision,
{
    fn decide(&mut self, game: &Game, observation: &EncodedState, mask: &LegalMask) -> Decision {
        self(game, observation, mask)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Catalog;
    use crate::core::{GameConfig, Gems};
    use std::sync::Arc;

    #[test]
    fn test_closure_source() {
        let mut game = Game::new(Arc::new(Catalog::standard()), GameConfig::default());
        let mut first_legal = |_: &Game, _: &EncodedState, mask: &LegalMask| {
            Decision::Index(mask.indices().next().unwrap_or(0))
        };

        let outcome = game.turn(&mut first_legal).unwrap();
        assert_eq!(outcome.index, 0);
    }

    #[test]
    fn test_conversions() {
        assert_eq!(Decision::from(7), Decision::Index(7));
        let manual = ManualMove::Take {
            take: Gems::colored([1, 1, 1, 0, 0]),
            discard: Gems::ZERO,
        };
        assert_eq!(Decision::from(manual), Decision::Manual(manual));
    }
}
