//! Uniform choice over legal indices.

use super::source::{Decision, DecisionSource};
use crate::codec::LegalMask;
use crate::core::GameRng;
use crate::nn::EncodedState;
use crate::rules::Game;

/// Picks uniformly among the set bits of the mask.
#[derive(Clone, Debug)]
pub struct RandomAgent {
    rng: GameRng,
}

impl RandomAgent {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: GameRng::new(seed).for_context("agent"),
        }
    }
}

impl DecisionSource for RandomAgent {
    fn decide(&mut self, _game: &Game, _observation: &EncodedState, mask: &LegalMask) -> Decision {
        let legal: Vec<usize> = mask.indices().collect();
        // An empty mask leaves nothing to pick; index 0 is rejected downstream.
        let index = self.rng.choose(&legal).copied().unwrap_or(0);
        Decision::Index(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Catalog;
    use crate::core::GameConfig;
    use std::sync::Arc;

    #[test]
    fn test_only_legal_indices() {
        let game = Game::new(Arc::new(Catalog::standard()), GameConfig::default());
        let mask = game.legal_mask();
        let mut agent = RandomAgent::new(3);

        for _ in 0..50 {
            match agent.decide(&game, &game.observation(), &mask) {
                Decision::Index(i) => assert!(mask.is_legal(i)),
                Decision::Manual(_) => panic!("random agent chose a manual move"),
            }
        }
    }

    #[test]
    fn test_same_seed_same_choices() {
        let game = Game::new(Arc::new(Catalog::standard()), GameConfig::default());
        let mask = game.legal_mask();
        let obs = game.observation();

        let picks = |seed| {
            let mut agent = RandomAgent::new(seed);
            (0..10).map(|_| agent.decide(&game, &obs, &mask)).collect::<Vec<_>>()
        };
        assert_eq!(picks(5), picks(5));
    }
}
