//! Network-driven agent.

use super::source::{Decision, DecisionSource};
use crate::codec::LegalMask;
use crate::core::GameRng;
use crate::nn::{mask_policy, EncodedState, PolicyNetwork};
use crate::rules::Game;

/// Chooses from a policy network's output restricted to legal moves.
///
/// With no temperature set, plays the highest-probability legal index
/// (lowest index on ties). With a temperature, samples from the masked
/// policy raised to `1 / temperature`. If the network puts no mass on any
/// legal move, falls back to the first legal index.
pub struct PolicyAgent<N: PolicyNetwork> {
    network: N,
    temperature: Option<f32>,
    rng: GameRng,
}

impl<N: PolicyNetwork> PolicyAgent<N> {
    pub fn new(network: N) -> Self {
        Self {
            network,
            temperature: None,
            rng: GameRng::new(0),
        }
    }

    /// Sample instead of taking the argmax.
    pub fn with_temperature(mut self, temperature: f32, seed: u64) -> Self {
        assert!(temperature > 0.0, "Temperature must be positive");
        self.temperature = Some(temperature);
        self.rng = GameRng::new(seed).for_context("agent");
        self
    }

    #[must_use]
    pub fn network(&self) -> &N {
        &self.network
    }

    fn pick(&mut self, masked: &[f32], mask: &LegalMask) -> Option<usize> {
        let choice = match self.temperature {
            None => masked
                .iter()
                .enumerate()
                .filter(|(_, &p)| p > 0.0)
                .fold(None, |best: Option<(usize, f32)>, (i, &p)| match best {
                    Some((_, q)) if q >= p => best,
                    _ => Some((i, p)),
                })
                .map(|(i, _)| i),
            Some(t) => {
                let weights: Vec<f32> = masked.iter().map(|&p| p.powf(1.0 / t)).collect();
                self.rng.choose_weighted(&weights)
            }
        };
        choice.or_else(|| mask.indices().next())
    }
}

impl<N: PolicyNetwork> DecisionSource for PolicyAgent<N> {
    fn decide(&mut self, _game: &Game, observation: &EncodedState, mask: &LegalMask) -> Decision {
        let policy = self.network.predict(observation);
        let masked = mask_policy(&policy, mask);
        Decision::Index(self.pick(&masked, mask).unwrap_or(0))
    }
}
