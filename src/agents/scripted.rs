//! Queued decisions, for tests and for interfaces that collect moves elsewhere.

use std::collections::VecDeque;

use super::source::{Decision, DecisionSource};
use crate::codec::LegalMask;
use crate::nn::EncodedState;
use crate::rules::Game;

/// Replays a queue of decisions in order.
///
/// Once the queue runs dry it answers with the first legal index.
#[derive(Clone, Debug, Default)]
pub struct ScriptedAgent {
    queue: VecDeque<Decision>,
}

impl ScriptedAgent {
    pub fn new(decisions: impl IntoIterator<Item = Decision>) -> Self {
        Self {
            queue: decisions.into_iter().collect(),
        }
    }

    pub fn push(&mut self, decision: impl Into<Decision>) {
        self.queue.push_back(decision.into());
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl DecisionSource for ScriptedAgent {
    fn decide(&mut self, _game: &Game, _observation: &EncodedState, mask: &LegalMask) -> Decision {
        self.queue
            .pop_front()
            .unwrap_or_else(|| Decision::Index(mask.indices().next().unwrap_or(0)))
    }
}
