//! Network-facing types: the encoded observation and the policy trait.

use serde::{Deserialize, Serialize};

use crate::codec::{LegalMask, ACTION_DIM};

/// Encoded game state as a flat tensor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EncodedState {
    /// Row-major values.
    pub tensor: Vec<f32>,
    pub shape: Vec<usize>,
}

impl EncodedState {
    pub fn new(tensor: Vec<f32>, shape: Vec<usize>) -> Self {
        debug_assert_eq!(
            tensor.len(),
            shape.iter().product::<usize>(),
            "Tensor length must match shape product"
        );
        Self { tensor, shape }
    }

    pub fn zeros(shape: Vec<usize>) -> Self {
        let size = shape.iter().product();
        Self {
            tensor: vec![0.0; size],
            shape,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tensor.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tensor.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<f32> {
        self.tensor.get(index).copied()
    }
}

/// Maps an observation to a probability per codec index.
///
/// Agents mask the output with the legal mask before choosing, so entries
/// for illegal moves may hold anything.
pub trait PolicyNetwork: Send + Sync {
    fn predict(&self, encoded: &EncodedState) -> Vec<f32>;

    fn predict_batch(&self, encoded: &[EncodedState]) -> Vec<Vec<f32>> {
        encoded.iter().map(|e| self.predict(e)).collect()
    }
}

/// Zero out illegal entries of a policy vector.
///
/// Missing entries (a policy shorter than the action space) count as zero.
#[must_use]
pub fn mask_policy(policy: &[f32], mask: &LegalMask) -> Vec<f32> {
    (0..ACTION_DIM)
        .map(|index| {
            let p = policy.get(index).copied().unwrap_or(0.0);
            if mask.is_legal(index) && p.is_finite() {
                p.max(0.0)
            } else {
                0.0
            }
        })
        .collect()
}

/// Equal probability on every index of the action space.
#[derive(Clone, Debug)]
pub struct UniformPolicy {
    action_space_size: usize,
}

impl UniformPolicy {
    pub fn new(action_space_size: usize) -> Self {
        Self { action_space_size }
    }
}

impl Default for UniformPolicy {
    fn default() -> Self {
        Self::new(ACTION_DIM)
    }
}

impl PolicyNetwork for UniformPolicy {
    fn predict(&self, _encoded: &EncodedState) -> Vec<f32> {
        if self.action_space_size == 0 {
            return vec![];
        }
        let prob = 1.0 / self.action_space_size as f32;
        vec![prob; self.action_space_size]
    }
}
