//! Engine error type.
//!
//! Only contract violations surface as errors. Exhausted decks and empty
//! noble slots are plain `None` values, and internal invariant breaches
//! panic at the turn boundary.

use thiserror::Error;

/// Errors returned by the engine's public operations.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("move index {0} is outside the action space")]
    IndexOutOfRange(usize),

    #[error("move index {index} is not legal for the active player")]
    IllegalMove { index: usize },

    #[error("manual move rejected: {0}")]
    InfeasibleMove(&'static str),

    #[error("the game is already over")]
    GameOver,

    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),

    #[error("invariant breach: {0}")]
    InvariantBreach(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            EngineError::IndexOutOfRange(200).to_string(),
            "move index 200 is outside the action space"
        );
        assert_eq!(
            EngineError::IllegalMove { index: 12 }.to_string(),
            "move index 12 is not legal for the active player"
        );
        assert_eq!(
            EngineError::InfeasibleMove("spend exceeds holdings").to_string(),
            "manual move rejected: spend exceeds holdings"
        );
    }
}
