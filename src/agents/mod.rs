//! Decision sources.
//!
//! The engine asks a `DecisionSource` for each move, handing it the active
//! player's observation and legal mask. Sources answer with a codec index
//! or a fully-specified `ManualMove`.
//!
//! - `RandomAgent`: uniform over legal indices
//! - `PolicyAgent`: masked argmax or temperature sampling over a `PolicyNetwork`
//! - `ScriptedAgent`: replays queued decisions
//!
//! Any `FnMut(&Game, &EncodedState, &LegalMask) -> Decision` closure is a
//! source too.

pub mod policy;
pub mod random;
pub mod scripted;
pub mod source;

pub use policy::PolicyAgent;
pub use random::RandomAgent;
pub use scripted::ScriptedAgent;
pub use source::{Decision, DecisionSource};
