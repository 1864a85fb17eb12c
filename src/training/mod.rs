//! Game driving.
//!
//! `SelfPlayWorker` runs complete games between two decision sources on a
//! shared catalog and reports a `GameSummary` per game, or `SelfPlayStats`
//! over a batch.
//!
//! ```
//! use std::sync::Arc;
//! use gem_engine::agents::RandomAgent;
//! use gem_engine::cards::Catalog;
//! use gem_engine::training::{SelfPlayConfig, SelfPlayWorker};
//!
//! let worker = SelfPlayWorker::new(
//!     Arc::new(Catalog::standard()),
//!     SelfPlayConfig::default().with_max_half_turns(20),
//! );
//! let summary = worker
//!     .play_game(0, &mut RandomAgent::new(1), &mut RandomAgent::new(2))
//!     .unwrap();
//! assert!(summary.half_turns <= 20);
//! ```

pub mod self_play;

pub use self_play::{GameSummary, SelfPlayConfig, SelfPlayStats, SelfPlayWorker};
