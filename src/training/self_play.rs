//! Game driver: plays full games between two decision sources.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::agents::DecisionSource;
use crate::cards::Catalog;
use crate::core::{EngineError, GameConfig, PlayerId, SEATS};
use crate::player::PlayerSummary;
use crate::rules::{Game, GameResult};

/// Configuration for the game driver.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelfPlayConfig {
    /// A game still running after this many moves is scored as a draw.
    pub max_half_turns: u32,

    /// Added to the game index to form each game's seed.
    pub seed_offset: u64,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        Self {
            max_half_turns: 500,
            seed_offset: 0,
        }
    }
}

impl SelfPlayConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_half_turns(mut self, max: u32) -> Self {
        self.max_half_turns = max;
        self
    }

    pub fn with_seed_offset(mut self, offset: u64) -> Self {
        self.seed_offset = offset;
        self
    }
}

/// Record of one finished game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    pub seed: u64,
    pub result: GameResult,
    pub starting_player: PlayerId,
    pub half_turns: u32,
    /// Codec index of every move in order.
    pub moves: Vec<usize>,
    pub players: [PlayerSummary; SEATS],
    /// Whether the game hit the half-turn cap.
    pub capped: bool,
}

/// Totals over many games.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelfPlayStats {
    pub games: usize,
    /// Wins per seat.
    pub wins: [usize; SEATS],
    pub draws: usize,
    pub capped: usize,
    pub half_turns: u64,
}

impl SelfPlayStats {
    pub fn record(&mut self, summary: &GameSummary) {
        self.games += 1;
        self.half_turns += u64::from(summary.half_turns);
        match summary.result {
            GameResult::Winner(p) => self.wins[p.index()] += 1,
            GameResult::Draw => self.draws += 1,
        }
        if summary.capped {
            self.capped += 1;
        }
    }

    /// Average game length in moves.
    #[must_use]
    pub fn mean_length(&self) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        self.half_turns as f64 / self.games as f64
    }
}

/// Runs games on a shared catalog.
pub struct SelfPlayWorker {
    catalog: Arc<Catalog>,
    config: SelfPlayConfig,
    game_config: GameConfig,
}

impl SelfPlayWorker {
    pub fn new(catalog: Arc<Catalog>, config: SelfPlayConfig) -> Self {
        Self {
            catalog,
            config,
            game_config: GameConfig::default(),
        }
    }

    /// Per-game settings. The seed is overridden for each game.
    pub fn with_game_config(mut self, game_config: GameConfig) -> Self {
        self.game_config = game_config;
        self
    }

    #[must_use]
    pub fn config(&self) -> &SelfPlayConfig {
        &self.config
    }

    /// Play one game; `first` moves for seat 0 and `second` for seat 1.
    ///
    /// Ends on a win, when the active player has no legal move, or at the
    /// half-turn cap. The last two are draws. Errors from a source's illegal
    /// or infeasible decision abort the game.
    pub fn play_game(
        &self,
        game_index: u64,
        first: &mut dyn DecisionSource,
        second: &mut dyn DecisionSource,
    ) -> Result<GameSummary, EngineError> {
        let seed = self.config.seed_offset.wrapping_add(game_index);
        let config = self.game_config.clone().with_seed(seed);
        let mut game = Game::new(Arc::clone(&self.catalog), config);
        let mut moves = Vec::new();

        let (result, capped) = loop {
            if let Some(result) = game.result() {
                break (result, false);
            }
            if game.half_turns() >= self.config.max_half_turns {
                break (GameResult::Draw, true);
            }

            let source: &mut dyn DecisionSource = if game.active_id().index() == 0 {
                &mut *first
            } else {
                &mut *second
            };
            let outcome = game.turn(source)?;
            moves.push(outcome.index);
        };

        Ok(GameSummary {
            seed,
            result,
            starting_player: game.starting_player(),
            half_turns: game.half_turns(),
            moves,
            players: [game.players()[0].summary(), game.players()[1].summary()],
            capped,
        })
    }

    /// Play `count` games with the same pair of sources.
    pub fn play_games(
        &self,
        count: usize,
        first: &mut dyn DecisionSource,
        second: &mut dyn DecisionSource,
    ) -> Result<SelfPlayStats, EngineError> {
        let mut stats = SelfPlayStats::default();
        for index in 0..count as u64 {
            let summary = self.play_game(index, first, second)?;
            stats.record(&summary);
        }
        Ok(stats)
    }
}
