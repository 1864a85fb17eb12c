//! Game configuration.
//!
//! The shape of the action space and the observation vector are fixed
//! contracts and live in `codec::table` and `nn::encoder`. What remains
//! configurable is how a game is seeded and when it ends.

use serde::{Deserialize, Serialize};

use super::PlayerId;

/// Points at which a player wins.
pub const DEFAULT_POINTS_TO_WIN: u8 = 15;

/// Per-game configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Seed for deck shuffles, noble selection, seat order and discard tie-breaks.
    pub seed: u64,

    /// A scoring event that brings a player to this many points ends the game.
    pub points_to_win: u8,

    /// Seat that moves first. `None` draws it from the seeded RNG at each reset.
    pub starting_player: Option<PlayerId>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            points_to_win: DEFAULT_POINTS_TO_WIN,
            starting_player: None,
        }
    }
}

impl GameConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the winning point threshold.
    pub fn with_points_to_win(mut self, points: u8) -> Self {
        assert!(points > 0, "Winning threshold must be positive");
        self.points_to_win = points;
        self
    }

    /// Fix the seat that moves first.
    pub fn with_starting_player(mut self, player: PlayerId) -> Self {
        self.starting_player = Some(player);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.seed, 42);
        assert_eq!(config.points_to_win, 15);
        assert_eq!(config.starting_player, None);
    }

    #[test]
    fn test_builder_pattern() {
        let config = GameConfig::new()
            .with_seed(7)
            .with_points_to_win(10)
            .with_starting_player(PlayerId::new(1));

        assert_eq!(config.seed, 7);
        assert_eq!(config.points_to_win, 10);
        assert_eq!(config.starting_player, Some(PlayerId::new(1)));
    }

    #[test]
    #[should_panic(expected = "Winning threshold must be positive")]
    fn test_zero_threshold_rejected() {
        let _ = GameConfig::new().with_points_to_win(0);
    }

    #[test]
    fn test_serialization() {
        let config = GameConfig::new().with_starting_player(PlayerId::new(0));
        let json = serde_json::to_string(&config).unwrap();
        let back: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
