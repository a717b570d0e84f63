//! Game configuration.

use serde::{Deserialize, Serialize};

use super::scoring::{self, DEFAULT_BONUS_SPAN};

/// Storage key the game state is persisted under.
pub const DEFAULT_STORAGE_KEY: &str = "gameData";

/// Players in a freshly generated game.
pub const DEFAULT_PLAYER_COUNT: usize = 2;

/// Rounds in a freshly generated game.
pub const DEFAULT_ROUND_COUNT: u32 = 10;

/// Settings for generating and persisting a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameConfig {
    /// Key used in the key-value store
    pub storage_key: String,

    /// Number of players in a new game
    pub player_count: usize,

    /// Number of rounds in a new game; also the cards dealt in round 1
    pub round_count: u32,

    /// Default players are named "<prefix> 1", "<prefix> 2", ...
    pub player_name_prefix: String,

    /// Bonus card points range over `-5 * span..=5 * span`
    pub bonus_span: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            player_count: DEFAULT_PLAYER_COUNT,
            round_count: DEFAULT_ROUND_COUNT,
            player_name_prefix: "Spieler".to_string(),
            bonus_span: DEFAULT_BONUS_SPAN,
        }
    }
}

impl GameConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    pub fn with_player_count(mut self, count: usize) -> Self {
        self.player_count = count;
        self
    }

    pub fn with_round_count(mut self, count: u32) -> Self {
        self.round_count = count;
        self
    }

    pub fn with_player_name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.player_name_prefix = prefix.into();
        self
    }

    pub fn with_bonus_span(mut self, span: u32) -> Self {
        self.bonus_span = span;
        self
    }

    /// Name of the n-th (1-based) default player.
    pub fn default_player_name(&self, n: usize) -> String {
        format!("{} {}", self.player_name_prefix, n)
    }

    /// Bonus card point values offered for input, per `bonus_span`.
    pub fn bonus_points_values(&self) -> Vec<i32> {
        scoring::bonus_points_values(self.bonus_span)
    }
}
