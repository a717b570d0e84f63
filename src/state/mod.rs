//! State management module for the score tracker.
//!
//! - `player` - Roster entries, IDs, colors, roster navigation
//! - `round` - Rounds and per-player round records
//! - `scoring` - Round/total scores, plausibility checks, standings
//! - `game` - The `GameData` aggregate and its invariant-preserving operations
//! - `storage` - Key-value persistence and cross-context change events
//! - `manager` - Session owner tying a snapshot to its storage slot
//! - `config` - Game generation and storage settings
//! - `dialog` - Transient dialog state for the UI
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                      GameManager<S>                           │
//! │                                                               │
//! │  ┌──────────────────────────┐    ┌─────────────────────────┐  │
//! │  │        GameData          │    │     StorageSlot<S>      │  │
//! │  │                          │    │                         │  │
//! │  │  players: [Player]       │───▶│  key ──▶ JSON document  │  │
//! │  │  rounds:  [Round]        │save│                         │  │
//! │  │    player_data:          │    │  StorageEvent ──▶ sync  │  │
//! │  │      PlayerId ──▶ record │◀───│  (other contexts)       │  │
//! │  └──────────────────────────┘    └─────────────────────────┘  │
//! │               │                                               │
//! │               ▼                                               │
//! │     scoring: round_score, total_score, is_valid_round,        │
//! │              is_empty_column, ranking                         │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use trickscore_state::state::{GameConfig, GameManager, MemoryStore, PlayerRoundDataUpdate};
//!
//! let mut manager = GameManager::load(MemoryStore::new(), GameConfig::default());
//! let pid = manager.players()[0].id.clone();
//! manager.update_player_round_data(&pid, 1, PlayerRoundDataUpdate::new().bid(3))?;
//! ```

pub mod config;
pub mod dialog;
pub mod game;
pub mod manager;
pub mod player;
pub mod round;
pub mod scoring;
pub mod storage;

// Re-export commonly used types
pub use config::{GameConfig, DEFAULT_STORAGE_KEY};
pub use dialog::{DialogState, ScoreInputTarget};
pub use game::{GameData, GameError, InvariantViolation};
pub use manager::GameManager;
pub use player::{adjacent_player, ColorRgb, Direction, Player, PlayerId, PlayerInfo, PlayerUpdate};
pub use round::{
    create_empty_rounds, normalize_bonus_points, PlayerRoundData, PlayerRoundDataUpdate, Round,
};
pub use scoring::{
    bonus_points_values, is_empty_column, is_plausible_round, is_valid_round, possible_bids,
    ranking, round_score, total_score, Standing,
};
pub use storage::{ExternalChange, KeyValueStore, MemoryStore, StorageError, StorageEvent, StorageSlot};
