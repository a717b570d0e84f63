//! Trick-taking score tracker state library.
//!
//! This crate provides the game state and scoring behind a score sheet for a
//! trick-taking card game played over a fixed sequence of rounds with
//! decreasing cards dealt.
//!
//! # Overview
//!
//! - **Game data** - Players and rounds, with per-player round records that
//!   fill in as the round is played (bid, tricks taken, bonus card points).
//!
//! - **Scoring** - Tricks taken plus 10 for an exact bid or minus 5 for a
//!   miss, plus bonus card points. Totals, standings and round plausibility
//!   checks for display.
//!
//! - **Manager** - Owns the current snapshot, applies operations atomically
//!   and writes every change through to a key-value store.
//!
//! # Design Principles
//!
//! 1. **Operations keep the invariants** - Every player has a record in every
//!    round and no round has records for removed players.
//!
//! 2. **Unknown IDs are errors** - A player ID or round number that does not
//!    resolve fails with `GameError`, consistently.
//!
//! 3. **No UI, no I/O** - The store is injected; the crate only speaks JSON
//!    to it.
//!
//! # Example
//!
//! ```rust
//! use trickscore_state::state::{
//!     GameConfig, GameManager, MemoryStore, PlayerInfo, PlayerRoundDataUpdate,
//! };
//!
//! let mut manager = GameManager::load(MemoryStore::new(), GameConfig::default());
//! let pid = manager.add_player(PlayerInfo::new("Charlie"));
//!
//! manager
//!     .update_player_round_data(&pid, 1, PlayerRoundDataUpdate::new().bid(3).tricks_taken(3))
//!     .unwrap();
//!
//! assert_eq!(manager.data().total_score(&pid), 13);
//! ```

pub mod state;

// Re-export everything from state module at crate root
pub use state::*;
