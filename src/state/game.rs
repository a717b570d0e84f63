//! Game data aggregate.
//!
//! `GameData` holds the roster and the rounds and is the unit of persistence.
//! Every mutation here keeps two invariants:
//!
//! 1. Every player ID in a round's `player_data` belongs to a current player.
//! 2. Every current player has a record (possibly empty) in every round.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use super::config::GameConfig;
use super::player::{Player, PlayerId, PlayerInfo, PlayerUpdate};
use super::round::{
    create_empty_rounds, empty_player_data, normalize_bonus_points, PlayerRoundData,
    PlayerRoundDataUpdate, Round,
};
use super::scoring::{self, Standing};

/// Roster and rounds of one game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameData {
    pub players: Vec<Player>,
    pub rounds: Vec<Round>,
}

impl Default for GameData {
    fn default() -> Self {
        Self::generate(&GameConfig::default())
    }
}

impl GameData {
    /// Generate a fresh game: default players and empty rounds with cards
    /// dealt counting down from the round count to 1.
    pub fn generate(config: &GameConfig) -> Self {
        let players: Vec<Player> = (1..=config.player_count)
            .map(|n| Player::new(config.default_player_name(n), None))
            .collect();
        let rounds = create_empty_rounds(config.round_count, &players);
        Self { players, rounds }
    }

    /// Get a player by ID.
    pub fn player(&self, id: &PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| &p.id == id)
    }

    /// Get a round by its round number.
    pub fn round(&self, round_number: u32) -> Option<&Round> {
        self.rounds.iter().find(|r| r.round_number == round_number)
    }

    fn player_index(&self, id: &PlayerId) -> Result<usize, GameError> {
        self.players
            .iter()
            .position(|p| &p.id == id)
            .ok_or_else(|| GameError::PlayerNotFound(id.clone()))
    }

    fn round_index(&self, round_number: u32) -> Result<usize, GameError> {
        self.rounds
            .iter()
            .position(|r| r.round_number == round_number)
            .ok_or(GameError::RoundNotFound(round_number))
    }

    /// Append a new player with a fresh ID and give them an empty record in
    /// every round.
    pub fn add_player(&mut self, info: PlayerInfo) -> PlayerId {
        let player = Player::new(info.name, info.color);
        let id = player.id.clone();

        for round in &mut self.rounds {
            round
                .player_data
                .insert(id.clone(), PlayerRoundData::default());
        }
        self.players.push(player);

        debug!(player_id = %id, "Player added");
        id
    }

    /// Remove a player and their records from every round.
    pub fn remove_player(&mut self, id: &PlayerId) -> Result<Player, GameError> {
        let index = self.player_index(id)?;
        let player = self.players.remove(index);

        for round in &mut self.rounds {
            round.player_data.remove(id);
        }

        debug!(player_id = %id, "Player removed");
        Ok(player)
    }

    /// Change a player's name and/or color.
    pub fn update_player(&mut self, id: &PlayerId, update: PlayerUpdate) -> Result<(), GameError> {
        let index = self.player_index(id)?;
        self.players[index].apply_update(update);
        debug!(player_id = %id, "Player updated");
        Ok(())
    }

    /// Merge `update` into a player's record for a round, then normalize the
    /// bonus points. Returns the resulting record.
    ///
    /// # Panics
    ///
    /// If both player and round exist but the round has no record for the
    /// player. A round lost track of a current player; that is a bug, not an
    /// input error.
    pub fn update_player_round_data(
        &mut self,
        player_id: &PlayerId,
        round_number: u32,
        update: PlayerRoundDataUpdate,
    ) -> Result<PlayerRoundData, GameError> {
        let round_index = self.round_index(round_number)?;
        self.player_index(player_id)?;

        let Some(data) = self.rounds[round_index].player_data.get_mut(player_id) else {
            let violation = InvariantViolation::new(format!(
                "no round data for player {player_id} in round {round_number}"
            ));
            error!(%player_id, round_number, "{violation}");
            panic!("{violation}");
        };

        data.merge(&update);
        normalize_bonus_points(data);

        debug!(%player_id, round_number, ?data, "Round data updated");
        Ok(*data)
    }

    /// Clear every round record while keeping players and the round layout.
    pub fn reset_scores(&mut self) {
        for round in &mut self.rounds {
            round.player_data = empty_player_data(&self.players);
        }
        debug!(rounds = self.rounds.len(), "Scores reset");
    }

    /// Reverse the display order of the rounds. Round numbers are kept.
    pub fn reverse_rounds(&mut self) {
        self.rounds.reverse();
    }

    /// Total score of a player.
    pub fn total_score(&self, id: &PlayerId) -> i64 {
        scoring::total_score(id, &self.rounds)
    }

    /// Current standings.
    pub fn standings(&self) -> Vec<Standing> {
        scoring::ranking(&self.players, &self.rounds)
    }

    /// Verify the structural invariants.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let mut player_ids = HashSet::new();
        for player in &self.players {
            if !player_ids.insert(&player.id) {
                return Err(InvariantViolation::new(format!(
                    "duplicate player id {}",
                    player.id
                )));
            }
        }

        let mut round_numbers = HashSet::new();
        for round in &self.rounds {
            if !round_numbers.insert(round.round_number) {
                return Err(InvariantViolation::new(format!(
                    "duplicate round number {}",
                    round.round_number
                )));
            }

            if let Some(stray) = round.player_data.keys().find(|id| !player_ids.contains(id)) {
                return Err(InvariantViolation::new(format!(
                    "round {} has data for unknown player {}",
                    round.round_number, stray
                )));
            }

            if let Some(missing) = self
                .players
                .iter()
                .find(|p| !round.player_data.contains_key(&p.id))
            {
                return Err(InvariantViolation::new(format!(
                    "round {} has no data for player {}",
                    round.round_number, missing.id
                )));
            }
        }

        Ok(())
    }
}

/// Game errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    PlayerNotFound(PlayerId),
    RoundNotFound(u32),
    InvalidState(InvariantViolation),
}

impl std::fmt::Display for GameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PlayerNotFound(id) => write!(f, "Player not found: {}", id),
            Self::RoundNotFound(n) => write!(f, "Round not found: {}", n),
            Self::InvalidState(v) => write!(f, "Invalid game state: {}", v.reason),
        }
    }
}

impl std::error::Error for GameError {}

impl From<InvariantViolation> for GameError {
    fn from(v: InvariantViolation) -> Self {
        Self::InvalidState(v)
    }
}

/// A structural invariant of [`GameData`] does not hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    pub reason: String,
}

impl InvariantViolation {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invariant violation: {}", self.reason)
    }
}

impl std::error::Error for InvariantViolation {}
