//! Rounds and per-player round records.
//!
//! A round record starts empty and is filled in field by field while the
//! round is played: bids first, then tricks taken, then card bonus points.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::player::{Player, PlayerId};

/// One player's entries for one round. Every field may still be unset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRoundData {
    /// Predicted number of tricks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bid: Option<u32>,

    /// Tricks actually won
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tricks_taken: Option<u32>,

    /// Bonus or malus from special cards, a multiple of 5
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bonus_card_points: Option<i32>,
}

impl PlayerRoundData {
    pub fn new(bid: u32, tricks_taken: u32) -> Self {
        Self {
            bid: Some(bid),
            tricks_taken: Some(tricks_taken),
            bonus_card_points: None,
        }
    }

    pub fn with_bonus(mut self, points: i32) -> Self {
        self.bonus_card_points = Some(points);
        self
    }

    /// A record is complete once bid and tricks taken are both entered.
    /// Bonus points are optional and count as 0 when unset.
    pub fn is_complete(&self) -> bool {
        self.bid.is_some() && self.tricks_taken.is_some()
    }

    /// No field entered yet.
    pub fn is_empty(&self) -> bool {
        self.bid.is_none() && self.tricks_taken.is_none() && self.bonus_card_points.is_none()
    }

    /// Merge the fields touched by `update` into this record.
    ///
    /// Does not normalize; see [`normalize_bonus_points`].
    pub fn merge(&mut self, update: &PlayerRoundDataUpdate) {
        if let Some(bid) = update.bid {
            self.bid = bid;
        }
        if let Some(tricks_taken) = update.tricks_taken {
            self.tricks_taken = tricks_taken;
        }
        if let Some(bonus) = update.bonus_card_points {
            self.bonus_card_points = bonus;
        }
    }
}

/// Bonus points only make sense once the player has taken a trick.
/// Clears `bonus_card_points` while `tricks_taken` is unset or zero.
pub fn normalize_bonus_points(data: &mut PlayerRoundData) {
    if data.bonus_card_points.is_some() && matches!(data.tricks_taken, None | Some(0)) {
        data.bonus_card_points = None;
    }
}

/// Partial update of a round record.
///
/// Each field is `None` to leave it untouched, `Some(None)` to clear it,
/// or `Some(Some(v))` to set it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerRoundDataUpdate {
    pub bid: Option<Option<u32>>,
    pub tricks_taken: Option<Option<u32>>,
    pub bonus_card_points: Option<Option<i32>>,
}

impl PlayerRoundDataUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bid(mut self, bid: u32) -> Self {
        self.bid = Some(Some(bid));
        self
    }

    pub fn clear_bid(mut self) -> Self {
        self.bid = Some(None);
        self
    }

    pub fn tricks_taken(mut self, tricks: u32) -> Self {
        self.tricks_taken = Some(Some(tricks));
        self
    }

    pub fn clear_tricks_taken(mut self) -> Self {
        self.tricks_taken = Some(None);
        self
    }

    pub fn bonus_card_points(mut self, points: i32) -> Self {
        self.bonus_card_points = Some(Some(points));
        self
    }

    pub fn clear_bonus_card_points(mut self) -> Self {
        self.bonus_card_points = Some(None);
        self
    }
}

/// One round of the game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Round {
    /// 1-based, unique; used for lookup only
    pub round_number: u32,

    /// Cards dealt to each player, also the maximum bid
    pub cards_dealt: u32,

    /// Records of every current player, keyed by player ID
    pub player_data: BTreeMap<PlayerId, PlayerRoundData>,
}

impl Round {
    pub fn new(round_number: u32, cards_dealt: u32, players: &[Player]) -> Self {
        Self {
            round_number,
            cards_dealt,
            player_data: empty_player_data(players),
        }
    }

    /// Get a player's record.
    pub fn data_for(&self, player_id: &PlayerId) -> Option<&PlayerRoundData> {
        self.player_data.get(player_id)
    }

    /// Check if nobody has entered anything for this round.
    pub fn is_empty(&self) -> bool {
        self.player_data.values().all(PlayerRoundData::is_empty)
    }
}

/// Empty records for the given players.
pub fn empty_player_data(players: &[Player]) -> BTreeMap<PlayerId, PlayerRoundData> {
    players
        .iter()
        .map(|p| (p.id.clone(), PlayerRoundData::default()))
        .collect()
}

/// Create `count` empty rounds numbered from 1, dealing `count` cards in the
/// first round down to 1 card in the last.
pub fn create_empty_rounds(count: u32, players: &[Player]) -> Vec<Round> {
    (1..=count)
        .map(|n| Round::new(n, count - n + 1, players))
        .collect()
}
