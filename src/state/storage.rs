//! Persistence of game data in a key-value store.
//!
//! The store is whatever the host provides (browser local storage, a file,
//! memory in tests). Game data is kept as one JSON document under one key.
//! Other contexts sharing the store report their writes as [`StorageEvent`]s.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};

use super::game::{GameData, InvariantViolation};

/// String key-value store.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError>;
}

/// In-memory store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding one entry.
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut entries = HashMap::new();
        entries.insert(key.into(), value.into());
        Self { entries }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}

/// A change to the store made by another context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageEvent {
    pub key: String,

    /// New raw value; `None` if the key was removed
    pub new_value: Option<String>,

    /// When the change was observed
    pub observed_at: DateTime<Utc>,
}

impl StorageEvent {
    pub fn changed(key: impl Into<String>, new_value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            new_value: Some(new_value.into()),
            observed_at: Utc::now(),
        }
    }

    pub fn removed(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            new_value: None,
            observed_at: Utc::now(),
        }
    }
}

/// Outcome of decoding a [`StorageEvent`] for a slot.
#[derive(Debug)]
pub enum ExternalChange {
    /// Event concerns a different key
    Unrelated,
    /// Key was removed
    Removed,
    /// New game data
    Updated(GameData),
}

/// The game data entry of a store.
#[derive(Debug)]
pub struct StorageSlot<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> StorageSlot<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Load saved game data.
    ///
    /// `Ok(None)` if nothing is stored yet.
    pub fn load(&self) -> Result<Option<GameData>, StorageError> {
        match self.store.get(&self.key) {
            Some(raw) => decode(&raw).map(Some),
            None => Ok(None),
        }
    }

    /// Encode and store game data.
    pub fn save(&mut self, data: &GameData) -> Result<(), StorageError> {
        let raw = encode(data)?;
        self.store.set(&self.key, raw)
    }

    /// Interpret a change notification from another context.
    pub fn decode_change(&self, event: &StorageEvent) -> Result<ExternalChange, StorageError> {
        if event.key != self.key {
            return Ok(ExternalChange::Unrelated);
        }
        match &event.new_value {
            None => Ok(ExternalChange::Removed),
            Some(raw) => decode(raw).map(ExternalChange::Updated),
        }
    }
}

/// Encode game data as JSON.
pub fn encode(data: &GameData) -> Result<String, StorageError> {
    serde_json::to_string(data).map_err(StorageError::Encode)
}

/// Decode game data from JSON and check its invariants.
pub fn decode(raw: &str) -> Result<GameData, StorageError> {
    let data: GameData = serde_json::from_str(raw).map_err(StorageError::Decode)?;
    data.check_invariants().map_err(StorageError::InvalidShape)?;
    Ok(data)
}

/// Storage errors.
#[derive(Debug)]
pub enum StorageError {
    /// Stored value is not valid game data JSON
    Decode(serde_json::Error),
    /// Stored value parses but breaks an invariant
    InvalidShape(InvariantViolation),
    Encode(serde_json::Error),
    /// Store rejected the write
    Write(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Decode(e) => write!(f, "Failed to decode game data: {}", e),
            Self::InvalidShape(v) => write!(f, "Stored game data is invalid: {}", v.reason),
            Self::Encode(e) => write!(f, "Failed to encode game data: {}", e),
            Self::Write(reason) => write!(f, "Failed to write to store: {}", reason),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Decode(e) | Self::Encode(e) => Some(e),
            Self::InvalidShape(v) => Some(v),
            Self::Write(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::config::GameConfig;
    use crate::state::player::{ColorRgb, PlayerId, PlayerInfo};
    use crate::state::round::PlayerRoundDataUpdate;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    const SAMPLE: &str = r#"{
        "players": [
            {"id": "p1-uuid", "name": "Toni", "color": {"r": 0, "g": 0, "b": 0}},
            {"id": "p2-uuid", "name": "Alex", "color": {"r": 10, "g": 20, "b": 30}}
        ],
        "rounds": [
            {
                "roundNumber": 1,
                "cardsDealt": 2,
                "playerData": {
                    "p1-uuid": {"bid": 1, "tricksTaken": 1, "bonusCardPoints": 5},
                    "p2-uuid": {"bid": 0}
                }
            },
            {"roundNumber": 2, "cardsDealt": 1, "playerData": {"p1-uuid": {}, "p2-uuid": {}}}
        ]
    }"#;

    #[test]
    fn test_decode_sample() {
        let data = decode(SAMPLE).unwrap();
        assert_eq!(data.players.len(), 2);
        assert_eq!(data.players[1].color, ColorRgb::new(10, 20, 30));

        let p1 = PlayerId::from("p1-uuid");
        let round = data.round(1).unwrap();
        assert_eq!(round.data_for(&p1).unwrap().bonus_card_points, Some(5));
        assert_eq!(data.total_score(&p1), 16);
    }

    #[test]
    fn test_decode_rejects_malformed() {
        assert!(matches!(decode("{not json"), Err(StorageError::Decode(_))));
        assert!(matches!(
            decode(r#"{"players": []}"#),
            Err(StorageError::Decode(_))
        ));
    }

    #[test]
    fn test_decode_rejects_dangling_player_data() {
        let raw = r#"{
            "players": [{"id": "a", "name": "A", "color": {"r": 0, "g": 0, "b": 0}}],
            "rounds": [{"roundNumber": 1, "cardsDealt": 1, "playerData": {"a": {}, "b": {}}}]
        }"#;
        assert!(matches!(decode(raw), Err(StorageError::InvalidShape(_))));
    }

    #[test]
    fn test_slot_load_and_save() {
        let mut slot = StorageSlot::new(MemoryStore::new(), "gameData");
        assert!(slot.load().unwrap().is_none());

        let data = GameData::default();
        slot.save(&data).unwrap();
        assert_eq!(slot.load().unwrap(), Some(data));
    }

    #[test]
    fn test_decode_change() {
        let slot = StorageSlot::new(MemoryStore::new(), "gameData");

        let unrelated = slot
            .decode_change(&StorageEvent::changed("other", "{}"))
            .unwrap();
        assert!(matches!(unrelated, ExternalChange::Unrelated));

        let removed = slot
            .decode_change(&StorageEvent::removed("gameData"))
            .unwrap();
        assert!(matches!(removed, ExternalChange::Removed));

        let updated = slot
            .decode_change(&StorageEvent::changed("gameData", SAMPLE))
            .unwrap();
        assert!(matches!(updated, ExternalChange::Updated(ref d) if d.players.len() == 2));

        assert!(slot
            .decode_change(&StorageEvent::changed("gameData", "garbage"))
            .is_err());
    }

    proptest! {
        #[test]
        fn prop_json_round_trip(
            extra_players in 0usize..4,
            rounds in 1u32..8,
            entries in prop::collection::vec((0u32..8, 0u32..8, -3i32..=3), 0..10),
        ) {
            let mut data = GameData::generate(&GameConfig::default().with_round_count(rounds));
            for i in 0..extra_players {
                data.add_player(PlayerInfo::new(format!("Extra {}", i)));
            }
            let ids: Vec<PlayerId> = data.players.iter().map(|p| p.id.clone()).collect();
            for (i, (bid, tricks, bonus)) in entries.into_iter().enumerate() {
                let id = &ids[i % ids.len()];
                let round_number = (i as u32 % rounds) + 1;
                let update = PlayerRoundDataUpdate::new()
                    .bid(bid)
                    .tricks_taken(tricks)
                    .bonus_card_points(bonus * 5);
                data.update_player_round_data(id, round_number, update).unwrap();
            }
            data.reverse_rounds();

            let raw = encode(&data).unwrap();
            prop_assert_eq!(decode(&raw).unwrap(), data);
        }
    }
}
