//! Game state manager.
//!
//! Owns the current [`GameData`] snapshot of a session and the storage slot
//! it is persisted in. Each operation works on a copy of the snapshot and
//! only commits it when the operation succeeds, so callers never see a
//! partially applied change. Committed snapshots are written through to the
//! store immediately.

use chrono::{DateTime, Utc};
use tracing::{debug, error, info, warn};

use super::config::GameConfig;
use super::game::{GameData, GameError};
use super::player::{Player, PlayerId, PlayerInfo, PlayerUpdate};
use super::round::{PlayerRoundData, PlayerRoundDataUpdate, Round};
use super::storage::{ExternalChange, KeyValueStore, StorageEvent, StorageSlot};

/// Session state manager.
#[derive(Debug)]
pub struct GameManager<S> {
    data: GameData,
    slot: StorageSlot<S>,
    config: GameConfig,

    /// Last successful write to the store
    last_saved_at: Option<DateTime<Utc>>,

    /// Last change adopted from another context
    last_synced_at: Option<DateTime<Utc>>,
}

impl<S: KeyValueStore> GameManager<S> {
    /// Start a session from whatever `store` holds under the configured key.
    ///
    /// Falls back to a freshly generated game if nothing is stored or the
    /// stored value cannot be decoded.
    pub fn load(store: S, config: GameConfig) -> Self {
        let slot = StorageSlot::new(store, config.storage_key.clone());

        let data = match slot.load() {
            Ok(Some(data)) => {
                info!(
                    key = slot.key(),
                    players = data.players.len(),
                    rounds = data.rounds.len(),
                    "Loaded game data"
                );
                data
            }
            Ok(None) => {
                info!(key = slot.key(), "No saved game, starting a new one");
                GameData::generate(&config)
            }
            Err(e) => {
                error!(key = slot.key(), error = %e, "Discarding unreadable saved game");
                GameData::generate(&config)
            }
        };

        let mut manager = Self {
            data,
            slot,
            config,
            last_saved_at: None,
            last_synced_at: None,
        };
        manager.persist();
        manager
    }

    /// Current snapshot.
    pub fn data(&self) -> &GameData {
        &self.data
    }

    pub fn players(&self) -> &[Player] {
        &self.data.players
    }

    pub fn rounds(&self) -> &[Round] {
        &self.data.rounds
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        self.slot.store()
    }

    /// Bonus card point values offered for input.
    pub fn bonus_points_values(&self) -> Vec<i32> {
        self.config.bonus_points_values()
    }

    pub fn last_saved_at(&self) -> Option<DateTime<Utc>> {
        self.last_saved_at
    }

    pub fn last_synced_at(&self) -> Option<DateTime<Utc>> {
        self.last_synced_at
    }

    /// Apply `op` to a copy of the snapshot and commit it on success.
    fn commit<T>(
        &mut self,
        op: impl FnOnce(&mut GameData) -> Result<T, GameError>,
    ) -> Result<T, GameError> {
        let mut next = self.data.clone();
        let out = op(&mut next)?;
        self.data = next;
        self.persist();
        Ok(out)
    }

    /// Write the snapshot to the store. A failed write keeps the in-memory state.
    fn persist(&mut self) {
        match self.slot.save(&self.data) {
            Ok(()) => self.last_saved_at = Some(Utc::now()),
            Err(e) => error!(key = self.slot.key(), error = %e, "Failed to save game data"),
        }
    }

    pub fn add_player(&mut self, info: PlayerInfo) -> PlayerId {
        let mut next = self.data.clone();
        let id = next.add_player(info);
        self.data = next;
        self.persist();
        id
    }

    pub fn remove_player(&mut self, id: &PlayerId) -> Result<Player, GameError> {
        self.commit(|data| data.remove_player(id))
    }

    pub fn update_player(&mut self, id: &PlayerId, update: PlayerUpdate) -> Result<(), GameError> {
        self.commit(|data| data.update_player(id, update))
    }

    pub fn update_player_round_data(
        &mut self,
        player_id: &PlayerId,
        round_number: u32,
        update: PlayerRoundDataUpdate,
    ) -> Result<PlayerRoundData, GameError> {
        self.commit(|data| data.update_player_round_data(player_id, round_number, update))
    }

    /// Replace everything with a freshly generated game.
    pub fn reset_game(&mut self) {
        self.data = GameData::generate(&self.config);
        info!("Game reset");
        self.persist();
    }

    pub fn reset_scores(&mut self) {
        self.data.reset_scores();
        self.persist();
    }

    pub fn reverse_rounds(&mut self) {
        self.data.reverse_rounds();
        debug!("Rounds reversed");
        self.persist();
    }

    /// Replace the whole state, e.g. with an imported game.
    pub fn set_state(&mut self, data: GameData) -> Result<(), GameError> {
        data.check_invariants()?;
        self.data = data;
        self.persist();
        Ok(())
    }

    /// Adopt a change another context made to the store.
    ///
    /// Removal of the key and undecodable values are logged and ignored; the
    /// current state is kept. Returns `true` if the snapshot was replaced.
    pub fn sync_external(&mut self, event: &StorageEvent) -> bool {
        match self.slot.decode_change(event) {
            Ok(ExternalChange::Unrelated) => false,
            Ok(ExternalChange::Removed) => {
                warn!(
                    key = %event.key,
                    "Ignored external change: key was removed, which is not supported"
                );
                false
            }
            Ok(ExternalChange::Updated(data)) => {
                debug!(key = %event.key, observed_at = %event.observed_at, "Adopting external change");
                self.data = data;
                self.last_synced_at = Some(event.observed_at);
                true
            }
            Err(e) => {
                error!(key = %event.key, error = %e, "Ignored unreadable external change");
                false
            }
        }
    }
}
