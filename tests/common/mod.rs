use tracing_subscriber::EnvFilter;
use trickscore_state::state::{GameConfig, GameManager, MemoryStore, PlayerId, PlayerRoundDataUpdate};

/// Install a test subscriber once; honors `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A fresh session over an empty in-memory store.
pub fn new_session(config: GameConfig) -> GameManager<MemoryStore> {
    init_tracing();
    GameManager::load(MemoryStore::new(), config)
}

/// Enter a complete record for a player.
pub fn enter(
    manager: &mut GameManager<MemoryStore>,
    player_id: &PlayerId,
    round_number: u32,
    bid: u32,
    tricks_taken: u32,
) {
    manager
        .update_player_round_data(
            player_id,
            round_number,
            PlayerRoundDataUpdate::new().bid(bid).tricks_taken(tricks_taken),
        )
        .unwrap();
}
