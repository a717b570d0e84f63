//! Player roster types.
//!
//! A player has an immutable opaque ID, an editable display name and an
//! editable theme color. Roster order is the column order of the score table.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::game::GameError;

/// Opaque unique player identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    /// Generate a fresh random ID.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for PlayerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An RGB color, one byte per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColorRgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl ColorRgb {
    pub const BLACK: ColorRgb = ColorRgb { r: 0, g: 0, b: 0 };

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Pick a uniformly random color.
    pub fn random() -> Self {
        let mut rng = rand::rng();
        Self {
            r: rng.random(),
            g: rng.random(),
            b: rng.random(),
        }
    }

    /// CSS `rgb()` notation.
    pub fn to_css(&self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// A player on the roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Never changes after creation
    pub id: PlayerId,

    /// Display name
    pub name: String,

    /// Theme color. Older saves have no color; those players get a random one.
    #[serde(default = "ColorRgb::random")]
    pub color: ColorRgb,
}

impl Player {
    /// Create a player with a fresh ID. A random color is used if none is given.
    pub fn new(name: impl Into<String>, color: Option<ColorRgb>) -> Self {
        Self {
            id: PlayerId::generate(),
            name: name.into(),
            color: color.unwrap_or_else(ColorRgb::random),
        }
    }

    /// Merge the fields present in `update` into this player.
    pub fn apply_update(&mut self, update: PlayerUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(color) = update.color {
            self.color = color;
        }
    }
}

/// Input for adding a player.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerInfo {
    pub name: String,
    pub color: Option<ColorRgb>,
}

impl PlayerInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: None,
        }
    }

    pub fn with_color(mut self, color: ColorRgb) -> Self {
        self.color = Some(color);
        self
    }
}

/// Partial update of a player's editable fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerUpdate {
    pub name: Option<String>,
    pub color: Option<ColorRgb>,
}

impl PlayerUpdate {
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            color: None,
        }
    }

    pub fn color(color: ColorRgb) -> Self {
        Self {
            name: None,
            color: Some(color),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.color.is_none()
    }
}

/// Roster navigation direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Prev,
}

/// Find the player next to `id` in roster order, wrapping around at both ends.
pub fn adjacent_player<'a>(
    players: &'a [Player],
    id: &PlayerId,
    direction: Direction,
) -> Result<&'a Player, GameError> {
    let index = players
        .iter()
        .position(|p| &p.id == id)
        .ok_or_else(|| GameError::PlayerNotFound(id.clone()))?;

    let len = players.len();
    let target = match direction {
        Direction::Next => (index + 1) % len,
        Direction::Prev => {
            if index == 0 {
                len - 1
            } else {
                index - 1
            }
        }
    };
    Ok(&players[target])
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn roster() -> Vec<Player> {
        ["Toni", "Alex", "Charlie"]
            .into_iter()
            .map(|name| Player::new(name, Some(ColorRgb::BLACK)))
            .collect()
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let a = PlayerId::generate();
        let b = PlayerId::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn test_apply_update_keeps_id() {
        let mut player = Player::new("Toni", Some(ColorRgb::BLACK));
        let id = player.id.clone();

        player.apply_update(PlayerUpdate::name("Antonia"));
        assert_eq!(player.name, "Antonia");
        assert_eq!(player.color, ColorRgb::BLACK);

        player.apply_update(PlayerUpdate::color(ColorRgb::new(255, 0, 0)));
        assert_eq!(player.name, "Antonia");
        assert_eq!(player.color, ColorRgb::new(255, 0, 0));
        assert_eq!(player.id, id);
    }

    #[test]
    fn test_adjacent_player_cycles() {
        let players = roster();

        let next = adjacent_player(&players, &players[0].id, Direction::Next).unwrap();
        assert_eq!(next.name, "Alex");

        let wrap_next = adjacent_player(&players, &players[2].id, Direction::Next).unwrap();
        assert_eq!(wrap_next.name, "Toni");

        let wrap_prev = adjacent_player(&players, &players[0].id, Direction::Prev).unwrap();
        assert_eq!(wrap_prev.name, "Charlie");

        let prev = adjacent_player(&players, &players[2].id, Direction::Prev).unwrap();
        assert_eq!(prev.name, "Alex");
    }

    #[test]
    fn test_adjacent_player_single() {
        let players = vec![Player::new("Solo", None)];
        let id = players[0].id.clone();
        assert_eq!(adjacent_player(&players, &id, Direction::Next).unwrap().id, id);
        assert_eq!(adjacent_player(&players, &id, Direction::Prev).unwrap().id, id);
    }

    #[test]
    fn test_adjacent_player_unknown() {
        let players = roster();
        let result = adjacent_player(&players, &PlayerId::from("nobody"), Direction::Next);
        assert!(matches!(result, Err(GameError::PlayerNotFound(_))));
    }

    #[test]
    fn test_color_css() {
        assert_eq!(ColorRgb::new(12, 34, 56).to_css(), "rgb(12, 34, 56)");
    }

    #[test]
    fn test_missing_color_is_filled() {
        let player: Player = serde_json::from_str(r#"{"id":"p1","name":"Toni"}"#).unwrap();
        assert_eq!(player.id, PlayerId::from("p1"));
        assert_eq!(player.name, "Toni");

        // The assigned color is written out and survives the next load.
        let json = serde_json::to_value(&player).unwrap();
        assert_eq!(json["color"]["r"], player.color.r);
        assert_eq!(json["color"]["g"], player.color.g);
        assert_eq!(json["color"]["b"], player.color.b);

        let reloaded: Player = serde_json::from_value(json).unwrap();
        assert_eq!(reloaded, player);
    }

    #[test]
    fn test_stored_color_is_kept() {
        let player: Player =
            serde_json::from_str(r#"{"id":"p1","name":"Toni","color":{"r":1,"g":2,"b":3}}"#)
                .unwrap();
        assert_eq!(player.color, ColorRgb::new(1, 2, 3));
    }
}
