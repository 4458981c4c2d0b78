//! Configuration schema types for `bitsy.toml`
//!
//! Defines the structure and validation rules for the tool configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Room conversion section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomsConfig {
    /// Directory of room images
    #[serde(default = "default_rooms_dir")]
    pub dir: PathBuf,
    /// Only emit tile records
    #[serde(default)]
    pub only_tiles: bool,
}

impl Default for RoomsConfig {
    fn default() -> Self {
        Self { dir: default_rooms_dir(), only_tiles: false }
    }
}

fn default_rooms_dir() -> PathBuf {
    PathBuf::from("game/rooms")
}

/// Game data section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// The bitsydata file patched by `walls`
    #[serde(default = "default_game_data")]
    pub data: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self { data: default_game_data() }
    }
}

fn default_game_data() -> PathBuf {
    PathBuf::from("game/game.bitsydata")
}

/// Root configuration structure for `bitsy.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BitsyConfig {
    #[serde(default)]
    pub rooms: RoomsConfig,
    #[serde(default)]
    pub game: GameConfig,
}

/// A validation error for a config field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "rooms.dir")
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "bitsy.toml: '{}' {}", self.field, self.message)
    }
}

impl BitsyConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        if self.rooms.dir.as_os_str().is_empty() {
            errors.push(ConfigValidationError {
                field: "rooms.dir".to_string(),
                message: "must be a non-empty path".to_string(),
            });
        }

        if self.game.data.as_os_str().is_empty() {
            errors.push(ConfigValidationError {
                field: "game.data".to_string(),
                message: "must be a non-empty path".to_string(),
            });
        }

        errors
    }
}
