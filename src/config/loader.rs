//! Configuration loading and discovery for `bitsy.toml`
//!
//! Provides functions to find, load, and merge configuration.

use super::schema::BitsyConfig;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the configuration file searched for.
pub const CONFIG_FILE: &str = "bitsy.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse bitsy.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    /// Override the room image directory
    pub rooms_dir: Option<PathBuf>,
    /// Force tile-only output
    pub only_tiles: Option<bool>,
    /// Override the bitsydata file
    pub data: Option<PathBuf>,
}

/// Find bitsy.toml by walking up from the current working directory.
pub fn find_config() -> Option<PathBuf> {
    env::current_dir().ok().and_then(find_config_from)
}

/// Find bitsy.toml by walking up from a specific directory.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join(CONFIG_FILE);
        if config_path.is_file() {
            return Some(config_path);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load configuration from a bitsy.toml file.
///
/// If a path is provided, loads from that file. Otherwise, uses
/// [`find_config`] to locate one. If no config file is found, returns the
/// defaults, relative to the current directory.
pub fn load_config(path: Option<&Path>) -> Result<BitsyConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => load_config_file(&p),
        None => Ok(BitsyConfig::default()),
    }
}

/// Load configuration from a specific file path.
///
/// Relative paths in the file are resolved against the file's directory.
fn load_config_file(path: &Path) -> Result<BitsyConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let mut config: BitsyConfig = toml::from_str(&contents)?;

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }

    if let Some(root) = project_root(path) {
        config.rooms.dir = resolve_path(root, &config.rooms.dir);
        config.game.data = resolve_path(root, &config.game.data);
    }

    log::debug!("loaded config from {}", path.display());
    Ok(config)
}

/// Merge CLI overrides into a configuration.
///
/// CLI arguments take precedence over config file values.
pub fn merge_cli_overrides(config: &mut BitsyConfig, overrides: &CliOverrides) {
    if let Some(ref dir) = overrides.rooms_dir {
        config.rooms.dir = dir.clone();
    }

    if let Some(only_tiles) = overrides.only_tiles {
        config.rooms.only_tiles = only_tiles;
    }

    if let Some(ref data) = overrides.data {
        config.game.data = data.clone();
    }
}

/// Get the project root directory from a config file path.
pub fn project_root(config_path: &Path) -> Option<&Path> {
    config_path.parent()
}

/// Resolve a path relative to the project root.
///
/// If the path is absolute, returns it unchanged.
/// If relative, joins it with the project root.
pub fn resolve_path(project_root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        project_root.join(path)
    }
}
