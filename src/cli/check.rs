//! Check command implementation

use std::process::ExitCode;

use super::{EXIT_ERROR, EXIT_SUCCESS};
use crate::bitsydata::Document;
use crate::config::BitsyConfig;
use crate::error::BitsyError;

/// Execute the check command
pub fn run_check(config: &BitsyConfig) -> ExitCode {
    let path = &config.game.data;

    let doc = match std::fs::read_to_string(path)
        .map_err(|e| BitsyError::file_access(path, e))
        .and_then(|text| Document::parse(&text))
    {
        Ok(doc) => doc,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let mut ok = true;
    for (room, tile) in doc.unresolved_references() {
        eprintln!("Error: room {} references undefined tile {}", room, tile);
        ok = false;
    }
    for tile in doc.duplicate_tiles() {
        eprintln!("Error: tile {} is defined more than once", tile);
        ok = false;
    }

    if !ok {
        return ExitCode::from(EXIT_ERROR);
    }

    println!(
        "{}: {} room(s), {} tile(s), all references resolved",
        path.display(),
        doc.rooms.len(),
        doc.tiles.len()
    );
    ExitCode::from(EXIT_SUCCESS)
}
