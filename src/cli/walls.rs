//! Walls command implementation

use std::process::ExitCode;

use super::{EXIT_ERROR, EXIT_SUCCESS};
use crate::config::BitsyConfig;
use crate::error::BitsyError;
use crate::walls::{annotate, annotate_file};

/// Execute the walls command
pub fn run_walls(config: &BitsyConfig, dry_run: bool) -> ExitCode {
    let path = &config.game.data;

    if !dry_run {
        return match annotate_file(path) {
            Ok(_) => ExitCode::from(EXIT_SUCCESS),
            Err(e) => {
                eprintln!("Error: {}", e);
                ExitCode::from(EXIT_ERROR)
            }
        };
    }

    let result = std::fs::read_to_string(path)
        .map_err(|e| BitsyError::file_access(path, e))
        .and_then(|text| annotate(&text));

    match result {
        Ok(annotated) => {
            print!("{}", annotated.text);
            log::info!(
                "dry run: {} tile(s), {} wall(s), {} flag(s) rewritten, {} inserted",
                annotated.summary.tiles,
                annotated.summary.walls,
                annotated.summary.replaced,
                annotated.summary.inserted
            );
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}
