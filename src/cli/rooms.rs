//! Rooms command implementation

use std::path::Path;
use std::process::ExitCode;

use super::{EXIT_ERROR, EXIT_SUCCESS};
use crate::config::BitsyConfig;
use crate::convert::{convert_dir, ConvertOptions};

/// Execute the rooms command
pub fn run_rooms(config: &BitsyConfig, output: Option<&Path>) -> ExitCode {
    let options = ConvertOptions { only_tiles: config.rooms.only_tiles };

    let text = match convert_dir(&config.rooms.dir, &options) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    match output {
        Some(path) => {
            if let Err(e) = std::fs::write(path, format!("{}\n", text)) {
                eprintln!("Error: Failed to write '{}': {}", path.display(), e);
                return ExitCode::from(EXIT_ERROR);
            }
            log::info!("wrote {}", path.display());
        }
        None => println!("{}", text),
    }

    ExitCode::from(EXIT_SUCCESS)
}
