//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod check;
mod rooms;
mod walls;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::config::{load_config, merge_cli_overrides, BitsyConfig, CliOverrides};

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// Bitsyroom - convert pixel-art room images into bitsy game data
#[derive(Parser)]
#[command(name = "bitsyroom")]
#[command(about = "Bitsyroom - convert pixel-art room images into bitsy game data")]
#[command(version)]
pub struct Cli {
    /// Path to a bitsy.toml config file (default: search upward from the current directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert a directory of room images into bitsydata
    Rooms {
        /// Directory of room images (`<room>.png`, `<room>@<frame>.png`)
        dir: Option<PathBuf>,

        /// Only output tile records
        #[arg(long)]
        only_tiles: bool,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Mark dense tiles as walls in a bitsydata file, in place
    Walls {
        /// The bitsydata file to patch
        file: Option<PathBuf>,

        /// Print the patched text to stdout without rewriting the file
        #[arg(long)]
        dry_run: bool,
    },

    /// Check that every room references only defined tiles
    Check {
        /// The bitsydata file to check
        file: Option<PathBuf>,
    },
}

/// Install the stderr logger.
fn init_logging(verbose: bool) {
    use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};

    let level = if verbose { LevelFilter::Debug } else { LevelFilter::Info };
    let config = ConfigBuilder::new().set_time_level(LevelFilter::Off).build();
    // A logger may already be installed when running under a test harness
    let _ = TermLogger::init(level, config, TerminalMode::Stderr, ColorChoice::Auto);
}

/// Load config and apply command-line overrides.
fn resolve_config(path: Option<&std::path::Path>, overrides: &CliOverrides) -> Option<BitsyConfig> {
    match load_config(path) {
        Ok(mut config) => {
            merge_cli_overrides(&mut config, overrides);
            Some(config)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            None
        }
    }
}

/// Run the CLI application
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let overrides = match &cli.command {
        Commands::Rooms { dir, only_tiles, .. } => CliOverrides {
            rooms_dir: dir.clone(),
            only_tiles: only_tiles.then_some(true),
            ..Default::default()
        },
        Commands::Walls { file, .. } | Commands::Check { file } => {
            CliOverrides { data: file.clone(), ..Default::default() }
        }
    };

    let Some(config) = resolve_config(cli.config.as_deref(), &overrides) else {
        return ExitCode::from(EXIT_INVALID_ARGS);
    };

    match cli.command {
        Commands::Rooms { output, .. } => rooms::run_rooms(&config, output.as_deref()),
        Commands::Walls { dry_run, .. } => walls::run_walls(&config, dry_run),
        Commands::Check { .. } => check::run_check(&config),
    }
}
