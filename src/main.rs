//! Bitsyroom - command-line tool for converting room images into bitsydata

use std::process::ExitCode;

use bitsyroom::cli;

fn main() -> ExitCode {
    cli::run()
}
