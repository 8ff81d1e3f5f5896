//! CLI module for ArtWall.
//!
//! Control commands talk to the running daemon over its Unix socket; the
//! `daemon` subcommand runs the daemon itself.

mod commands;
mod output;

use clap::Parser;
pub use commands::Cli;

use crate::error::ArtwallError;

/// Runs the CLI.
///
/// Parses command-line arguments and executes the appropriate command.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub fn run() -> Result<(), ArtwallError> {
    let cli = Cli::parse();
    cli.execute()
}
