//! Rotation control commands.
//!
//! Every command is a single IPC round trip to the daemon, which owns the
//! rotation engine.

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use clap::Args;
use colored::Colorize;

use crate::cli::output;
use crate::error::ArtwallError;
use crate::ipc::{self, IpcQuery};
use crate::modules::rotation::{RotationCommand, RotationStatus};
use crate::platform::path::expand_and_resolve;

/// Arguments for `artwall start`.
#[derive(Args, Debug)]
pub struct StartArgs {
    /// Name of the collection, a directory under the library root.
    #[arg(value_name = "COLLECTION")]
    pub collection: String,

    /// Rotate this directory instead of `<library root>/<COLLECTION>`.
    #[arg(long, short, value_name = "PATH")]
    pub dir: Option<String>,
}

/// Arguments for `artwall status`.
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Print the raw status as JSON.
    #[arg(long, conflicts_with = "watch")]
    pub json: bool,

    /// Keep redrawing the status once per second until interrupted.
    #[arg(long, short)]
    pub watch: bool,
}

fn request(query: &IpcQuery) -> Result<RotationStatus, ArtwallError> {
    let response = ipc::send_query(query)?;
    Ok(response.into_data()?)
}

/// Executes `artwall start`.
///
/// # Errors
///
/// Returns an error if the daemon is unreachable or refuses the collection.
pub fn start(args: &StartArgs) -> Result<(), ArtwallError> {
    let collection = args.collection.trim();
    if collection.is_empty() {
        return Err(ArtwallError::InvalidArguments("Collection name cannot be empty".to_string()));
    }

    let directory = match &args.dir {
        Some(dir) => Some(resolve_dir(dir)?),
        None => None,
    };

    let status = request(&IpcQuery::Start { collection: collection.to_string(), directory })?;
    output::print_status(&status);
    Ok(())
}

fn resolve_dir(dir: &str) -> Result<PathBuf, ArtwallError> {
    let cwd = std::env::current_dir()?;
    let resolved = expand_and_resolve(dir, &cwd);
    if resolved.as_os_str().is_empty() {
        return Err(ArtwallError::InvalidArguments("--dir cannot be empty".to_string()));
    }
    Ok(resolved)
}

/// Executes `stop`, `pause`, `resume`, `next` or `previous`.
///
/// # Errors
///
/// Returns an error if the daemon is unreachable.
pub fn control(command: RotationCommand) -> Result<(), ArtwallError> {
    let status = request(&IpcQuery::from(command))?;
    output::print_status(&status);
    Ok(())
}

/// Executes `artwall status`.
///
/// # Errors
///
/// Returns an error if the daemon is unreachable.
pub fn status(args: &StatusArgs) -> Result<(), ArtwallError> {
    if args.watch {
        return watch();
    }

    let status = request(&IpcQuery::Status)?;
    if args.json {
        output::print_highlighted_json(&serde_json::to_value(&status)?);
    } else {
        output::print_status(&status);
    }
    Ok(())
}

/// Redraws a single status line every second, like a mini player.
fn watch() -> Result<(), ArtwallError> {
    let mut stdout = std::io::stdout();
    loop {
        let status = request(&IpcQuery::Status)?;
        let line = output::truncate(&output::status_summary(&status), 100);
        write!(stdout, "\r\x1b[2K{}", line.bold())?;
        stdout.flush()?;
        std::thread::sleep(Duration::from_secs(1));
    }
}
