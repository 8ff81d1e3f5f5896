//! `artwall collections`: what is downloaded and what is rotating.

use clap::Args;
use colored::Colorize;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::cli::output;
use crate::config::get_config;
use crate::error::ArtwallError;
use crate::ipc::{self, IpcQuery};
use crate::modules::library::{CollectionSummary, list_collections};
use crate::modules::rotation::RotationStatus;

/// Arguments for `artwall collections`.
#[derive(Args, Debug)]
pub struct CollectionsArgs {
    /// Print the collections as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Tabled)]
struct CollectionRow {
    #[tabled(rename = "Collection")]
    name: String,
    #[tabled(rename = "Images")]
    images: usize,
    #[tabled(rename = "Daily Target")]
    progress: String,
    #[tabled(rename = "Complete")]
    percent: String,
    #[tabled(rename = "Rotating")]
    active: String,
}

/// Executes `artwall collections`.
///
/// # Errors
///
/// Returns an error if the library root cannot be read.
pub fn execute(args: &CollectionsArgs) -> Result<(), ArtwallError> {
    let root = get_config().library.root_dir();
    let collections = list_collections(&root).map_err(|e| {
        ArtwallError::IoError(format!("Cannot read library at {}: {e}", root.display()))
    })?;

    if args.json {
        output::print_highlighted_json(&serde_json::to_value(&collections)?);
        return Ok(());
    }

    if collections.is_empty() {
        println!("{}", format!("No collections in {}", root.display()).dimmed());
        return Ok(());
    }

    let active = active_collection();
    let rows: Vec<CollectionRow> =
        collections.iter().map(|c| row(c, active.as_deref())).collect();

    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(1..2)).with(Alignment::right()))
        .with(Modify::new(Columns::new(3..4)).with(Alignment::right()))
        .with(Modify::new(Columns::new(4..5)).with(Alignment::center()))
        .to_string();

    println!("{}", format!("Collections in {} ({})", root.display(), collections.len()).bold());
    println!("{table}");
    Ok(())
}

fn row(collection: &CollectionSummary, active: Option<&str>) -> CollectionRow {
    let progress = output::progress_bar(collection.images, 12);
    CollectionRow {
        name: output::truncate(&collection.name, 40),
        images: collection.images,
        progress: if collection.is_complete() { progress.green().to_string() } else { progress },
        percent: format!("{}%", collection.percent_complete()),
        active: output::format_bool(active == Some(collection.name.as_str())),
    }
}

/// Name of the rotating collection, if the daemon is up and rotating.
fn active_collection() -> Option<String> {
    let response = ipc::send_query(&IpcQuery::Status).ok()?;
    let status: RotationStatus = response.into_data().ok()?;
    status.collection
}
