//! Config CLI commands.

use std::path::PathBuf;

use clap::Subcommand;
use colored::Colorize;

use crate::cli::output;
use crate::config::template::{create_config_file, generate_config_template};
use crate::config::{config_paths, get_config, get_config_path};
use crate::error::ArtwallError;

/// Config management commands.
#[derive(Subcommand, Debug)]
#[command(next_display_order = None)]
pub enum ConfigCommands {
    /// Write a configuration file documenting every option.
    #[command(after_long_help = r"Examples:
  artwall config init                          # Create config at default location
  artwall config init --force                  # Overwrite existing config
  artwall config init --path ~/artwall.jsonc   # Create at custom path
  artwall config init --stdout                 # Print template to stdout")]
    Init {
        /// Overwrite an existing configuration file.
        #[arg(long, short)]
        force: bool,

        /// Where to write the file. Defaults to ~/.config/artwall/config.jsonc.
        #[arg(long, short, value_name = "PATH")]
        path: Option<PathBuf>,

        /// Print the template instead of writing a file.
        #[arg(long)]
        stdout: bool,
    },

    /// List the configuration search paths and mark the active one.
    Path,

    /// Print the effective configuration, defaults included.
    Show,
}

/// Execute config subcommands.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub fn execute(cmd: &ConfigCommands) -> Result<(), ArtwallError> {
    match cmd {
        ConfigCommands::Init { force, path, stdout } => {
            if *stdout {
                println!("{}", generate_config_template());
                Ok(())
            } else {
                init_config(*force, path.clone())
            }
        }
        ConfigCommands::Path => {
            show_config_paths();
            Ok(())
        }
        ConfigCommands::Show => {
            let config = get_config();
            if let Some(path) = get_config_path() {
                println!("{}", format!("// {}", path.display()).dimmed());
            }
            output::print_highlighted_json(&serde_json::to_value(config)?);
            Ok(())
        }
    }
}

fn init_config(force: bool, custom_path: Option<PathBuf>) -> Result<(), ArtwallError> {
    let config_path = custom_path
        .or_else(|| config_paths().into_iter().next())
        .unwrap_or_else(|| PathBuf::from("config.jsonc"));

    if config_path.exists() && !force {
        return Err(ArtwallError::ConfigError(format!(
            "Configuration file already exists at: {}\nUse --force to overwrite.",
            config_path.display()
        )));
    }

    create_config_file(&config_path).map_err(|e| {
        ArtwallError::ConfigError(format!(
            "Failed to create config file {}: {e}",
            config_path.display()
        ))
    })?;

    println!("Configuration file created at: {}", config_path.display());
    Ok(())
}

fn show_config_paths() {
    println!("Configuration file search paths (in priority order):\n");

    let mut found_config = false;
    for (i, path) in config_paths().iter().enumerate() {
        let exists = path.exists();
        let marker = if exists && !found_config {
            found_config = true;
            " (active)".green().to_string()
        } else if exists {
            " (exists)".dimmed().to_string()
        } else {
            String::new()
        };
        println!("  {}. {}{marker}", i + 1, path.display());
    }

    if !found_config {
        println!("\nNo configuration file found.");
        println!("Run 'artwall config init' to create one.");
    }
}
