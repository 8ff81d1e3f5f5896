//! CLI command definitions using Clap.
//!
//! Commands are organized into submodules:
//!
//! - `collections` - Downloaded collections and their completeness
//! - `config_cmd` - Configuration file management
//! - `rotation` - Start, stop and steer the rotation running in the daemon

use std::io;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Generator, Shell, generate};

use crate::constants::APP_NAME;
use crate::error::ArtwallError;
use crate::modules::rotation::RotationCommand;
use crate::{config, daemon, schema};

pub mod collections;
pub mod config_cmd;
pub mod rotation;

pub use collections::CollectionsArgs;
pub use config_cmd::ConfigCommands;
pub use rotation::{StartArgs, StatusArgs};

/// Application version from Cargo.toml.
const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// ArtWall - rotate curated fine-art collections as your wallpaper.
#[derive(Parser, Debug)]
#[command(name = "artwall")]
#[command(author, version = APP_VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to a custom configuration file.
    ///
    /// Overrides the default configuration file search paths.
    /// Supports JSONC format (JSON with comments).
    #[arg(long, short, global = true, value_name = "PATH")]
    pub config: Option<String>,

    /// Log debug output to stderr.
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
#[command(next_display_order = None)]
pub enum Commands {
    /// Run the rotation daemon in the foreground.
    ///
    /// This is what `artwall` does without arguments. Other commands talk to
    /// the daemon over a Unix socket.
    Daemon,

    /// Start rotating a collection.
    ///
    /// Replaces any rotation already running.
    #[command(after_long_help = r"Examples:
  artwall start Impressionism                  # <library root>/Impressionism
  artwall start Ukiyo-e --dir ~/Art/ukiyo-e    # Any directory of images")]
    Start(StartArgs),

    /// Stop the rotation. The current wallpaper stays on screen.
    Stop,

    /// Freeze the countdown.
    Pause,

    /// Continue a paused countdown.
    Resume,

    /// Show the next image now.
    Next,

    /// Show the previous image now.
    Previous,

    /// Show the rotation status.
    Status(StatusArgs),

    /// List the collections in the library.
    Collections(CollectionsArgs),

    /// Configuration file management commands.
    ///
    /// Initialize, locate and print the configuration file.
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Output the configuration JSON Schema.
    ///
    /// Outputs a JSON Schema to stdout that describes the structure of the
    /// ArtWall configuration file. Can be redirected to a file for use with
    /// editors that support JSON Schema validation.
    Schema,

    /// Generate shell completions.
    ///
    /// Usage:
    ///   eval "$(artwall completions --shell zsh)"
    ///   artwall completions --shell fish > ~/.config/fish/completions/artwall.fish
    Completions {
        /// The shell to generate completions for.
        #[arg(long, short, value_enum)]
        shell: Shell,
    },
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command execution fails.
    pub fn execute(&self) -> Result<(), ArtwallError> {
        if let Some(ref path) = self.config {
            let path_buf = std::path::PathBuf::from(path);
            if !path_buf.exists() {
                return Err(ArtwallError::ConfigError(format!(
                    "Configuration file not found: {path}"
                )));
            }
            config::set_custom_config_path(path_buf);
        }

        if !matches!(self.command, Commands::Daemon) {
            crate::init_logging(if self.verbose { "artwall=debug" } else { "artwall=warn" });
        }

        match &self.command {
            Commands::Daemon => daemon::run(self.verbose),
            Commands::Start(args) => rotation::start(args),
            Commands::Stop => rotation::control(RotationCommand::Stop),
            Commands::Pause => rotation::control(RotationCommand::Pause),
            Commands::Resume => rotation::control(RotationCommand::Resume),
            Commands::Next => rotation::control(RotationCommand::Next),
            Commands::Previous => rotation::control(RotationCommand::Previous),
            Commands::Status(args) => rotation::status(args),
            Commands::Collections(args) => collections::execute(args),
            Commands::Config(cmd) => config_cmd::execute(cmd),

            Commands::Schema => {
                println!("{}", schema::generate_schema_json());
                Ok(())
            }

            Commands::Completions { shell } => {
                Self::print_completions(*shell);
                Ok(())
            }
        }
    }

    fn print_completions<G: Generator>(generator: G) {
        let mut cmd = Self::command();
        generate(generator, &mut cmd, APP_NAME, &mut io::stdout());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_daemon() {
        let cli = Cli::try_parse_from(["artwall", "daemon"]).unwrap();
        assert!(matches!(cli.command, Commands::Daemon));
    }

    #[test]
    fn test_cli_parses_start() {
        let cli = Cli::try_parse_from(["artwall", "start", "Impressionism"]).unwrap();
        match cli.command {
            Commands::Start(args) => {
                assert_eq!(args.collection, "Impressionism");
                assert!(args.dir.is_none());
            }
            _ => panic!("Expected Start command"),
        }
    }

    #[test]
    fn test_cli_parses_start_with_dir() {
        let cli =
            Cli::try_parse_from(["artwall", "start", "Ukiyo-e", "--dir", "~/Art/ukiyo-e"]).unwrap();
        match cli.command {
            Commands::Start(args) => assert_eq!(args.dir.as_deref(), Some("~/Art/ukiyo-e")),
            _ => panic!("Expected Start command"),
        }
    }

    #[test]
    fn test_cli_start_requires_collection() {
        assert!(Cli::try_parse_from(["artwall", "start"]).is_err());
    }

    #[test]
    fn test_cli_parses_control_commands() {
        for (arg, expected) in [
            ("stop", "Stop"),
            ("pause", "Pause"),
            ("resume", "Resume"),
            ("next", "Next"),
            ("previous", "Previous"),
        ] {
            let cli = Cli::try_parse_from(["artwall", arg]).unwrap();
            assert_eq!(format!("{:?}", cli.command), expected);
        }
    }

    #[test]
    fn test_cli_parses_status_flags() {
        let cli = Cli::try_parse_from(["artwall", "status", "--json"]).unwrap();
        match cli.command {
            Commands::Status(args) => {
                assert!(args.json);
                assert!(!args.watch);
            }
            _ => panic!("Expected Status command"),
        }

        let cli = Cli::try_parse_from(["artwall", "status", "-w"]).unwrap();
        match cli.command {
            Commands::Status(args) => assert!(args.watch),
            _ => panic!("Expected Status command"),
        }
    }

    #[test]
    fn test_cli_status_json_conflicts_with_watch() {
        assert!(Cli::try_parse_from(["artwall", "status", "--json", "--watch"]).is_err());
    }

    #[test]
    fn test_cli_parses_collections_json() {
        let cli = Cli::try_parse_from(["artwall", "collections", "--json"]).unwrap();
        match cli.command {
            Commands::Collections(args) => assert!(args.json),
            _ => panic!("Expected Collections command"),
        }
    }

    #[test]
    fn test_cli_parses_config_init() {
        let cli = Cli::try_parse_from(["artwall", "config", "init", "--force"]).unwrap();
        match cli.command {
            Commands::Config(ConfigCommands::Init { force, path, stdout }) => {
                assert!(force);
                assert!(path.is_none());
                assert!(!stdout);
            }
            _ => panic!("Expected Config Init command"),
        }
    }

    #[test]
    fn test_cli_parses_config_show() {
        let cli = Cli::try_parse_from(["artwall", "config", "show"]).unwrap();
        assert!(matches!(cli.command, Commands::Config(ConfigCommands::Show)));
    }

    #[test]
    fn test_cli_parses_schema() {
        let cli = Cli::try_parse_from(["artwall", "schema"]).unwrap();
        assert!(matches!(cli.command, Commands::Schema));
    }

    #[test]
    fn test_cli_parses_completions_zsh() {
        let cli = Cli::try_parse_from(["artwall", "completions", "--shell", "zsh"]).unwrap();
        match cli.command {
            Commands::Completions { shell } => assert_eq!(shell, Shell::Zsh),
            _ => panic!("Expected Completions command"),
        }
    }

    #[test]
    fn test_cli_parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "artwall",
            "status",
            "--config",
            "/path/to/config.jsonc",
            "--verbose",
        ])
        .unwrap();
        assert_eq!(cli.config, Some("/path/to/config.jsonc".to_string()));
        assert!(cli.verbose);
    }

    #[test]
    fn test_cli_rejects_unknown_command() {
        assert!(Cli::try_parse_from(["artwall", "wallpaper"]).is_err());
    }

    #[test]
    fn test_cli_definition_is_consistent() { Cli::command().debug_assert(); }

    #[test]
    fn test_app_version_is_not_empty() {
        assert!(!APP_VERSION.is_empty());
    }
}
