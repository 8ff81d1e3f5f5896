//! Configuration types for ArtWall.
//!
//! The configuration file supports JSONC format (JSON with comments).
//! Both single-line (`//`) and multi-line (`/* */`) comments are allowed.

use std::fs;
use std::path::{Component, Path, PathBuf};
use std::time::Duration;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::modules::rotation::{DEFAULT_INTERVAL_SECS, EngineSettings};
use crate::platform::path::expand;

/// Default location of downloaded collections.
pub const DEFAULT_LIBRARY_ROOT: &str = "~/Pictures/ArtWall";

/// Default apply timeout in seconds.
pub const DEFAULT_APPLY_TIMEOUT_SECS: u64 = 10;

/// Where collections live on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct LibraryConfig {
    /// Directory holding one subdirectory per collection. Supports `~`.
    pub root: String,

    /// Collection started automatically when the daemon launches.
    ///
    /// Leave empty to start idle.
    pub default_collection: String,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            root: DEFAULT_LIBRARY_ROOT.to_string(),
            default_collection: String::new(),
        }
    }
}

impl LibraryConfig {
    /// The library root with `~` expanded.
    #[must_use]
    pub fn root_dir(&self) -> PathBuf { expand(&self.root) }

    /// Directory of the named collection under the library root.
    ///
    /// Returns `None` unless `name` is a single plain path component, so a
    /// name can never point outside the root.
    #[must_use]
    pub fn collection_dir(&self, name: &str) -> Option<PathBuf> {
        let mut components = Path::new(name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(part)), None) => Some(self.root_dir().join(part)),
            _ => None,
        }
    }

    /// The collection to auto-start, if one is configured.
    #[must_use]
    pub fn default_collection(&self) -> Option<&str> {
        let name = self.default_collection.trim();
        (!name.is_empty()).then_some(name)
    }
}

/// Rotation timing and presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct RotationConfig {
    /// Seconds between automatic wallpaper changes. Default: 1800 (30 minutes).
    pub interval: u64,

    /// Seconds a single wallpaper change may take before it counts as failed.
    pub apply_timeout: u64,

    /// Point the slideshow screensaver at the rotating collection.
    pub screensaver: bool,
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL_SECS,
            apply_timeout: DEFAULT_APPLY_TIMEOUT_SECS,
            screensaver: true,
        }
    }
}

impl RotationConfig {
    /// Converts to engine settings, clamping zero values to one second.
    #[must_use]
    pub fn engine_settings(&self) -> EngineSettings {
        if self.interval == 0 {
            tracing::warn!("rotation.interval of 0 is invalid, using 1 second");
        }
        if self.apply_timeout == 0 {
            tracing::warn!("rotation.applyTimeout of 0 is invalid, using 1 second");
        }

        EngineSettings {
            interval_secs: self.interval.max(1),
            apply_timeout: Duration::from_secs(self.apply_timeout.max(1)),
        }
    }
}

/// Root configuration structure for ArtWall.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ArtwallConfig {
    /// Collection library location.
    pub library: LibraryConfig,

    /// Rotation behaviour.
    pub rotation: RotationConfig,
}

/// Errors that can occur when loading the configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// No configuration file was found in any of the expected locations.
    #[error(
        "No configuration file found. Expected at ~/.config/artwall/config.json, \
         ~/Library/Application Support/artwall/config.json, or ~/.artwall.json"
    )]
    NotFound,

    /// The configuration file exists but could not be read.
    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// The configuration file contains invalid JSON.
    #[error("Failed to parse configuration file: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Configuration file names to search for (in priority order).
const CONFIG_FILE_NAMES: &[&str] = &["config.jsonc", "config.json"];

/// Dotfile names in the home directory.
const HOME_CONFIG_FILE_NAMES: &[&str] = &[".artwall.jsonc", ".artwall.json"];

const APP_DIR: &str = "artwall";

/// Returns the possible configuration file paths in priority order.
///
/// 1. `$XDG_CONFIG_HOME/artwall/config.jsonc` or `config.json` (if set)
/// 2. `~/.config/artwall/config.jsonc` or `config.json`
/// 3. `~/Library/Application Support/artwall/config.jsonc` or `config.json`
/// 4. `~/.artwall.jsonc` or `~/.artwall.json`
#[must_use]
pub fn config_paths() -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = Vec::new();
    let mut push_dir = |dir: PathBuf| {
        for filename in CONFIG_FILE_NAMES {
            let path = dir.join(filename);
            if !paths.contains(&path) {
                paths.push(path);
            }
        }
    };

    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME")
        && !xdg_config.is_empty()
    {
        push_dir(PathBuf::from(xdg_config).join(APP_DIR));
    }

    if let Some(home) = dirs::home_dir() {
        push_dir(home.join(".config").join(APP_DIR));
    }

    if let Some(config_dir) = dirs::config_dir() {
        push_dir(config_dir.join(APP_DIR));
    }

    if let Some(home) = dirs::home_dir() {
        for filename in HOME_CONFIG_FILE_NAMES {
            paths.push(home.join(filename));
        }
    }

    paths
}

/// Parses a JSONC document into a configuration.
///
/// # Errors
///
/// Returns `ConfigError::ParseError` if the document is not valid JSON once
/// comments are stripped.
pub fn parse_config(contents: &str) -> Result<ArtwallConfig, ConfigError> {
    let reader = json_comments::StripComments::new(contents.as_bytes());
    Ok(serde_json::from_reader(reader)?)
}

/// Loads the configuration from a specific file.
///
/// # Errors
///
/// Returns `ConfigError::NotFound` if the file does not exist, `IoError` if it
/// cannot be read, and `ParseError` if it contains invalid JSON.
pub fn load_config_from_path(path: &Path) -> Result<(ArtwallConfig, PathBuf), ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound);
    }

    let file = fs::File::open(path)?;
    let reader = json_comments::StripComments::new(file);
    let config: ArtwallConfig = serde_json::from_reader(reader)?;
    Ok((config, path.to_path_buf()))
}

/// Loads the configuration from the first available config file.
///
/// # Errors
///
/// Returns `ConfigError::NotFound` if no configuration file exists in any of
/// the expected locations, or the error from [`load_config_from_path`].
pub fn load_config() -> Result<(ArtwallConfig, PathBuf), ConfigError> {
    config_paths()
        .into_iter()
        .find(|path| path.exists())
        .map_or(Err(ConfigError::NotFound), |path| load_config_from_path(&path))
}
