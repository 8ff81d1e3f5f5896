//! Configuration module for ArtWall.
//!
//! The configuration is loaded once per process. When no file exists a
//! commented template is written to the preferred location and the defaults
//! are used.

pub mod template;
pub mod types;

use std::path::PathBuf;
use std::sync::OnceLock;

pub use types::{
    ArtwallConfig, ConfigError, LibraryConfig, RotationConfig, config_paths,
    load_config as load_config_default, load_config_from_path, parse_config,
};

/// The process-wide configuration, read on first access.
static CONFIG: OnceLock<ArtwallConfig> = OnceLock::new();

/// File the configuration came from (or the template that was just written).
static CONFIG_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Set by `--config`; replaces the search paths entirely.
static CUSTOM_CONFIG_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Points configuration loading at `path` instead of the search paths.
///
/// Must be called before [`get_config`] to take effect. Returns `false` if a
/// path was already set.
pub fn set_custom_config_path(path: PathBuf) -> bool { CUSTOM_CONFIG_PATH.set(path).is_ok() }

fn load_or_default() -> ArtwallConfig {
    let result = CUSTOM_CONFIG_PATH
        .get()
        .map_or_else(load_config_default, |path| load_config_from_path(path));

    match result {
        Ok((config, path)) => {
            tracing::debug!(path = %path.display(), "loaded configuration");
            let _ = CONFIG_PATH.set(path);
            config
        }
        Err(ConfigError::NotFound) => {
            if CUSTOM_CONFIG_PATH.get().is_some() {
                tracing::warn!("custom configuration file not found, using defaults");
            } else {
                create_default_config_file();
            }
            ArtwallConfig::default()
        }
        Err(err) => {
            tracing::warn!(error = %err, "failed to load configuration, using defaults");
            ArtwallConfig::default()
        }
    }
}

/// Writes the template to the preferred config path if nothing is there yet.
fn create_default_config_file() {
    let Some(config_path) = config_paths().into_iter().next() else {
        tracing::debug!("no home or config directory, skipping template");
        return;
    };

    if config_path.exists() {
        return;
    }

    match template::create_config_file(&config_path) {
        Ok(()) => {
            let _ = CONFIG_PATH.set(config_path.clone());
            tracing::info!(path = %config_path.display(), "created default configuration file");
        }
        Err(err) => {
            tracing::debug!(
                error = %err,
                path = %config_path.display(),
                "failed to create default configuration file"
            );
        }
    }
}

/// Returns the global configuration instance, loading it on first use.
pub fn get_config() -> &'static ArtwallConfig { CONFIG.get_or_init(load_or_default) }

/// The file backing [`get_config`], if there is one.
pub fn get_config_path() -> Option<&'static PathBuf> { CONFIG_PATH.get() }
