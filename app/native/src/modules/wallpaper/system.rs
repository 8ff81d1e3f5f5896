//! The production wallpaper strategy.
//!
//! Uses the `wallpaper` crate, which on macOS sets the picture of every
//! desktop in one call, so multiple displays never need to be enumerated.
//! The picture keeps whatever scaling the user chose in System Settings; the
//! crate cannot change it on macOS.

use std::path::Path;

use super::{ApplyError, WallpaperApplier, os_support, screensaver};

/// Applies wallpapers through the operating system.
#[derive(Debug, Clone, Default)]
pub struct SystemApplier {
    screensaver: bool,
}

impl SystemApplier {
    #[must_use]
    pub const fn new(screensaver: bool) -> Self { Self { screensaver } }
}

impl WallpaperApplier for SystemApplier {
    fn check_environment(&self) -> Result<(), ApplyError> { os_support::check_current_os() }

    fn apply(&self, image: &Path) -> Result<(), ApplyError> {
        if !image.exists() {
            return Err(ApplyError::FileNotFound(image.display().to_string()));
        }

        let path_str = image.display().to_string();
        wallpaper::set_from_path(&path_str).map_err(|e| ApplyError::Failed(e.to_string()))
    }

    fn configure_screensaver(&self, directory: &Path) -> Result<(), ApplyError> {
        if !self.screensaver {
            tracing::debug!("screensaver configuration disabled");
            return Ok(());
        }
        screensaver::configure(directory)
    }
}
