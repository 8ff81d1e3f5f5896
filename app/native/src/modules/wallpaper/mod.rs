//! Desktop wallpaper application.
//!
//! The rotation engine only talks to the [`WallpaperApplier`] trait. The
//! concrete OS strategy lives in [`system`], the slideshow screensaver
//! preferences in [`screensaver`], and [`timeout::BoundedApplier`] keeps every
//! blocking call within a time limit.

pub mod os_support;
pub mod screensaver;
pub mod system;
pub mod timeout;

use std::path::Path;
use std::time::Duration;

pub use os_support::{MIN_MACOS_VERSION, OsVersion};
pub use system::SystemApplier;
pub use timeout::BoundedApplier;

/// Errors that can occur when applying a wallpaper.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApplyError {
    /// The wallpaper file does not exist.
    #[error("Wallpaper file not found: {0}")]
    FileNotFound(String),

    /// The OS call reported a failure.
    #[error("Failed to set wallpaper: {0}")]
    Failed(String),

    /// The OS call did not finish in time.
    #[error("Setting the wallpaper timed out after {0:?}")]
    TimedOut(Duration),

    /// An earlier call that timed out has not returned yet.
    #[error("A previous wallpaper change is still running")]
    StillApplying,

    /// The running OS is older than the minimum supported version.
    #[error("Unsupported operating system {found}; ArtWall requires {minimum} or later")]
    UnsupportedOs { found: String, minimum: String },

    /// Writing screensaver preferences failed.
    #[error("Failed to configure screensaver: {0}")]
    Screensaver(String),
}

/// A strategy for putting an image on the desktop.
///
/// Implementations are called from the blocking thread pool and may block;
/// callers bound them with [`BoundedApplier`].
pub trait WallpaperApplier: Send + Sync + 'static {
    /// Verifies the environment can run this strategy at all.
    ///
    /// # Errors
    ///
    /// Returns [`ApplyError::UnsupportedOs`] when the OS is too old.
    fn check_environment(&self) -> Result<(), ApplyError> { Ok(()) }

    /// Applies `image` as the desktop picture on every display.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or the OS call fails.
    fn apply(&self, image: &Path) -> Result<(), ApplyError>;

    /// Points the system slideshow screensaver at `directory`. Best effort.
    ///
    /// # Errors
    ///
    /// Returns [`ApplyError::Screensaver`] if the preferences could not be written.
    fn configure_screensaver(&self, _directory: &Path) -> Result<(), ApplyError> { Ok(()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_error_display() {
        let err = ApplyError::FileNotFound("/art/missing.jpg".to_string());
        assert!(err.to_string().contains("not found"));
        assert!(err.to_string().contains("/art/missing.jpg"));

        let err = ApplyError::TimedOut(Duration::from_secs(10));
        assert!(err.to_string().contains("timed out"));
        assert!(err.to_string().contains("10s"));

        let err = ApplyError::UnsupportedOs {
            found: "macOS 12.7".to_string(),
            minimum: "macOS 13.0".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("macOS 12.7"));
        assert!(msg.contains("requires macOS 13.0 or later"));

        assert!(ApplyError::StillApplying.to_string().contains("still running"));
    }

    struct NoopApplier;

    impl WallpaperApplier for NoopApplier {
        fn apply(&self, _image: &Path) -> Result<(), ApplyError> { Ok(()) }
    }

    #[test]
    fn test_default_trait_methods_succeed() {
        let applier = NoopApplier;
        assert!(applier.check_environment().is_ok());
        assert!(applier.configure_screensaver(Path::new("/art")).is_ok());
    }
}
