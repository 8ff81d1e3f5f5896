//! Wallpaper rotation engine.
//!
//! A single [`RotationActor`] task owns the only [`RotationSession`]. Clients
//! talk to it through a cloneable [`RotationHandle`], and observers read
//! [`RotationStatus`] snapshots without going through the actor.
//!
//! ```text
//!  RotationHandle ──mpsc──▶ RotationActor ──spawn_blocking──▶ WallpaperApplier
//!        ▲                    │   ▲
//!        │                    │   └── 1 s countdown tick
//!        └── SharedObservable<RotationStatus> ◀──┘
//! ```

pub mod actor;
pub mod image_set;
pub mod playback;
pub mod session;
pub mod status;

use std::path::PathBuf;
use std::time::Duration;

pub use actor::{RotationActor, RotationCommand, RotationHandle};
pub use image_set::{ImageSet, count_images, is_supported_image};
pub use playback::{DEFAULT_INTERVAL_SECS, Playback};
pub use session::RotationSession;
pub use status::{RotationState, RotationStatus, format_countdown};

use crate::modules::wallpaper::timeout::DEFAULT_APPLY_TIMEOUT;

/// Errors returned by the rotation control surface.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RotationError {
    /// The collection directory holds no supported images.
    #[error("No images found in {}", directory.display())]
    NoImages { directory: PathBuf },

    /// The collection directory does not exist or is not a directory.
    #[error("Collection directory does not exist: {}", .0.display())]
    InvalidDirectory(PathBuf),

    /// The running OS is too old to drive the desktop picture.
    #[error("Unsupported operating system {found}; ArtWall requires {minimum} or later")]
    UnsupportedOs { found: String, minimum: String },

    /// The applier refused to run in this environment for another reason.
    #[error("Wallpaper environment unavailable: {0}")]
    Environment(String),

    /// The rotation actor is no longer running.
    #[error("Rotation engine is not running")]
    EngineStopped,
}

/// Tunables for the rotation engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineSettings {
    /// Seconds between automatic advances. Zero is raised to one.
    pub interval_secs: u64,

    /// Longest time a single desktop call (an apply, or the screensaver
    /// setup on start) may take before it counts as failed.
    pub apply_timeout: Duration,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            interval_secs: DEFAULT_INTERVAL_SECS,
            apply_timeout: DEFAULT_APPLY_TIMEOUT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = EngineSettings::default();
        assert_eq!(settings.interval_secs, 1800);
        assert_eq!(settings.apply_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_no_images_error_names_directory() {
        let err = RotationError::NoImages { directory: PathBuf::from("/art/Empty") };
        assert_eq!(err.to_string(), "No images found in /art/Empty");
    }

    #[test]
    fn test_unsupported_os_error_names_minimum() {
        let err = RotationError::UnsupportedOs {
            found: "macOS 12.6".to_string(),
            minimum: "macOS 13.0".to_string(),
        };
        assert!(err.to_string().contains("requires macOS 13.0 or later"));
    }
}
