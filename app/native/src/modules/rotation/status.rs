//! Read-only status snapshots published to observers.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::session::RotationSession;

/// Lifecycle state of the rotation engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RotationState {
    /// No session exists.
    #[default]
    Inactive,
    /// A session exists and the countdown is ticking.
    Running,
    /// A session exists but the countdown is frozen.
    Paused,
}

impl std::fmt::Display for RotationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Inactive => write!(f, "inactive"),
            Self::Running => write!(f, "running"),
            Self::Paused => write!(f, "paused"),
        }
    }
}

/// A point-in-time view of the rotation, safe to hand to any observer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RotationStatus {
    /// Current lifecycle state.
    pub state: RotationState,

    /// Identifier of the active session.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<Uuid>,

    /// Display name of the rotating collection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection: Option<String>,

    /// Directory the image set was loaded from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,

    /// Image currently applied (or about to be).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_image: Option<PathBuf>,

    /// Zero-based index of the current image.
    pub index: usize,

    /// Number of images in the rotation.
    pub total: usize,

    /// Seconds until the next automatic advance.
    pub remaining_seconds: u64,

    /// Seconds between automatic advances.
    pub interval_seconds: u64,

    /// Reason the most recent apply failed, cleared by the next success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
}

impl RotationStatus {
    /// Status of an engine with no session.
    #[must_use]
    pub fn inactive() -> Self { Self::default() }

    /// Builds a snapshot from a live session.
    #[must_use]
    pub fn from_session(session: &RotationSession) -> Self {
        let playback = session.playback();
        Self {
            state: session.state(),
            session_id: Some(session.id()),
            collection: Some(session.label().to_string()),
            directory: Some(session.directory().to_path_buf()),
            current_image: playback.current().map(std::path::Path::to_path_buf),
            index: playback.current_index(),
            total: playback.total(),
            remaining_seconds: playback.remaining_secs(),
            interval_seconds: playback.interval_secs(),
            last_error: session.last_error().map(ToString::to_string),
        }
    }

    /// Whether a session exists (running or paused).
    #[must_use]
    pub fn is_active(&self) -> bool { self.state != RotationState::Inactive }

    /// Countdown formatted as `MM:SS`, or `H:MM:SS` for an hour or more.
    #[must_use]
    pub fn countdown(&self) -> String { format_countdown(self.remaining_seconds) }

    /// One-based position such as `3/48`, or `-` when inactive.
    #[must_use]
    pub fn position(&self) -> String {
        if self.total == 0 {
            return "-".to_string();
        }
        format!("{}/{}", self.index + 1, self.total)
    }

    /// File name of the current image, for compact display.
    #[must_use]
    pub fn current_image_name(&self) -> Option<String> {
        self.current_image
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().to_string())
    }
}

/// Formats a number of seconds as a human-readable countdown.
#[must_use]
pub fn format_countdown(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    if hours > 0 {
        format!("{hours}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes:02}:{secs:02}")
    }
}
