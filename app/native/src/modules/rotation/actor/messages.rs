//! Message types for the rotation actor.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;

use crate::modules::rotation::{RotationError, RotationStatus};

/// Control-surface mutations that need no arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RotationCommand {
    /// End the session. A no-op when nothing is rotating.
    Stop,
    /// Freeze the countdown, keeping index and remaining time.
    Pause,
    /// Continue a paused countdown where it left off.
    Resume,
    /// Skip to the following image and reset the countdown.
    Next,
    /// Go back one image and reset the countdown.
    Previous,
}

impl RotationCommand {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Stop => "stop",
            Self::Pause => "pause",
            Self::Resume => "resume",
            Self::Next => "next",
            Self::Previous => "previous",
        }
    }
}

/// Messages sent to the rotation actor.
#[derive(Debug)]
pub enum RotationMessage {
    /// Begin rotating `directory`, replacing any current session.
    Start {
        label: String,
        directory: PathBuf,
        respond_to: oneshot::Sender<Result<RotationStatus, RotationError>>,
    },

    /// Apply a [`RotationCommand`] and reply with the resulting status.
    Command {
        command: RotationCommand,
        respond_to: oneshot::Sender<RotationStatus>,
    },

    /// Stop any session and exit the actor loop.
    Shutdown,
}

impl RotationMessage {
    /// Short name for logging.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Start { .. } => "start",
            Self::Command { command, .. } => command.name(),
            Self::Shutdown => "shutdown",
        }
    }
}
