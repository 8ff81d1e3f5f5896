//! Handle for communicating with the rotation actor.
//!
//! The `RotationHandle` is the control surface: it is cheap to clone, can be
//! shared across threads, and offers both async methods and blocking variants
//! for callers that live outside the runtime (such as the IPC server thread).

use std::path::PathBuf;

use eyeball::{SharedObservable, Subscriber};
use tokio::sync::{mpsc, oneshot};

use super::messages::{RotationCommand, RotationMessage};
use crate::modules::rotation::{RotationError, RotationStatus};

/// Handle for communicating with the rotation actor.
#[derive(Clone)]
pub struct RotationHandle {
    sender: mpsc::Sender<RotationMessage>,
    status: SharedObservable<RotationStatus>,
}

impl RotationHandle {
    pub(crate) const fn new(
        sender: mpsc::Sender<RotationMessage>,
        status: SharedObservable<RotationStatus>,
    ) -> Self {
        Self { sender, status }
    }

    // ========================================================================
    // Status
    // ========================================================================

    /// Latest published status. Never blocks on the actor.
    #[must_use]
    pub fn status(&self) -> RotationStatus { self.status.get() }

    /// Subscribes to status changes (one update per tick while running).
    #[must_use]
    pub fn subscribe(&self) -> Subscriber<RotationStatus> { self.status.subscribe() }

    // ========================================================================
    // Control surface
    // ========================================================================

    /// Starts rotating the images in `directory`, replacing any current session.
    ///
    /// The first image is applied before this returns.
    ///
    /// # Errors
    ///
    /// Returns [`RotationError::NoImages`], [`RotationError::InvalidDirectory`]
    /// or [`RotationError::UnsupportedOs`] when the session cannot start, and
    /// [`RotationError::EngineStopped`] if the actor is gone.
    pub async fn start_rotation(
        &self,
        label: impl Into<String>,
        directory: impl Into<PathBuf>,
    ) -> Result<RotationStatus, RotationError> {
        let (tx, rx) = oneshot::channel();
        let msg = RotationMessage::Start {
            label: label.into(),
            directory: directory.into(),
            respond_to: tx,
        };

        self.sender.send(msg).await.map_err(|_| RotationError::EngineStopped)?;
        rx.await.map_err(|_| RotationError::EngineStopped)?
    }

    /// Sends `command` and waits for the resulting status.
    ///
    /// # Errors
    ///
    /// Returns [`RotationError::EngineStopped`] if the actor is gone.
    pub async fn command(&self, command: RotationCommand) -> Result<RotationStatus, RotationError> {
        let (tx, rx) = oneshot::channel();

        self.sender
            .send(RotationMessage::Command { command, respond_to: tx })
            .await
            .map_err(|_| RotationError::EngineStopped)?;

        rx.await.map_err(|_| RotationError::EngineStopped)
    }

    /// Ends the session, if any.
    ///
    /// # Errors
    ///
    /// Returns [`RotationError::EngineStopped`] if the actor is gone.
    pub async fn stop_rotation(&self) -> Result<RotationStatus, RotationError> {
        self.command(RotationCommand::Stop).await
    }

    /// Freezes the countdown.
    ///
    /// # Errors
    ///
    /// Returns [`RotationError::EngineStopped`] if the actor is gone.
    pub async fn pause_rotation(&self) -> Result<RotationStatus, RotationError> {
        self.command(RotationCommand::Pause).await
    }

    /// Continues a paused countdown.
    ///
    /// # Errors
    ///
    /// Returns [`RotationError::EngineStopped`] if the actor is gone.
    pub async fn resume_rotation(&self) -> Result<RotationStatus, RotationError> {
        self.command(RotationCommand::Resume).await
    }

    /// Skips to the next image.
    ///
    /// # Errors
    ///
    /// Returns [`RotationError::EngineStopped`] if the actor is gone.
    pub async fn next_image(&self) -> Result<RotationStatus, RotationError> {
        self.command(RotationCommand::Next).await
    }

    /// Goes back to the previous image.
    ///
    /// # Errors
    ///
    /// Returns [`RotationError::EngineStopped`] if the actor is gone.
    pub async fn previous_image(&self) -> Result<RotationStatus, RotationError> {
        self.command(RotationCommand::Previous).await
    }

    /// Asks the actor to stop any session and exit.
    pub async fn shutdown(&self) {
        if self.sender.send(RotationMessage::Shutdown).await.is_err() {
            tracing::debug!("rotation actor already stopped");
        }
    }

    // ========================================================================
    // Blocking variants (must not be called from inside the runtime)
    // ========================================================================

    /// Blocking form of [`Self::start_rotation`].
    ///
    /// # Errors
    ///
    /// Same as [`Self::start_rotation`].
    pub fn blocking_start_rotation(
        &self,
        label: impl Into<String>,
        directory: impl Into<PathBuf>,
    ) -> Result<RotationStatus, RotationError> {
        let (tx, rx) = oneshot::channel();
        let msg = RotationMessage::Start {
            label: label.into(),
            directory: directory.into(),
            respond_to: tx,
        };

        self.sender.blocking_send(msg).map_err(|_| RotationError::EngineStopped)?;
        rx.blocking_recv().map_err(|_| RotationError::EngineStopped)?
    }

    /// Blocking form of [`Self::command`].
    ///
    /// # Errors
    ///
    /// Returns [`RotationError::EngineStopped`] if the actor is gone.
    pub fn blocking_command(&self, command: RotationCommand) -> Result<RotationStatus, RotationError> {
        let (tx, rx) = oneshot::channel();

        self.sender
            .blocking_send(RotationMessage::Command { command, respond_to: tx })
            .map_err(|_| RotationError::EngineStopped)?;

        rx.blocking_recv().map_err(|_| RotationError::EngineStopped)
    }
}
