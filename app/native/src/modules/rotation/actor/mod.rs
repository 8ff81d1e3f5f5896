//! Rotation actor.
//!
//! The actor is the only owner of the rotation session. It processes control
//! messages and countdown ticks one at a time from a single `select!` loop, so
//! once a stop or pause reply has been sent no tick can touch the old state.
//!
//! The countdown tick is the only path that advances the playback on its own.
//! While no session is running the ticker is dropped entirely.
//!
//! Desktop calls go through a [`BoundedApplier`], so a stalled OS call costs
//! the loop at most `apply_timeout` before ticks and messages are served again.

mod handle;
mod messages;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use eyeball::SharedObservable;
pub use handle::RotationHandle;
pub use messages::{RotationCommand, RotationMessage};
use tokio::sync::mpsc;
use tokio::time::{Instant, Interval, MissedTickBehavior};

use super::{EngineSettings, ImageSet, RotationError, RotationSession, RotationStatus};
use crate::modules::wallpaper::{ApplyError, BoundedApplier, WallpaperApplier};

/// Channel buffer size for the rotation actor.
const CHANNEL_BUFFER_SIZE: usize = 32;

/// Countdown resolution.
const TICK_PERIOD: Duration = Duration::from_secs(1);

/// The actor that owns the rotation session.
pub struct RotationActor {
    applier: BoundedApplier,
    settings: EngineSettings,
    session: Option<RotationSession>,
    ticker: Option<Interval>,
    status: SharedObservable<RotationStatus>,
    receiver: mpsc::Receiver<RotationMessage>,
}

impl RotationActor {
    /// Spawns the actor on the current tokio runtime and returns its handle.
    ///
    /// The actor exits when it receives a shutdown message or when every
    /// handle has been dropped.
    #[must_use]
    pub fn spawn(applier: Arc<dyn WallpaperApplier>, settings: EngineSettings) -> RotationHandle {
        tracing::debug!(interval = settings.interval_secs, "spawning rotation actor");
        let (sender, receiver) = mpsc::channel(CHANNEL_BUFFER_SIZE);
        let status = SharedObservable::new(RotationStatus::inactive());

        let actor = Self {
            applier: BoundedApplier::new(applier, settings.apply_timeout),
            settings,
            session: None,
            ticker: None,
            status: status.clone(),
            receiver,
        };

        tokio::spawn(actor.run());

        RotationHandle::new(sender, status)
    }

    async fn run(mut self) {
        loop {
            tokio::select! {
                msg = self.receiver.recv() => match msg {
                    Some(RotationMessage::Shutdown) | None => break,
                    Some(msg) => self.handle_message(msg).await,
                },
                () = next_tick(&mut self.ticker) => self.on_tick().await,
            }
        }

        self.teardown();
        tracing::debug!("rotation actor exited");
    }

    async fn handle_message(&mut self, msg: RotationMessage) {
        tracing::trace!(message = msg.name(), "rotation actor received message");

        match msg {
            RotationMessage::Start { label, directory, respond_to } => {
                let result = self.on_start(label, directory).await;
                let _ = respond_to.send(result);
            }
            RotationMessage::Command { command, respond_to } => {
                match command {
                    RotationCommand::Stop => self.on_stop(),
                    RotationCommand::Pause => self.on_pause(),
                    RotationCommand::Resume => self.on_resume(),
                    RotationCommand::Next => self.on_skip(true).await,
                    RotationCommand::Previous => self.on_skip(false).await,
                }
                let _ = respond_to.send(self.publish());
            }
            RotationMessage::Shutdown => {}
        }
    }

    // ========================================================================
    // Handlers
    // ========================================================================

    async fn on_start(
        &mut self,
        label: String,
        directory: PathBuf,
    ) -> Result<RotationStatus, RotationError> {
        // A start always replaces the previous session, even when it fails.
        self.teardown();
        self.publish();

        self.applier.check_environment().map_err(|err| match err {
            ApplyError::UnsupportedOs { found, minimum } => {
                RotationError::UnsupportedOs { found, minimum }
            }
            other => RotationError::Environment(other.to_string()),
        })?;

        if !directory.is_dir() {
            return Err(RotationError::InvalidDirectory(directory));
        }

        let images = ImageSet::load(&directory);
        if images.is_empty() {
            tracing::warn!(dir = %directory.display(), "collection has no images");
            return Err(RotationError::NoImages { directory });
        }

        if let Err(err) = self.applier.configure_screensaver(&directory).await {
            tracing::warn!(error = %err, "failed to configure screensaver");
        }

        let count = images.len();
        self.session =
            Some(RotationSession::new(label, directory, images, self.settings.interval_secs));
        self.apply_current().await;
        self.ticker = Some(new_ticker());

        let status = self.publish();
        tracing::info!(
            count,
            collection = status.collection.as_deref().unwrap_or_default(),
            interval = status.interval_seconds,
            "rotation started"
        );
        Ok(status)
    }

    fn on_stop(&mut self) {
        if self.session.is_none() {
            tracing::debug!("stop requested with no active rotation");
            return;
        }
        self.teardown();
        tracing::info!("rotation stopped");
    }

    fn on_pause(&mut self) {
        let Some(session) = self.session.as_mut() else { return };
        if session.is_paused() {
            return;
        }
        session.set_paused(true);
        self.ticker = None;
        tracing::info!(remaining = session.playback().remaining_secs(), "rotation paused");
    }

    fn on_resume(&mut self) {
        let Some(session) = self.session.as_mut() else { return };
        if !session.is_paused() {
            return;
        }
        session.set_paused(false);
        self.ticker = Some(new_ticker());
        tracing::info!(remaining = session.playback().remaining_secs(), "rotation resumed");
    }

    async fn on_skip(&mut self, forward: bool) {
        let Some(session) = self.session.as_mut() else {
            tracing::debug!(forward, "skip requested with no active rotation");
            return;
        };

        if forward {
            session.playback_mut().advance();
        } else {
            session.playback_mut().retreat();
        }

        // The countdown was reset, so restart the tick phase with it.
        if !session.is_paused() {
            self.ticker = Some(new_ticker());
        }

        self.apply_current().await;
    }

    async fn on_tick(&mut self) {
        let Some(session) = self.session.as_mut() else {
            self.ticker = None;
            return;
        };
        if session.is_paused() {
            return;
        }

        if session.playback_mut().tick_countdown() {
            tracing::debug!(index = session.playback().current_index(), "countdown elapsed");
            self.apply_current().await;
        }
        self.publish();
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    /// Applies the session's current image. Failures are recorded, never fatal.
    async fn apply_current(&mut self) {
        let Some(session) = self.session.as_mut() else { return };
        let Some(image) = session.playback().current().map(Path::to_path_buf) else { return };

        match self.applier.apply(&image).await {
            Ok(()) => {
                tracing::debug!(image = %image.display(), "wallpaper applied");
                session.record_apply(None);
            }
            Err(err) => {
                tracing::warn!(error = %err, image = %image.display(), "failed to apply wallpaper");
                session.record_apply(Some(err.to_string()));
            }
        }
    }

    fn teardown(&mut self) {
        self.ticker = None;
        self.session = None;
    }

    /// Publishes a fresh snapshot to observers and returns it.
    fn publish(&self) -> RotationStatus {
        let status = self
            .session
            .as_ref()
            .map_or_else(RotationStatus::inactive, RotationStatus::from_session);
        self.status.set(status.clone());
        status
    }
}

fn new_ticker() -> Interval {
    let mut ticker = tokio::time::interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker
}

/// Resolves on the next tick, or never when there is no ticker.
async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(ticker) => {
            ticker.tick().await;
        }
        None => std::future::pending().await,
    }
}
