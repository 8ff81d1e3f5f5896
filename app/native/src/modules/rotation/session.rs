//! A single rotation run over one collection.

use std::path::{Path, PathBuf};

use uuid::Uuid;

use super::image_set::ImageSet;
use super::playback::Playback;
use super::status::RotationState;

/// An active or paused rotation over one image set.
///
/// Sessions are created and dropped only by the rotation actor; observers see
/// them through [`super::RotationStatus`] snapshots.
#[derive(Debug)]
pub struct RotationSession {
    id: Uuid,
    label: String,
    directory: PathBuf,
    playback: Playback,
    paused: bool,
    last_error: Option<String>,
}

impl RotationSession {
    /// Creates a running session positioned on the first image.
    #[must_use]
    pub fn new(label: String, directory: PathBuf, images: ImageSet, interval_secs: u64) -> Self {
        Self {
            id: Uuid::now_v7(),
            label,
            directory,
            playback: Playback::new(images, interval_secs),
            paused: false,
            last_error: None,
        }
    }

    #[must_use]
    pub const fn id(&self) -> Uuid { self.id }

    #[must_use]
    pub fn label(&self) -> &str { &self.label }

    #[must_use]
    pub fn directory(&self) -> &Path { &self.directory }

    #[must_use]
    pub const fn playback(&self) -> &Playback { &self.playback }

    pub const fn playback_mut(&mut self) -> &mut Playback { &mut self.playback }

    /// Running or paused. A session is never `Inactive`.
    #[must_use]
    pub const fn state(&self) -> RotationState {
        if self.paused { RotationState::Paused } else { RotationState::Running }
    }

    #[must_use]
    pub const fn is_paused(&self) -> bool { self.paused }

    pub const fn set_paused(&mut self, paused: bool) { self.paused = paused; }

    #[must_use]
    pub fn last_error(&self) -> Option<&str> { self.last_error.as_deref() }

    /// Records the outcome of the most recent apply.
    pub fn record_apply(&mut self, error: Option<String>) { self.last_error = error; }
}
