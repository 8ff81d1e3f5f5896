//! Bounded calls into the desktop.
//!
//! Every blocking [`WallpaperApplier`] call runs on the blocking pool raced
//! against a time limit. A call that overruns cannot be cancelled, so the
//! [`BoundedApplier`] remembers it and refuses to start another apply until it
//! has finished. An older image can then never land on top of a newer one.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::{JoinError, JoinHandle};

use super::{ApplyError, WallpaperApplier};

/// Default time an apply may take before it counts as failed.
pub const DEFAULT_APPLY_TIMEOUT: Duration = Duration::from_secs(10);

/// Wraps an applier so that no call blocks the caller for longer than `limit`.
pub struct BoundedApplier {
    applier: Arc<dyn WallpaperApplier>,
    limit: Duration,
    in_flight: Option<JoinHandle<Result<(), ApplyError>>>,
}

impl BoundedApplier {
    #[must_use]
    pub fn new(applier: Arc<dyn WallpaperApplier>, limit: Duration) -> Self {
        Self { applier, limit, in_flight: None }
    }

    /// See [`WallpaperApplier::check_environment`].
    ///
    /// # Errors
    ///
    /// Returns the applier's environment error.
    pub fn check_environment(&self) -> Result<(), ApplyError> { self.applier.check_environment() }

    /// Applies `image`, giving up after the limit.
    ///
    /// # Errors
    ///
    /// Returns the applier's own error, [`ApplyError::TimedOut`] when the limit
    /// elapses, [`ApplyError::StillApplying`] while an earlier timed-out call
    /// is still running, or [`ApplyError::Failed`] if the blocking task panicked.
    pub async fn apply(&mut self, image: &Path) -> Result<(), ApplyError> {
        if self.in_flight.as_ref().is_some_and(|task| !task.is_finished()) {
            return Err(ApplyError::StillApplying);
        }
        self.in_flight = None;

        let applier = Arc::clone(&self.applier);
        let image = image.to_path_buf();
        let mut task = tokio::task::spawn_blocking(move || applier.apply(&image));

        match tokio::time::timeout(self.limit, &mut task).await {
            Ok(joined) => flatten(joined),
            Err(_) => {
                self.in_flight = Some(task);
                Err(ApplyError::TimedOut(self.limit))
            }
        }
    }

    /// Points the screensaver at `directory`, giving up after the limit.
    ///
    /// # Errors
    ///
    /// Returns [`ApplyError::Screensaver`] if the call fails or overruns.
    pub async fn configure_screensaver(&self, directory: &Path) -> Result<(), ApplyError> {
        let applier = Arc::clone(&self.applier);
        let directory = directory.to_path_buf();
        let task = tokio::task::spawn_blocking(move || applier.configure_screensaver(&directory));

        match tokio::time::timeout(self.limit, task).await {
            Ok(joined) => flatten(joined),
            Err(_) => Err(ApplyError::Screensaver(format!("timed out after {:?}", self.limit))),
        }
    }
}

fn flatten(joined: Result<Result<(), ApplyError>, JoinError>) -> Result<(), ApplyError> {
    joined.unwrap_or_else(|err| Err(ApplyError::Failed(format!("desktop task aborted: {err}"))))
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::mpsc;

    use parking_lot::Mutex;

    use super::*;

    struct Immediate(Result<(), ApplyError>);

    impl WallpaperApplier for Immediate {
        fn apply(&self, _image: &Path) -> Result<(), ApplyError> { self.0.clone() }
    }

    /// Blocks inside every call until the test drops the sender.
    struct Blocking {
        release: Mutex<mpsc::Receiver<()>>,
        applied: Mutex<Vec<PathBuf>>,
        calls: AtomicUsize,
    }

    impl Blocking {
        fn new(release: mpsc::Receiver<()>) -> Self {
            Self { release: Mutex::new(release), applied: Mutex::default(), calls: AtomicUsize::new(0) }
        }
    }

    impl WallpaperApplier for Blocking {
        fn apply(&self, image: &Path) -> Result<(), ApplyError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let _ = self.release.lock().recv();
            self.applied.lock().push(image.to_path_buf());
            Ok(())
        }

        fn configure_screensaver(&self, _directory: &Path) -> Result<(), ApplyError> {
            let _ = self.release.lock().recv();
            Ok(())
        }
    }

    fn bounded(applier: Arc<dyn WallpaperApplier>, limit: Duration) -> BoundedApplier {
        BoundedApplier::new(applier, limit)
    }

    #[tokio::test]
    async fn test_successful_apply_passes_through() {
        let mut applier = bounded(Arc::new(Immediate(Ok(()))), DEFAULT_APPLY_TIMEOUT);
        assert!(applier.apply(Path::new("/art/a.jpg")).await.is_ok());
    }

    #[tokio::test]
    async fn test_applier_error_passes_through() {
        let inner = Immediate(Err(ApplyError::Failed("desktop locked".to_string())));
        let mut applier = bounded(Arc::new(inner), DEFAULT_APPLY_TIMEOUT);
        let result = applier.apply(Path::new("/art/a.jpg")).await;
        assert_eq!(result, Err(ApplyError::Failed("desktop locked".to_string())));
    }

    #[tokio::test]
    async fn test_hanging_apply_times_out() {
        let (release, rx) = mpsc::channel();
        let limit = Duration::from_millis(50);
        let mut applier = bounded(Arc::new(Blocking::new(rx)), limit);

        let started = std::time::Instant::now();
        let result = applier.apply(Path::new("/art/a.jpg")).await;

        assert_eq!(result, Err(ApplyError::TimedOut(limit)));
        assert!(started.elapsed() < Duration::from_secs(5));
        drop(release);
    }

    #[tokio::test]
    async fn test_no_new_apply_while_timed_out_call_still_runs() {
        let (release, rx) = mpsc::channel();
        let inner = Arc::new(Blocking::new(rx));
        let mut applier = bounded(inner.clone(), Duration::from_millis(50));

        let first = applier.apply(Path::new("/art/old.jpg")).await;
        assert!(matches!(first, Err(ApplyError::TimedOut(_))));

        let second = applier.apply(Path::new("/art/new.jpg")).await;
        assert_eq!(second, Err(ApplyError::StillApplying));
        assert_eq!(inner.calls.load(Ordering::SeqCst), 1);

        // Once the stuck call returns, applies go through again in order
        drop(release);
        tokio::time::sleep(Duration::from_millis(200)).await;

        assert!(applier.apply(Path::new("/art/new.jpg")).await.is_ok());
        assert_eq!(
            *inner.applied.lock(),
            vec![PathBuf::from("/art/old.jpg"), PathBuf::from("/art/new.jpg")]
        );
    }

    #[tokio::test]
    async fn test_hanging_screensaver_times_out() {
        let (release, rx) = mpsc::channel();
        let applier = bounded(Arc::new(Blocking::new(rx)), Duration::from_millis(50));

        let started = std::time::Instant::now();
        let result = applier.configure_screensaver(Path::new("/art")).await;

        assert!(matches!(result, Err(ApplyError::Screensaver(msg)) if msg.contains("timed out")));
        assert!(started.elapsed() < Duration::from_secs(5));
        drop(release);
    }
}
