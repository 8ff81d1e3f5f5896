//! Maps IPC queries onto the rotation control surface.
//!
//! Runs on IPC connection threads, so it uses the handle's blocking calls.

use super::{IpcQuery, IpcResponse};
use crate::config::LibraryConfig;
use crate::modules::rotation::RotationHandle;

/// Answers one query against the running engine.
#[must_use]
pub fn handle_query(handle: &RotationHandle, library: &LibraryConfig, query: IpcQuery) -> IpcResponse {
    if let Some(command) = query.as_command() {
        return respond(handle.blocking_command(command));
    }

    match query {
        IpcQuery::Ping => IpcResponse::success("pong"),
        IpcQuery::Status => IpcResponse::success(handle.status()),
        IpcQuery::Start { collection, directory } => {
            let collection = collection.trim().to_string();
            if collection.is_empty() {
                return IpcResponse::error("Collection name cannot be empty");
            }
            let Some(directory) = directory.or_else(|| library.collection_dir(&collection)) else {
                return IpcResponse::error(format!(
                    "Invalid collection name {collection:?}: expected a directory name under \
                     the library root"
                ));
            };
            respond(handle.blocking_start_rotation(collection, directory))
        }
        IpcQuery::Stop | IpcQuery::Pause | IpcQuery::Resume | IpcQuery::Next | IpcQuery::Previous => {
            IpcResponse::error("unexpected command")
        }
    }
}

fn respond<T, E>(result: Result<T, E>) -> IpcResponse
where
    T: serde::Serialize,
    E: std::fmt::Display,
{
    match result {
        Ok(data) => IpcResponse::success(data),
        Err(err) => IpcResponse::error(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::sync::Arc;
    use std::sync::mpsc as std_mpsc;
    use std::thread;
    use std::time::Duration;

    use parking_lot::Mutex;
    use tokio::sync::oneshot;

    use super::*;
    use crate::ipc::{IpcServer, reply_timeout, send_query_to};
    use crate::modules::rotation::{EngineSettings, RotationActor, RotationState, RotationStatus};
    use crate::modules::wallpaper::{ApplyError, WallpaperApplier};

    #[derive(Default)]
    struct RecordingApplier(Mutex<Vec<String>>);

    impl WallpaperApplier for RecordingApplier {
        fn apply(&self, image: &Path) -> Result<(), ApplyError> {
            self.0.lock().push(image.file_name().unwrap().to_string_lossy().to_string());
            Ok(())
        }
    }

    /// Blocks in `apply` until the test drops the release sender.
    struct HangingApplier(Mutex<std_mpsc::Receiver<()>>);

    impl WallpaperApplier for HangingApplier {
        fn apply(&self, _image: &Path) -> Result<(), ApplyError> {
            let _ = self.0.lock().recv();
            Ok(())
        }
    }

    /// Runs the engine on its own runtime thread, like the daemon does.
    struct Engine {
        handle: RotationHandle,
        stop: Option<oneshot::Sender<()>>,
        thread: Option<thread::JoinHandle<()>>,
    }

    impl Engine {
        fn spawn(applier: Arc<dyn WallpaperApplier>, settings: EngineSettings) -> Self {
            let runtime =
                tokio::runtime::Builder::new_current_thread().enable_time().build().unwrap();
            let handle = {
                let _guard = runtime.enter();
                RotationActor::spawn(applier, settings)
            };
            let (stop, stopped) = oneshot::channel::<()>();
            let thread = thread::spawn(move || {
                runtime.block_on(async {
                    let _ = stopped.await;
                });
            });
            Self { handle, stop: Some(stop), thread: Some(thread) }
        }

        fn recording() -> (Self, Arc<RecordingApplier>) {
            let applier = Arc::new(RecordingApplier::default());
            (Self::spawn(applier.clone(), EngineSettings::default()), applier)
        }
    }

    impl Drop for Engine {
        fn drop(&mut self) {
            if let Some(stop) = self.stop.take() {
                let _ = stop.send(());
            }
            if let Some(thread) = self.thread.take() {
                let _ = thread.join();
            }
        }
    }

    fn library_with(names: &[&str]) -> (tempfile::TempDir, LibraryConfig) {
        let root = tempfile::tempdir().unwrap();
        let collection = root.path().join("Impressionism");
        std::fs::create_dir(&collection).unwrap();
        for name in names {
            std::fs::write(collection.join(name), b"").unwrap();
        }
        let library = LibraryConfig {
            root: root.path().display().to_string(),
            ..LibraryConfig::default()
        };
        (root, library)
    }

    fn start(collection: &str) -> IpcQuery {
        IpcQuery::Start { collection: collection.to_string(), directory: None }
    }

    fn status_of(response: IpcResponse) -> RotationStatus { response.into_data().unwrap() }

    fn error_of(response: IpcResponse) -> String {
        match response {
            IpcResponse::Error { error } => error,
            IpcResponse::Success { data } => panic!("expected an error response, got {data}"),
        }
    }

    #[test]
    fn test_ping_and_idle_status() {
        let (engine, _applier) = Engine::recording();
        let library = LibraryConfig::default();

        assert_eq!(handle_query(&engine.handle, &library, IpcQuery::Ping), IpcResponse::success("pong"));

        let status = status_of(handle_query(&engine.handle, &library, IpcQuery::Status));
        assert_eq!(status.state, RotationState::Inactive);
    }

    #[test]
    fn test_start_resolves_collection_under_library_root() {
        let (engine, applier) = Engine::recording();
        let (root, library) = library_with(&["b.jpg", "a.jpg"]);

        let status = status_of(handle_query(&engine.handle, &library, start("Impressionism")));

        assert_eq!(status.state, RotationState::Running);
        assert_eq!(status.directory, Some(root.path().join("Impressionism")));
        assert_eq!(*applier.0.lock(), vec!["a.jpg"]);
    }

    #[test]
    fn test_commands_reach_the_engine() {
        let (engine, _applier) = Engine::recording();
        let (_root, library) = library_with(&["a.jpg", "b.jpg", "c.jpg"]);
        handle_query(&engine.handle, &library, start("Impressionism"));

        assert_eq!(status_of(handle_query(&engine.handle, &library, IpcQuery::Next)).index, 1);
        assert_eq!(status_of(handle_query(&engine.handle, &library, IpcQuery::Previous)).index, 0);
        assert_eq!(
            status_of(handle_query(&engine.handle, &library, IpcQuery::Pause)).state,
            RotationState::Paused
        );
        assert_eq!(
            status_of(handle_query(&engine.handle, &library, IpcQuery::Resume)).state,
            RotationState::Running
        );
        assert_eq!(
            status_of(handle_query(&engine.handle, &library, IpcQuery::Stop)).state,
            RotationState::Inactive
        );
    }

    #[test]
    fn test_start_errors_become_error_responses() {
        let (engine, _applier) = Engine::recording();
        let (_root, library) = library_with(&[]);

        let error = error_of(handle_query(&engine.handle, &library, start("Impressionism")));
        assert!(error.starts_with("No images found"));

        let error = error_of(handle_query(&engine.handle, &library, start("  ")));
        assert!(error.contains("cannot be empty"));
    }

    #[test]
    fn test_start_rejects_names_outside_library_root() {
        let (engine, applier) = Engine::recording();
        let (root, library) = library_with(&["a.jpg"]);

        // A real image directory that a multi-component name would reach
        let outside = root.path().join("Impressionism").join("nested");
        std::fs::create_dir(&outside).unwrap();
        std::fs::write(outside.join("x.jpg"), b"").unwrap();

        for name in ["..", "../Impressionism", "Impressionism/nested", "/tmp"] {
            let error = error_of(handle_query(&engine.handle, &library, start(name)));
            assert!(error.starts_with("Invalid collection name"), "{name}: {error}");
        }
        assert!(applier.0.lock().is_empty());
        assert_eq!(engine.handle.status().state, RotationState::Inactive);
    }

    #[test]
    fn test_explicit_directory_is_used_as_given() {
        let (engine, _applier) = Engine::recording();
        let (root, library) = library_with(&["a.jpg"]);

        let query = IpcQuery::Start {
            collection: "My Picks".to_string(),
            directory: Some(root.path().join("Impressionism")),
        };
        let status = status_of(handle_query(&engine.handle, &library, query));

        assert_eq!(status.collection.as_deref(), Some("My Picks"));
        assert_eq!(status.state, RotationState::Running);
    }

    #[test]
    fn test_slow_apply_still_reports_start_through_socket() {
        // Longer than a plain exchange timeout
        let settings =
            EngineSettings { apply_timeout: Duration::from_secs(6), ..EngineSettings::default() };
        let (release, rx) = std_mpsc::channel::<()>();
        let engine = Engine::spawn(Arc::new(HangingApplier(Mutex::new(rx))), settings);
        let (_root, library) = library_with(&["a.jpg", "b.jpg"]);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("artwall.sock");
        let server = {
            let handle = engine.handle.clone();
            IpcServer::start(path.clone(), move |query| handle_query(&handle, &library, query))
                .unwrap()
        };

        let query = start("Impressionism");
        let response = send_query_to(&path, &query, reply_timeout(&query, settings.apply_timeout));

        let status = status_of(response.unwrap());
        assert_eq!(status.state, RotationState::Running);
        assert!(status.last_error.as_deref().unwrap().contains("timed out"));

        server.shutdown();
        drop(release);
    }
}
