//! The ArtWall daemon.
//!
//! Owns the rotation engine and serves the CLI over a Unix socket until it
//! receives Ctrl-C or SIGINT.

use std::sync::Arc;

use crate::config::{ArtwallConfig, get_config};
use crate::error::ArtwallError;
use crate::ipc::{self, IpcServer};
use crate::modules::rotation::{RotationActor, RotationHandle};
use crate::modules::wallpaper::SystemApplier;

/// Runs the daemon in the foreground, blocking until it is interrupted.
///
/// # Errors
///
/// Returns an error if another daemon is already running, the runtime cannot
/// be built, or the IPC socket cannot be bound.
pub fn run(verbose: bool) -> Result<(), ArtwallError> {
    crate::init_logging(if verbose { "artwall=debug" } else { "artwall=info" });

    if ipc::is_daemon_running() {
        return Err(ArtwallError::CommandError(format!(
            "ArtWall is already running (socket: {})",
            ipc::get_socket_path().display()
        )));
    }

    let config = get_config();
    let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
    runtime.block_on(serve(config))
}

async fn serve(config: &'static ArtwallConfig) -> Result<(), ArtwallError> {
    let applier = Arc::new(SystemApplier::new(config.rotation.screensaver));
    let handle = RotationActor::spawn(applier, config.rotation.engine_settings());

    let server = {
        let handle = handle.clone();
        IpcServer::start(ipc::get_socket_path(), move |query| {
            ipc::handle_query(&handle, &config.library, query)
        })?
    };

    autostart(&handle, config).await;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        socket = %server.path().display(),
        "artwall daemon ready"
    );

    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }

    tracing::info!("shutting down");
    server.shutdown();
    if let Err(err) = handle.stop_rotation().await {
        tracing::debug!(error = %err, "rotation already stopped");
    }
    handle.shutdown().await;
    Ok(())
}

/// Starts the configured default collection, if any.
async fn autostart(handle: &RotationHandle, config: &ArtwallConfig) {
    let Some(name) = config.library.default_collection() else {
        return;
    };

    let Some(directory) = config.library.collection_dir(name) else {
        tracing::warn!(
            collection = name,
            "defaultCollection must be a directory name under the library root"
        );
        return;
    };
    match handle.start_rotation(name, directory).await {
        Ok(status) => tracing::info!(collection = name, total = status.total, "default collection started"),
        Err(err) => tracing::warn!(collection = name, error = %err, "could not start default collection"),
    }
}
