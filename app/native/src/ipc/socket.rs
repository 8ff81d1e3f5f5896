//! Socket server (daemon side) and client (CLI side).

use std::io::{BufRead, BufReader, Write};
use std::os::unix::net::{UnixListener, UnixStream};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use super::{IpcError, IpcQuery, IpcResponse};
use crate::cache::get_cache_dir;
use crate::config::get_config;
use crate::platform::thread::spawn_named_thread;

/// Socket filename within the cache directory.
const SOCKET_FILENAME: &str = "artwall.sock";

/// Read/write timeout for a single exchange that does not wait on the desktop.
const IO_TIMEOUT: Duration = Duration::from_secs(5);

/// Bounded desktop calls an engine query may wait on: the screensaver setup
/// and first apply of a start queued ahead of it, then its own apply.
const DESKTOP_CALLS_PER_REPLY: u32 = 3;

/// Number of attempts for transient connection failures.
const MAX_RETRIES: u32 = 3;

/// Delay between retry attempts.
const RETRY_DELAY: Duration = Duration::from_millis(100);

/// How long the client waits for the answer to `query`.
///
/// Queries that go through the engine are answered only after any desktop
/// call they trigger has finished or timed out, so their budget grows with
/// the daemon's `apply_timeout`.
#[must_use]
pub fn reply_timeout(query: &IpcQuery, apply_timeout: Duration) -> Duration {
    if query.reaches_engine() {
        IO_TIMEOUT.saturating_add(apply_timeout.saturating_mul(DESKTOP_CALLS_PER_REPLY))
    } else {
        IO_TIMEOUT
    }
}

/// Gets the path to the IPC socket.
#[must_use]
pub fn get_socket_path() -> PathBuf { get_cache_dir().join(SOCKET_FILENAME) }

fn remove_socket(path: &Path) {
    if path.exists()
        && let Err(err) = std::fs::remove_file(path)
    {
        tracing::debug!(error = %err, path = %path.display(), "failed to remove socket file");
    }
}

// ============================================================================
// Server (daemon side)
// ============================================================================

/// A running socket server. Dropping it does not stop it; call [`Self::shutdown`].
pub struct IpcServer {
    path: PathBuf,
    running: Arc<AtomicBool>,
}

impl IpcServer {
    /// Binds `path` and serves queries with `handler` on a background thread.
    ///
    /// A stale socket file at `path` is removed first. Each connection is
    /// handled on its own thread, so a slow query never blocks the others.
    ///
    /// # Errors
    ///
    /// Returns an error if the socket cannot be bound.
    pub fn start<F>(path: PathBuf, handler: F) -> std::io::Result<Self>
    where F: Fn(IpcQuery) -> IpcResponse + Send + Sync + 'static {
        remove_socket(&path);

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let listener = UnixListener::bind(&path)?;
        tracing::info!(path = %path.display(), "ipc server listening");

        let running = Arc::new(AtomicBool::new(true));
        let handler = Arc::new(handler);
        let flag = Arc::clone(&running);

        if !spawn_named_thread("ipc-server", move || server_loop(&listener, &flag, &handler)) {
            remove_socket(&path);
            return Err(std::io::Error::other("failed to spawn ipc server thread"));
        }

        Ok(Self { path, running })
    }

    /// Path the server is bound to.
    #[must_use]
    pub fn path(&self) -> &Path { &self.path }

    /// Stops accepting connections and removes the socket file.
    pub fn shutdown(&self) {
        if !self.running.swap(false, Ordering::SeqCst) {
            return;
        }
        // Wake the accept loop so it sees the flag.
        let _ = UnixStream::connect(&self.path);
        remove_socket(&self.path);
        tracing::debug!("ipc server stopped");
    }
}

fn server_loop<F>(listener: &UnixListener, running: &AtomicBool, handler: &Arc<F>)
where F: Fn(IpcQuery) -> IpcResponse + Send + Sync + 'static {
    for stream in listener.incoming() {
        if !running.load(Ordering::SeqCst) {
            break;
        }

        match stream {
            Ok(stream) => {
                let handler = Arc::clone(handler);
                spawn_named_thread("ipc-conn", move || {
                    if let Err(err) = handle_connection(stream, handler.as_ref()) {
                        tracing::debug!(error = %err, "ipc connection failed");
                    }
                });
            }
            Err(err) => tracing::warn!(error = %err, "ipc accept failed"),
        }
    }
}

fn handle_connection<F>(stream: UnixStream, handler: &F) -> std::io::Result<()>
where F: Fn(IpcQuery) -> IpcResponse {
    stream.set_read_timeout(Some(IO_TIMEOUT))?;

    let mut reader = BufReader::new(stream);
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Ok(());
    }

    let response = match serde_json::from_str::<IpcQuery>(line.trim()) {
        Ok(query) => {
            tracing::debug!(query = ?query, "ipc query");
            handler(query)
        }
        Err(e) => IpcResponse::error(format!("Invalid query: {e}")),
    };

    let response_json = serde_json::to_string(&response)
        .unwrap_or_else(|_| r#"{"error":"Failed to serialize response"}"#.to_string());

    let mut stream = reader.into_inner();
    writeln!(stream, "{response_json}")
}

// ============================================================================
// Client (CLI side)
// ============================================================================

/// Sends a query to the daemon at the default socket path.
///
/// The reply budget follows the `applyTimeout` of the loaded configuration,
/// which is the one the daemon reads too.
///
/// # Errors
///
/// See [`send_query_to`].
pub fn send_query(query: &IpcQuery) -> Result<IpcResponse, IpcError> {
    let timeout = if query.reaches_engine() {
        reply_timeout(query, get_config().rotation.engine_settings().apply_timeout)
    } else {
        IO_TIMEOUT
    };
    send_query_to(&get_socket_path(), query, timeout)
}

/// Sends a query to the daemon listening on `path`, waiting at most
/// `timeout` for the reply.
///
/// Retries up to three times while the daemon looks unreachable.
///
/// # Errors
///
/// Returns [`IpcError::NotRunning`] if nothing is listening,
/// [`IpcError::Timeout`] if the daemon does not answer, and
/// [`IpcError::InvalidResponse`] if the answer cannot be parsed.
pub fn send_query_to(
    path: &Path,
    query: &IpcQuery,
    timeout: Duration,
) -> Result<IpcResponse, IpcError> {
    let mut last_error = IpcError::NotRunning;

    for attempt in 0..MAX_RETRIES {
        match send_query_once(path, query, timeout) {
            Ok(response) => return Ok(response),
            Err(err) => {
                last_error = err;

                // Only connection failures are worth another try
                if !matches!(last_error, IpcError::NotRunning) {
                    break;
                }
                if attempt < MAX_RETRIES - 1 {
                    std::thread::sleep(RETRY_DELAY);
                }
            }
        }
    }

    Err(last_error)
}

fn send_query_once(
    path: &Path,
    query: &IpcQuery,
    timeout: Duration,
) -> Result<IpcResponse, IpcError> {
    if !path.exists() {
        return Err(IpcError::NotRunning);
    }

    let mut stream = UnixStream::connect(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::ConnectionRefused
        | std::io::ErrorKind::NotFound
        | std::io::ErrorKind::BrokenPipe
        | std::io::ErrorKind::ConnectionReset => IpcError::NotRunning,
        _ => IpcError::Io(e),
    })?;

    stream.set_read_timeout(Some(timeout))?;
    stream.set_write_timeout(Some(IO_TIMEOUT))?;

    let query_json = serde_json::to_string(query)
        .map_err(|e| IpcError::InvalidResponse(format!("Failed to serialize query: {e}")))?;

    writeln!(stream, "{query_json}").map_err(|e| {
        if e.kind() == std::io::ErrorKind::BrokenPipe {
            IpcError::NotRunning
        } else {
            IpcError::Io(e)
        }
    })?;

    let mut reader = BufReader::new(stream);
    let mut response_line = String::new();
    reader.read_line(&mut response_line).map_err(|e| match e.kind() {
        std::io::ErrorKind::WouldBlock | std::io::ErrorKind::TimedOut => IpcError::Timeout,
        std::io::ErrorKind::BrokenPipe | std::io::ErrorKind::ConnectionReset => {
            IpcError::NotRunning
        }
        _ => IpcError::Io(e),
    })?;

    serde_json::from_str(response_line.trim())
        .map_err(|e| IpcError::InvalidResponse(format!("Failed to parse response: {e}")))
}

/// Checks whether a daemon answers on the default socket.
#[must_use]
pub fn is_daemon_running() -> bool {
    matches!(send_query(&IpcQuery::Ping), Ok(IpcResponse::Success { .. }))
}
