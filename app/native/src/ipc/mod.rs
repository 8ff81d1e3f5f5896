//! Unix domain socket IPC between the CLI and the daemon.
//!
//! The daemon listens on a socket in the cache directory. Every CLI command
//! opens a connection, writes one JSON query line and reads one JSON response
//! line.
//!
//! # Query Format
//!
//! ```json
//! {"type": "start", "collection": "Impressionism", "directory": "/path"}
//! {"type": "pause"}
//! {"type": "status"}
//! ```
//!
//! # Response Format
//!
//! ```json
//! {"data": {"state": "running", "index": 2, "total": 48, ...}}
//! {"error": "No images found in /path"}
//! ```

pub mod handler;
pub mod socket;

use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub use handler::handle_query;
pub use socket::{
    IpcServer, get_socket_path, is_daemon_running, reply_timeout, send_query, send_query_to,
};

use crate::modules::rotation::RotationCommand;

/// Queries the CLI can send to the daemon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum IpcQuery {
    /// Start rotating a collection.
    ///
    /// Without a directory the daemon resolves the name under its library root.
    Start {
        collection: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        directory: Option<PathBuf>,
    },

    /// End the current rotation.
    Stop,

    /// Freeze the countdown.
    Pause,

    /// Continue a paused countdown.
    Resume,

    /// Skip to the next image.
    Next,

    /// Go back one image.
    Previous,

    /// Read the current status.
    Status,

    /// Check whether the daemon is running.
    Ping,
}

impl IpcQuery {
    /// The engine command this query maps to, if it is a plain command.
    #[must_use]
    pub const fn as_command(&self) -> Option<RotationCommand> {
        match self {
            Self::Stop => Some(RotationCommand::Stop),
            Self::Pause => Some(RotationCommand::Pause),
            Self::Resume => Some(RotationCommand::Resume),
            Self::Next => Some(RotationCommand::Next),
            Self::Previous => Some(RotationCommand::Previous),
            Self::Start { .. } | Self::Status | Self::Ping => None,
        }
    }

    /// Whether the daemon answers this query through the rotation engine, and
    /// so possibly only after a bounded desktop call.
    #[must_use]
    pub const fn reaches_engine(&self) -> bool { !matches!(self, Self::Status | Self::Ping) }
}

impl From<RotationCommand> for IpcQuery {
    fn from(command: RotationCommand) -> Self {
        match command {
            RotationCommand::Stop => Self::Stop,
            RotationCommand::Pause => Self::Pause,
            RotationCommand::Resume => Self::Resume,
            RotationCommand::Next => Self::Next,
            RotationCommand::Previous => Self::Previous,
        }
    }
}

/// Response from the daemon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IpcResponse {
    /// Successful response with data.
    Success { data: serde_json::Value },
    /// Error response.
    Error { error: String },
}

impl IpcResponse {
    /// Creates a success response.
    pub fn success(data: impl Serialize) -> Self {
        Self::Success {
            data: serde_json::to_value(data).unwrap_or(serde_json::Value::Null),
        }
    }

    /// Creates an error response.
    pub fn error(message: impl Into<String>) -> Self { Self::Error { error: message.into() } }

    /// Decodes the payload of a success response.
    ///
    /// # Errors
    ///
    /// Returns [`IpcError::Remote`] for error responses and
    /// [`IpcError::InvalidResponse`] when the payload has the wrong shape.
    pub fn into_data<T: DeserializeOwned>(self) -> Result<T, IpcError> {
        match self {
            Self::Success { data } => serde_json::from_value(data)
                .map_err(|e| IpcError::InvalidResponse(format!("unexpected payload: {e}"))),
            Self::Error { error } => Err(IpcError::Remote(error)),
        }
    }
}

/// Error type for IPC client operations.
#[derive(Debug, thiserror::Error)]
pub enum IpcError {
    /// The daemon is not running (no socket, or nothing listening).
    #[error("ArtWall daemon is not running (start it with `artwall daemon`)")]
    NotRunning,

    /// The daemon did not answer in time.
    #[error("Connection timed out")]
    Timeout,

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The daemon sent something unparseable.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The daemon processed the query and reported an error.
    #[error("{0}")]
    Remote(String),
}
