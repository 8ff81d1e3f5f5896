//! Error types for ArtWall.
//!
//! Subsystems define their own error enums; this is the unified error the
//! CLI and daemon entry points report.

use serde::Serialize;
use thiserror::Error;

use crate::config::ConfigError;
use crate::ipc::IpcError;
use crate::modules::rotation::RotationError;

/// Errors that can occur during application execution.
#[derive(Debug, Error, Serialize)]
#[serde(tag = "kind", content = "message")]
pub enum ArtwallError {
    /// Invalid command arguments.
    #[error("{0}")]
    InvalidArguments(String),
    /// The rotation engine refused the request.
    #[error("Rotation error: {0}")]
    RotationError(String),
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),
    /// IPC communication error.
    #[error("IPC error: {0}")]
    IpcError(String),
    /// IO error.
    #[error("IO error: {0}")]
    IoError(String),
    /// Generic command error.
    #[error("{0}")]
    CommandError(String),
}

impl From<RotationError> for ArtwallError {
    fn from(err: RotationError) -> Self { Self::RotationError(err.to_string()) }
}

impl From<ConfigError> for ArtwallError {
    fn from(err: ConfigError) -> Self { Self::ConfigError(err.to_string()) }
}

impl From<IpcError> for ArtwallError {
    fn from(err: IpcError) -> Self { Self::IpcError(err.to_string()) }
}

impl From<std::io::Error> for ArtwallError {
    fn from(err: std::io::Error) -> Self { Self::IoError(err.to_string()) }
}

impl From<serde_json::Error> for ArtwallError {
    fn from(err: serde_json::Error) -> Self { Self::CommandError(err.to_string()) }
}

impl From<String> for ArtwallError {
    fn from(msg: String) -> Self { Self::CommandError(msg) }
}

impl From<&str> for ArtwallError {
    fn from(msg: &str) -> Self { Self::CommandError(msg.to_string()) }
}
