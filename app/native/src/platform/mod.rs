//! Platform helpers shared by the daemon and the CLI.
//!
//! - [`path`] - `~` expansion and path resolution
//! - [`thread`] - Named background threads

pub mod path;
pub mod thread;
