//! ArtWall - rotate curated fine-art collections as your macOS wallpaper.
//!
//! The library holds the rotation engine, the daemon that hosts it and the
//! CLI that controls it over a Unix socket.

pub mod cache;
pub mod cli;
pub mod config;
pub mod constants;
pub mod daemon;
pub mod error;
pub mod ipc;
pub mod modules;
pub mod platform;
pub mod schema;

use tracing_subscriber::EnvFilter;

/// Installs the global `tracing` subscriber, writing to stderr.
///
/// `RUST_LOG` wins over `default_directive`. Calling this twice is harmless.
pub fn init_logging(default_directive: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
