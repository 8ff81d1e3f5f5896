#![allow(clippy::multiple_crate_versions)]

//! ArtWall - wallpaper rotation for fine-art collections.
//!
//! This binary serves as both the daemon and the CLI:
//! - With no arguments it runs the rotation daemon in the foreground
//! - With a subcommand (e.g., `artwall next`) it talks to the running daemon

fn main() {
    let result = if std::env::args_os().len() == 1 {
        artwall_lib::daemon::run(false)
    } else {
        artwall_lib::cli::run()
    };

    if let Err(err) = result {
        eprintln!("artwall: {err}");
        std::process::exit(1);
    }
}
