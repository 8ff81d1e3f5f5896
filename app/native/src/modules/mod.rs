//! Feature modules for ArtWall.
//!
//! - [`library`] - Downloaded collections on disk
//! - [`rotation`] - The wallpaper rotation engine
//! - [`wallpaper`] - Applying images to the desktop and screensaver

pub mod library;
pub mod rotation;
pub mod wallpaper;
