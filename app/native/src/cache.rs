//! Where runtime files live.
//!
//! The IPC socket goes under `~/Library/Caches/{APP_BUNDLE_ID}/`
//! on macOS, falling back to `/tmp/{APP_BUNDLE_ID}/` when no cache dir exists.

use std::path::PathBuf;

use crate::constants::APP_BUNDLE_ID;

/// Per-user cache directory for ArtWall.
#[must_use]
pub fn get_cache_dir() -> PathBuf {
    dirs::cache_dir().map_or_else(
        || PathBuf::from(format!("/tmp/{APP_BUNDLE_ID}")),
        |cache| cache.join(APP_BUNDLE_ID),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_dir_ends_with_bundle_id() {
        assert!(get_cache_dir().ends_with(APP_BUNDLE_ID));
    }
}
