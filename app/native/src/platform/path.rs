//! Shell-like path expansion.

use std::path::{Path, PathBuf};

/// Expands a leading `~` to the home directory. Blank input yields an empty path.
///
/// ```ignore
/// use artwall_lib::platform::path::expand;
///
/// let library = expand("~/Pictures/ArtWall");
/// assert!(!library.to_string_lossy().starts_with('~'));
/// ```
#[must_use]
pub fn expand(path: &str) -> PathBuf {
    let path = path.trim();

    if path.is_empty() {
        return PathBuf::new();
    }

    PathBuf::from(shellexpand::tilde(path).as_ref())
}

/// Expands `path` and resolves it against `base_dir` when it is still relative.
#[must_use]
pub fn expand_and_resolve(path: &str, base_dir: &Path) -> PathBuf {
    let expanded = expand(path);

    if expanded.as_os_str().is_empty() || expanded.is_absolute() {
        return expanded;
    }

    base_dir.join(expanded)
}
