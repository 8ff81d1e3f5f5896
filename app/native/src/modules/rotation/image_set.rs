//! Image set discovery.
//!
//! An image set is the ordered list of image files found directly inside a
//! collection directory. It is rebuilt from disk every time a rotation starts
//! and never changes afterwards.

use std::fs;
use std::path::{Path, PathBuf};

/// Image file extensions recognised in a collection directory (compared lowercase).
pub const SUPPORTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "tiff", "bmp"];

/// Checks if a file has a supported image extension.
#[must_use]
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
}

/// An immutable, ordered sequence of image files from one directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageSet {
    images: Vec<PathBuf>,
}

impl ImageSet {
    /// Scans `dir` for supported images, sorted by file name ascending.
    ///
    /// Returns an empty set when the directory is missing, unreadable, or has
    /// no qualifying files. Callers decide whether an empty set is fatal.
    #[must_use]
    pub fn load(dir: &Path) -> Self {
        if !dir.is_dir() {
            return Self::default();
        }

        let mut images = Vec::new();

        match fs::read_dir(dir) {
            Ok(entries) => {
                for entry in entries.flatten() {
                    let path = entry.path();
                    if path.is_file() && is_supported_image(&path) {
                        images.push(path);
                    }
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, dir = %dir.display(), "failed to read collection directory");
            }
        }

        Self::from_paths(images)
    }

    /// Builds a set from arbitrary paths, applying the file-name ordering.
    #[must_use]
    pub fn from_paths(mut images: Vec<PathBuf>) -> Self {
        images.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        Self { images }
    }

    /// Number of images in the set.
    #[must_use]
    pub fn len(&self) -> usize { self.images.len() }

    /// Whether the set has no images.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.images.is_empty() }

    /// Returns the image at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Path> { self.images.get(index).map(PathBuf::as_path) }

    /// Iterates over the images in rotation order.
    pub fn iter(&self) -> impl Iterator<Item = &Path> { self.images.iter().map(PathBuf::as_path) }
}

/// Counts supported images in `dir` without building a full set.
#[must_use]
pub fn count_images(dir: &Path) -> usize {
    fs::read_dir(dir).map_or(0, |entries| {
        entries.flatten().filter(|e| e.path().is_file() && is_supported_image(&e.path())).count()
    })
}
