//! Collection library on disk.
//!
//! The downloader fills one subdirectory per collection under the library
//! root. This module only reads that layout; it never writes to it.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use super::rotation::count_images;
use crate::constants::DAILY_IMAGE_TARGET;

/// Summary of one downloaded collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionSummary {
    /// Directory name, used as the collection label.
    pub name: String,
    /// Full path to the collection directory.
    pub path: PathBuf,
    /// Number of supported images directly inside the directory.
    pub images: usize,
}

impl CollectionSummary {
    /// Whether the collection has enough images for a full day of rotation.
    #[must_use]
    pub const fn is_complete(&self) -> bool { self.images >= DAILY_IMAGE_TARGET }

    /// Completion toward [`DAILY_IMAGE_TARGET`], capped at 100.
    #[must_use]
    pub fn percent_complete(&self) -> u8 {
        let percent = (self.images.min(DAILY_IMAGE_TARGET) * 100) / DAILY_IMAGE_TARGET;
        u8::try_from(percent).unwrap_or(100)
    }
}

/// Lists collections under `root`, sorted by name. Hidden directories are skipped.
///
/// # Errors
///
/// Returns an error if `root` cannot be read.
pub fn list_collections(root: &Path) -> std::io::Result<Vec<CollectionSummary>> {
    let mut collections: Vec<CollectionSummary> = fs::read_dir(root)?
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .filter_map(|path| {
            let name = path.file_name()?.to_string_lossy().to_string();
            if name.starts_with('.') {
                return None;
            }
            let images = count_images(&path);
            Some(CollectionSummary { name, path, images })
        })
        .collect();

    collections.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(collections)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(images: usize) -> CollectionSummary {
        CollectionSummary {
            name: "Test".to_string(),
            path: PathBuf::from("/art/Test"),
            images,
        }
    }

    #[test]
    fn test_list_collections_counts_images() {
        let root = tempfile::tempdir().unwrap();
        for (name, files) in [("Ukiyo-e", 2), ("Baroque", 3), (".cache", 1)] {
            let dir = root.path().join(name);
            fs::create_dir(&dir).unwrap();
            for i in 0..files {
                fs::write(dir.join(format!("{i}.jpg")), b"").unwrap();
            }
        }
        fs::write(root.path().join("manifest.json"), b"{}").unwrap();

        let collections = list_collections(root.path()).unwrap();
        let names: Vec<_> = collections.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Baroque", "Ukiyo-e"]);
        assert_eq!(collections[0].images, 3);
        assert_eq!(collections[1].images, 2);
    }

    #[test]
    fn test_list_collections_missing_root_fails() {
        assert!(list_collections(Path::new("/nonexistent/artwall/library")).is_err());
    }

    #[test]
    fn test_percent_complete() {
        assert_eq!(summary(0).percent_complete(), 0);
        assert_eq!(summary(24).percent_complete(), 50);
        assert_eq!(summary(48).percent_complete(), 100);
        assert_eq!(summary(120).percent_complete(), 100);
        assert!(summary(48).is_complete());
        assert!(!summary(47).is_complete());
    }
}
