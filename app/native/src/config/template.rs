//! Configuration template generation.

use std::fs;
use std::path::Path;

/// Generates a configuration template showing every option with its default.
#[must_use]
pub fn generate_config_template() -> String {
    r#"// ArtWall Configuration File
// ==========================
// This file uses JSONC format (JSON with comments).
// Every option is shown with its default value.

{
  // ============================================================================
  // Collection Library
  // ============================================================================
  "library": {
    // Directory holding one subdirectory per downloaded collection
    "root": "~/Pictures/ArtWall",

    // Collection to start rotating when the daemon launches (empty = start idle)
    "defaultCollection": ""
  },

  // ============================================================================
  // Rotation
  // ============================================================================
  "rotation": {
    // Seconds between automatic wallpaper changes (1800 = 30 minutes)
    "interval": 1800,

    // Seconds a wallpaper change may take before it is reported as failed
    "applyTimeout": 10,

    // Point the photo slideshow screensaver at the rotating collection
    "screensaver": true
  }
}
"#
    .to_string()
}

/// Writes the configuration template to `path`, creating parent directories.
///
/// # Errors
///
/// Returns an error if the directories or the file cannot be written.
pub fn create_config_file(path: &Path) -> Result<(), std::io::Error> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, generate_config_template())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ArtwallConfig, parse_config};

    #[test]
    fn test_template_parses_to_defaults() {
        let config = parse_config(&generate_config_template()).unwrap();
        assert_eq!(config, ArtwallConfig::default());
    }

    #[test]
    fn test_template_documents_every_section() {
        let template = generate_config_template();
        for key in ["library", "root", "defaultCollection", "rotation", "interval", "applyTimeout"] {
            assert!(template.contains(key), "template is missing {key}");
        }
    }

    #[test]
    fn test_create_config_file_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("artwall").join("config.jsonc");

        create_config_file(&path).unwrap();

        assert!(path.exists());
        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("// ArtWall Configuration File"));
    }
}
