//! Slideshow screensaver preferences.
//!
//! The photo slideshow screensaver reads its source folder from the per-host
//! `com.apple.ScreenSaverPhotoChooser` domain. We only ever write to it.

use std::path::Path;
use std::process::Command;

use super::ApplyError;

const DEFAULTS_BIN: &str = "/usr/bin/defaults";
const PHOTO_CHOOSER_DOMAIN: &str = "com.apple.ScreenSaverPhotoChooser";

/// `SelectedSource` value meaning "a folder chosen by the user".
const FOLDER_SOURCE: &str = "4";

/// Builds the `defaults` invocations that point the slideshow at `directory`.
#[must_use]
pub fn defaults_commands(directory: &Path) -> Vec<Vec<String>> {
    let dir = directory.display().to_string();
    let write = |key: &str, kind: &str, value: &str| {
        ["-currentHost", "write", PHOTO_CHOOSER_DOMAIN, key, kind, value]
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
    };

    vec![
        write("SelectedFolderPath", "-string", &dir),
        write("SelectedSource", "-int", FOLDER_SOURCE),
        write("ShufflesPhotos", "-bool", "false"),
    ]
}

/// Points the slideshow screensaver at `directory`.
///
/// # Errors
///
/// Returns [`ApplyError::Screensaver`] if any `defaults` call fails to run or
/// exits unsuccessfully.
pub fn configure(directory: &Path) -> Result<(), ApplyError> {
    for args in defaults_commands(directory) {
        let output = Command::new(DEFAULTS_BIN)
            .args(&args)
            .output()
            .map_err(|err| ApplyError::Screensaver(format!("failed to run defaults: {err}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ApplyError::Screensaver(format!(
                "defaults {} exited with {}: {}",
                args.join(" "),
                output.status,
                stderr.trim()
            )));
        }
    }

    tracing::debug!(dir = %directory.display(), "screensaver slideshow folder updated");
    Ok(())
}
