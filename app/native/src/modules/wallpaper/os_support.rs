//! Operating system version gate.

use std::fmt;

use sysinfo::System;

use super::ApplyError;

/// Oldest macOS release the desktop and screensaver preferences are known to work on.
pub const MIN_MACOS_VERSION: OsVersion = OsVersion { major: 13, minor: 0 };

/// A `major.minor` operating system version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct OsVersion {
    pub major: u32,
    pub minor: u32,
}

impl OsVersion {
    /// Parses strings such as `"14"`, `"14.2"` or `"14.2.1"`. Patch levels are ignored.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let mut parts = raw.trim().split('.');
        let major = parts.next()?.trim().parse().ok()?;
        let minor = match parts.next() {
            Some(minor) => minor.trim().parse().ok()?,
            None => 0,
        };
        Some(Self { major, minor })
    }
}

impl fmt::Display for OsVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "macOS {}.{}", self.major, self.minor)
    }
}

/// Checks a reported version string against `minimum`.
///
/// # Errors
///
/// Returns [`ApplyError::UnsupportedOs`] when the version is older than
/// `minimum` or cannot be parsed.
pub fn ensure_supported(reported: Option<&str>, minimum: OsVersion) -> Result<(), ApplyError> {
    let unsupported = |found: String| ApplyError::UnsupportedOs {
        found,
        minimum: minimum.to_string(),
    };

    let Some(raw) = reported else {
        return Err(unsupported("an unknown version".to_string()));
    };

    match OsVersion::parse(raw) {
        Some(version) if version >= minimum => Ok(()),
        Some(version) => Err(unsupported(version.to_string())),
        None => Err(unsupported(format!("unrecognised version '{raw}'"))),
    }
}

/// Checks the running system against [`MIN_MACOS_VERSION`].
///
/// # Errors
///
/// Returns [`ApplyError::UnsupportedOs`] on anything other than a recent macOS.
pub fn check_current_os() -> Result<(), ApplyError> {
    if !cfg!(target_os = "macos") {
        let name = System::name().unwrap_or_else(|| std::env::consts::OS.to_string());
        return Err(ApplyError::UnsupportedOs {
            found: name,
            minimum: MIN_MACOS_VERSION.to_string(),
        });
    }

    let version = System::os_version();
    tracing::debug!(version = ?version, "detected operating system version");
    ensure_supported(version.as_deref(), MIN_MACOS_VERSION)
}
