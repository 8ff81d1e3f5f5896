//! Application-wide constants.

/// Reverse-domain identifier, used for the cache directory.
pub const APP_BUNDLE_ID: &str = "com.artwall.app";

/// Binary name used in messages and completions.
pub const APP_NAME: &str = "artwall";

/// Images per collection for a full day of rotation at the default interval.
pub const DAILY_IMAGE_TARGET: usize = 48;
