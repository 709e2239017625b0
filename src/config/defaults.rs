//! Default configuration constants.

/// Seconds between fetches while polling.
pub(super) const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;
/// Default status API root.
pub(super) const DEFAULT_SERVICE_BASE_URL: &str = "https://public-api.wordpress.com/wpcom/v2";
/// Default per-request timeout for status calls.
pub(super) const DEFAULT_SERVICE_TIMEOUT_SECS: u64 = 30;
/// Fallback preferences directory when no user data dir is known.
pub(super) const DEFAULT_PREFERENCES_DIR: &str = ".sitewatch";
pub(super) const DEFAULT_PREFERENCES_FILE: &str = "preferences.json";
/// Config file name searched locally and under the config root.
pub(super) const CONFIG_FILE_NAME: &str = "sitewatch.toml";
