//! Configuration data model.
//!
//! Struct/enum definitions plus default values only. Loading and precedence
//! live in `config::mod`.

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use super::defaults::{
    DEFAULT_POLL_INTERVAL_SECS, DEFAULT_PREFERENCES_DIR, DEFAULT_PREFERENCES_FILE,
    DEFAULT_SERVICE_BASE_URL, DEFAULT_SERVICE_TIMEOUT_SECS,
};
use crate::poller::PollerOptions;

/// Top-level runtime configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub poller: PollerConfig,
    pub service: ServiceConfig,
    pub preferences: PreferencesConfig,
    pub display: DisplayConfig,
}

/// `[poller]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PollerConfig {
    /// Seconds between fetches while a job is in progress.
    pub interval_secs: u64,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            interval_secs: DEFAULT_POLL_INTERVAL_SECS,
        }
    }
}

impl PollerConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    pub fn options(&self) -> PollerOptions {
        PollerOptions {
            interval: self.interval(),
        }
    }
}

/// `[service]` section: where status payloads come from.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub base_url: String,
    /// Inline bearer token. Prefer `api_token_env`.
    pub api_token: Option<String>,
    /// Name of an env var holding the bearer token.
    pub api_token_env: Option<String>,
    /// Per-request timeout applied by the HTTP client.
    pub timeout_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_SERVICE_BASE_URL.to_string(),
            api_token: None,
            api_token_env: None,
            timeout_secs: DEFAULT_SERVICE_TIMEOUT_SECS,
        }
    }
}

/// `[preferences]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PreferencesConfig {
    /// Explicit preferences file; defaults under the user data dir.
    pub path: Option<String>,
}

impl PreferencesConfig {
    /// Resolve the preferences file location.
    pub fn resolved_path(&self) -> PathBuf {
        if let Some(path) = self.path.as_deref().map(str::trim).filter(|p| !p.is_empty()) {
            return PathBuf::from(path);
        }
        dirs::data_dir()
            .map(|dir| dir.join("sitewatch").join(DEFAULT_PREFERENCES_FILE))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PREFERENCES_DIR).join(DEFAULT_PREFERENCES_FILE))
    }
}

/// `[display]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub color: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { color: true }
    }
}
