//! Configuration loading from TOML files and environment variables.
//!
//! Config is loaded in this order of precedence (highest wins):
//! 1. Environment variables (`SITEWATCH_BASE_URL`, `SITEWATCH_API_TOKEN`,
//!    `SITEWATCH_POLL_INTERVAL_SECS`, `SITEWATCH_TIMEOUT_SECS`)
//! 2. TOML file specified via --config CLI flag
//! 3. ./sitewatch.toml in the current directory
//! 4. $XDG_CONFIG_HOME/sitewatch/sitewatch.toml (or ~/.config/...)
//! 5. Built-in defaults

use std::path::{Path, PathBuf};

use crate::error::ConfigError;

mod defaults;
mod env;
mod sources;
mod types;

use env::{apply_runtime_env_overrides, resolve_api_token};
use sources::read_config_text_with_sources;
pub use sources::config_root_dir;
pub use types::{Config, DisplayConfig, PollerConfig, PreferencesConfig, ServiceConfig};

/// Load configuration from disk and environment.
///
/// `path_override` is an explicit config file path (from --config flag).
pub fn load_config(path_override: Option<&str>) -> Result<Config, ConfigError> {
    load_config_from_sources(
        path_override,
        |path| std::fs::read_to_string(path),
        |name| std::env::var(name).ok(),
        config_root_dir,
    )
}

fn load_config_from_sources<FRead, FEnv, FRoot>(
    path_override: Option<&str>,
    read_file: FRead,
    env_lookup: FEnv,
    config_root: FRoot,
) -> Result<Config, ConfigError>
where
    FRead: Fn(&Path) -> Result<String, std::io::Error>,
    FEnv: Fn(&str) -> Option<String>,
    FRoot: Fn() -> Option<PathBuf>,
{
    let (config_text, source) =
        read_config_text_with_sources(path_override, &read_file, &config_root)?;
    tracing::debug!(?source, "loaded config source");
    let mut config: Config = toml::from_str(&config_text)?;
    resolve_api_token(&mut config, &env_lookup);
    apply_runtime_env_overrides(&mut config, &env_lookup)?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.poller.interval_secs == 0 {
        return Err(ConfigError::Invalid(
            "poller.interval_secs must be at least 1".to_string(),
        ));
    }
    if config.service.timeout_secs == 0 {
        return Err(ConfigError::Invalid(
            "service.timeout_secs must be at least 1".to_string(),
        ));
    }
    let base_url = config.service.base_url.trim();
    if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        return Err(ConfigError::Invalid(format!(
            "service.base_url `{base_url}` must start with http:// or https://"
        )));
    }
    Ok(())
}
