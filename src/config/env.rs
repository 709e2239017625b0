//! Environment overrides.
//!
//! `SITEWATCH_*` variables win over file values.

use crate::error::ConfigError;

use super::Config;

pub(super) fn apply_runtime_env_overrides<FEnv>(
    config: &mut Config,
    env_lookup: &FEnv,
) -> Result<(), ConfigError>
where
    FEnv: Fn(&str) -> Option<String>,
{
    if let Some(url) = non_empty(env_lookup, "SITEWATCH_BASE_URL") {
        config.service.base_url = url;
    }
    if let Some(token) = non_empty(env_lookup, "SITEWATCH_API_TOKEN") {
        config.service.api_token = Some(token);
    }
    if let Some(interval) = non_empty(env_lookup, "SITEWATCH_POLL_INTERVAL_SECS") {
        config.poller.interval_secs = parse_secs("SITEWATCH_POLL_INTERVAL_SECS", &interval)?;
    }
    if let Some(timeout) = non_empty(env_lookup, "SITEWATCH_TIMEOUT_SECS") {
        config.service.timeout_secs = parse_secs("SITEWATCH_TIMEOUT_SECS", &timeout)?;
    }
    Ok(())
}

/// Fill `api_token` from the env var named by `api_token_env` when no inline
/// token is set.
pub(super) fn resolve_api_token<FEnv>(config: &mut Config, env_lookup: &FEnv)
where
    FEnv: Fn(&str) -> Option<String>,
{
    let has_inline = config
        .service
        .api_token
        .as_deref()
        .is_some_and(|token| !token.trim().is_empty());
    if has_inline {
        return;
    }
    if let Some(var) = config.service.api_token_env.as_deref() {
        config.service.api_token = non_empty(env_lookup, var.trim());
    }
}

fn non_empty<FEnv>(env_lookup: &FEnv, name: &str) -> Option<String>
where
    FEnv: Fn(&str) -> Option<String>,
{
    env_lookup(name)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_secs(name: &str, value: &str) -> Result<u64, ConfigError> {
    let parsed = value.parse::<u64>().map_err(|_| {
        ConfigError::Invalid(format!(
            "invalid {name} value `{value}`: expected positive integer seconds"
        ))
    })?;
    // Clamp to at least 1 second; zero would spin the poll loop.
    Ok(parsed.max(1))
}
