//! Tracing subscriber setup for the CLI.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Env var carrying extra filter directives (e.g. `sitewatch::poller=trace`).
pub const LOG_ENV_VAR: &str = "SITEWATCH_LOG";

/// Base directive applied under any `SITEWATCH_LOG` directives.
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "sitewatch=debug"
    } else {
        "sitewatch=warn"
    }
}

/// Build the filter from `SITEWATCH_LOG` plus the default directive.
///
/// An unparsable `SITEWATCH_LOG` falls back to the default directive alone.
pub fn build_filter(verbose: bool, env_value: Option<&str>) -> EnvFilter {
    let base = default_directive(verbose);
    let directives = match env_value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(extra) => format!("{base},{extra}"),
        None => base.to_string(),
    };
    EnvFilter::try_new(&directives).unwrap_or_else(|_| EnvFilter::new(base))
}

/// Install the global subscriber. Output goes to stderr so stdout stays
/// reserved for status rendering.
///
/// Calling this twice is a no-op; the second install attempt is ignored.
pub fn init_logging(verbose: bool) {
    let env_value = std::env::var(LOG_ENV_VAR).ok();
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true),
        )
        .with(build_filter(verbose, env_value.as_deref()))
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_switches_default_level() {
        assert_eq!(default_directive(false), "sitewatch=warn");
        assert_eq!(default_directive(true), "sitewatch=debug");
    }

    #[test]
    fn env_directives_are_appended() {
        let filter = build_filter(false, Some("sitewatch::poller=trace"));
        let text = filter.to_string();
        assert!(text.contains("sitewatch=warn"), "got: {text}");
        assert!(text.contains("sitewatch::poller=trace"), "got: {text}");
    }

    #[test]
    fn bad_env_directive_falls_back() {
        let filter = build_filter(true, Some("sitewatch=loud"));
        assert_eq!(filter.to_string(), "sitewatch=debug");
    }

    #[test]
    fn init_twice_does_not_panic() {
        init_logging(false);
        init_logging(true);
    }
}
