//! Compile-time build metadata exposed to CLI surfaces.

/// Semver package version from `Cargo.toml`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// VCS commit hash captured at build time.
pub const GIT_COMMIT: &str = env!("SITEWATCH_BUILD_GIT_HASH");

/// Build timestamp captured at compile time.
pub const BUILD_TIMESTAMP: &str = env!("SITEWATCH_BUILD_TIMESTAMP");

/// Help trailer block that surfaces build metadata in `sitewatch --help`.
pub const HELP_BUILD_METADATA: &str = concat!(
    "Build metadata:\n  commit: ",
    env!("SITEWATCH_BUILD_GIT_HASH"),
    "\n  built: ",
    env!("SITEWATCH_BUILD_TIMESTAMP")
);

/// Body of `sitewatch --version` (clap prefixes the binary name).
pub const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "\ncommit: ",
    env!("SITEWATCH_BUILD_GIT_HASH"),
    "\nbuilt: ",
    env!("SITEWATCH_BUILD_TIMESTAMP")
);

/// One-line metadata for `--verbose` startup logging.
pub fn startup_metadata_line() -> String {
    format!("v{VERSION} ({GIT_COMMIT}, built {BUILD_TIMESTAMP})")
}
