//! CLI argument parsing via clap.

use clap::{ArgGroup, Parser, Subcommand};
use sitewatch::build_info;
use sitewatch::preferences::InsightKind;

/// Watch long-running site jobs (security scans, backups) and manage the
/// per-site insights layout.
#[derive(Debug, Parser)]
#[command(
    name = "sitewatch",
    version,
    long_version = build_info::LONG_VERSION,
    after_help = build_info::HELP_BUILD_METADATA
)]
pub struct Args {
    /// Path to config file (default: ./sitewatch.toml or ~/.config/sitewatch/sitewatch.toml).
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<String>,

    /// Override the status API base URL.
    #[arg(long = "base-url", global = true)]
    pub base_url: Option<String>,

    /// Override the polling interval in seconds.
    #[arg(long = "interval", value_name = "SECS", global = true)]
    pub interval: Option<u64>,

    /// Disable color output.
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    /// Emit debug logs to stderr.
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the security scan status, polling while a scan runs.
    Scan {
        /// Site id or domain.
        site: String,
        /// Start a new scan once the current status is known.
        #[arg(long = "start")]
        start: bool,
    },
    /// Poll a downloadable backup until it completes or fails.
    Backup {
        /// Site id or domain.
        site: String,
        /// Backup download id returned when the backup was requested.
        download_id: u64,
    },
    /// Show or edit the insights layout for a site.
    #[command(group(
        ArgGroup::new("edit")
            .args(["move_up", "move_down", "remove", "add", "dismiss_customize", "dismiss_grow_audience"])
            .multiple(false)
    ))]
    Insights {
        /// Site id or domain.
        site: String,
        #[arg(long = "move-up", value_name = "CARD")]
        move_up: Option<InsightKind>,
        #[arg(long = "move-down", value_name = "CARD")]
        move_down: Option<InsightKind>,
        #[arg(long = "remove", value_name = "CARD")]
        remove: Option<InsightKind>,
        #[arg(long = "add", value_name = "CARD")]
        add: Option<InsightKind>,
        /// Hide the customize card on every site.
        #[arg(long = "dismiss-customize")]
        dismiss_customize: bool,
        /// Hide the grow-audience card on this site.
        #[arg(long = "dismiss-grow-audience")]
        dismiss_grow_audience: bool,
        /// All-time view count; low counts make the grow-audience card eligible.
        #[arg(long = "views", value_name = "COUNT")]
        views: Option<u64>,
        /// Whether a grow-audience nudge is available for this site.
        #[arg(long = "nudge")]
        nudge: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::{Args, Command};
    use clap::Parser;
    use sitewatch::preferences::InsightKind;

    #[test]
    fn scan_parses_start_flag_and_globals() {
        let args = Args::parse_from(["sitewatch", "scan", "example.com", "--start", "--no-color"]);
        assert!(args.no_color);
        match args.command {
            Command::Scan { site, start } => {
                assert_eq!(site, "example.com");
                assert!(start);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn backup_requires_numeric_download_id() {
        let args = Args::parse_from(["sitewatch", "--interval", "2", "backup", "site-1", "42"]);
        assert_eq!(args.interval, Some(2));
        assert!(matches!(
            args.command,
            Command::Backup { download_id: 42, .. }
        ));
        assert!(Args::try_parse_from(["sitewatch", "backup", "site-1", "soon"]).is_err());
    }

    #[test]
    fn insights_parses_card_names() {
        let args = Args::parse_from([
            "sitewatch",
            "insights",
            "site-1",
            "--move-up",
            "todaysStats",
        ]);
        match args.command {
            Command::Insights { move_up, .. } => {
                assert_eq!(move_up, Some(InsightKind::TodaysStats));
            }
            other => panic!("unexpected command: {other:?}"),
        }
        assert!(Args::try_parse_from(["sitewatch", "insights", "site-1", "--remove", "bogus"])
            .is_err());
    }

    #[test]
    fn insights_edits_are_mutually_exclusive() {
        let result = Args::try_parse_from([
            "sitewatch",
            "insights",
            "site-1",
            "--remove",
            "comments",
            "--dismiss-customize",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Args::try_parse_from(["sitewatch"]).is_err());
    }
}
