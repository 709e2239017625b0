//! Application entry orchestration for the sitewatch CLI.

use serde::de::DeserializeOwned;
use sitewatch::build_info;
use sitewatch::config::{load_config, Config};
use sitewatch::logging::init_logging;
use sitewatch::preferences::GrowAudienceNudge;
use sitewatch::service::HttpStatusService;
use sitewatch::status::{BackupStatus, ScanStatus, SubjectId};
use sitewatch::ui::{watch_status, Renderer, Summarize};

use crate::app::insights::{self, InsightsEdit};
use crate::cli::{Args, Command};

/// Run one CLI invocation and return the process exit code.
pub(crate) async fn run(args: Args) -> i32 {
    init_logging(args.verbose);
    tracing::debug!(build = %build_info::startup_metadata_line(), "starting sitewatch");

    let mut config = match load_config(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            return 1;
        }
    };
    apply_cli_overrides(&mut config, &args);
    let renderer = Renderer::new(config.display.color);

    match args.command {
        Command::Scan { site, start } => {
            watch::<ScanStatus>(&config, renderer, SubjectId::new(site), "scan", start).await
        }
        Command::Backup { site, download_id } => {
            let resource = format!("backup/{download_id}");
            watch::<BackupStatus>(&config, renderer, SubjectId::new(site), &resource, false).await
        }
        Command::Insights {
            site,
            move_up,
            move_down,
            remove,
            add,
            dismiss_customize,
            dismiss_grow_audience,
            views,
            nudge,
        } => {
            let edit = move_up
                .map(InsightsEdit::MoveUp)
                .or(move_down.map(InsightsEdit::MoveDown))
                .or(remove.map(InsightsEdit::Remove))
                .or(add.map(InsightsEdit::Add))
                .or(dismiss_customize.then_some(InsightsEdit::DismissCustomize))
                .or(dismiss_grow_audience.then_some(InsightsEdit::DismissGrowAudience));
            let nudge = GrowAudienceNudge {
                all_time_views: views,
                nudge_available: nudge,
            };
            insights::run(&config, renderer, SubjectId::new(site), nudge, edit)
        }
    }
}

/// Flags beat both the config file and `SITEWATCH_*` env vars.
pub(crate) fn apply_cli_overrides(config: &mut Config, args: &Args) {
    if let Some(url) = args.base_url.as_deref() {
        config.service.base_url = url.trim().to_string();
    }
    if let Some(secs) = args.interval {
        config.poller.interval_secs = secs.max(1);
    }
    if args.no_color {
        config.display.color = false;
    }
}

async fn watch<S>(
    config: &Config,
    renderer: Renderer,
    subject: SubjectId,
    resource: &str,
    start: bool,
) -> i32
where
    S: Summarize + DeserializeOwned,
{
    let service = HttpStatusService::<S>::new(&config.service, resource);
    let interrupted = async {
        if tokio::signal::ctrl_c().await.is_err() {
            // Without a signal handler the watch only ends on its own.
            std::future::pending::<()>().await;
        }
    };
    match watch_status::<S, _, _>(
        config.poller.options(),
        subject,
        service,
        renderer,
        start,
        interrupted,
    )
    .await
    {
        Ok(exit) => {
            tracing::debug!(?exit, "watch finished");
            exit.exit_code()
        }
        Err(e) => {
            renderer.error(&e.to_string());
            1
        }
    }
}
