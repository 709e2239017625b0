//! Front-end loop: drive one poller until the job settles or the user quits.

use std::future::Future;

use tokio::sync::mpsc;

use crate::error::PollerClosed;
use crate::poller::{spawn_poller, PollerOptions};
use crate::service::StatusService;
use crate::status::{SubjectId, TerminalOutcome};
use crate::ui::renderer::Renderer;
use crate::ui::summary::Summarize;
use crate::ui::view::{TerminalView, ViewSignal};

/// Why the watch loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchExit {
    /// A status outside the in-progress subset was shown.
    Settled,
    Completed,
    Failed,
    /// The initial fetch failed, so there is nothing to poll.
    FetchFailed,
    /// `--start` was refused or errored, and the job then settled.
    ActionFailed,
    Interrupted,
}

impl WatchExit {
    pub fn exit_code(self) -> i32 {
        match self {
            Self::Settled | Self::Completed => 0,
            Self::Failed | Self::FetchFailed | Self::ActionFailed => 1,
            Self::Interrupted => 130,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchStep {
    Continue,
    Trigger,
    Exit(WatchExit),
}

/// Decides what the loop does next from the view's signals.
#[derive(Debug, Clone, Default)]
pub struct WatchSession {
    start_requested: bool,
    triggered: bool,
    rendered: bool,
    action_failed: bool,
}

impl WatchSession {
    /// `start_requested` asks for the remote job to be triggered once the
    /// first status is known.
    pub fn new(start_requested: bool) -> Self {
        Self {
            start_requested,
            ..Self::default()
        }
    }

    pub fn on_signal(&mut self, signal: ViewSignal) -> WatchStep {
        match signal {
            ViewSignal::Rendered {
                in_progress,
                outcome,
            } => {
                self.rendered = true;
                if self.start_requested && !self.triggered {
                    self.triggered = true;
                    // A job already running needs no second start.
                    return if in_progress {
                        WatchStep::Continue
                    } else {
                        WatchStep::Trigger
                    };
                }
                // Terminal outcomes exit on the routed callback instead.
                if in_progress || outcome.is_some() {
                    WatchStep::Continue
                } else if self.action_failed {
                    WatchStep::Exit(WatchExit::ActionFailed)
                } else {
                    WatchStep::Exit(WatchExit::Settled)
                }
            }
            ViewSignal::Error { fetch_failed } => {
                if fetch_failed && !self.rendered {
                    return WatchStep::Exit(WatchExit::FetchFailed);
                }
                if !fetch_failed && self.triggered {
                    self.action_failed = true;
                }
                WatchStep::Continue
            }
            ViewSignal::Finished(TerminalOutcome::Complete) => {
                WatchStep::Exit(WatchExit::Completed)
            }
            ViewSignal::Finished(TerminalOutcome::Failed) => WatchStep::Exit(WatchExit::Failed),
        }
    }
}

/// Poll `subject` with a [`TerminalView`] until it settles, a terminal
/// outcome is routed, or `shutdown` resolves.
pub async fn watch_status<S, Svc, F>(
    options: PollerOptions,
    subject: SubjectId,
    service: Svc,
    renderer: Renderer,
    start: bool,
    shutdown: F,
) -> Result<WatchExit, PollerClosed>
where
    S: Summarize,
    Svc: StatusService<S> + 'static,
    F: Future<Output = ()>,
{
    let (signal_tx, mut signals) = mpsc::unbounded_channel();
    let view = TerminalView::<S>::new(renderer, subject.clone(), signal_tx);
    let poller = spawn_poller(options, subject, service, view);
    poller.view_ready().await?;

    let mut session = WatchSession::new(start);
    tokio::pin!(shutdown);
    let exit = loop {
        tokio::select! {
            signal = signals.recv() => {
                let Some(signal) = signal else {
                    break WatchExit::Settled;
                };
                match session.on_signal(signal) {
                    WatchStep::Continue => {}
                    WatchStep::Trigger => {
                        tracing::debug!(subject = %poller.subject(), "starting remote job");
                        poller.trigger_action().await?;
                    }
                    WatchStep::Exit(exit) => break exit,
                }
            }
            _ = &mut shutdown => break WatchExit::Interrupted,
        }
    };

    poller.view_leaving().await?;
    Ok(exit)
}
