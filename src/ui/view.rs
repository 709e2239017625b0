//! `StatusView` that prints to the terminal and reports back to the front-end.

use std::marker::PhantomData;

use tokio::sync::mpsc;

use crate::error::PollError;
use crate::status::{SubjectId, TerminalOutcome};
use crate::ui::renderer::Renderer;
use crate::ui::summary::{StatusSummary, Summarize};
use crate::view::StatusView;

/// What the view saw, forwarded to the loop driving the poller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewSignal {
    Rendered {
        in_progress: bool,
        outcome: Option<TerminalOutcome>,
    },
    Error {
        fetch_failed: bool,
    },
    Finished(TerminalOutcome),
}

pub struct TerminalView<S> {
    renderer: Renderer,
    subject: SubjectId,
    signals: mpsc::UnboundedSender<ViewSignal>,
    /// Last printed summary; identical refreshes are not reprinted.
    last: Option<StatusSummary>,
    _status: PhantomData<fn(S)>,
}

impl<S: Summarize> TerminalView<S> {
    pub fn new(
        renderer: Renderer,
        subject: SubjectId,
        signals: mpsc::UnboundedSender<ViewSignal>,
    ) -> Self {
        Self {
            renderer,
            subject,
            signals,
            last: None,
            _status: PhantomData,
        }
    }

    fn signal(&self, signal: ViewSignal) {
        // The front-end may already be gone during shutdown.
        let _ = self.signals.send(signal);
    }

    fn print_summary(&self, summary: &StatusSummary) {
        self.renderer
            .section(&format!("{} ({})", summary.title, self.subject));
        if let Some(percent) = summary.progress {
            self.renderer
                .field("progress", &self.renderer.progress_bar(percent));
        }
        for (key, value) in &summary.fields {
            self.renderer.field(key, value);
        }
        for detail in &summary.details {
            self.renderer.detail(detail);
        }
    }
}

impl<S: Summarize> StatusView<S> for TerminalView<S> {
    fn render(&mut self, status: &S) {
        let summary = status.summarize();
        if self.last.as_ref() != Some(&summary) {
            self.print_summary(&summary);
            self.last = Some(summary);
        }
        self.signal(ViewSignal::Rendered {
            in_progress: status.is_in_progress(),
            outcome: status.terminal_outcome(),
        });
    }

    fn show_loading(&mut self) {
        self.renderer
            .activity(&format!("loading {} for {}", S::noun(), self.subject));
    }

    fn show_error(&mut self, error: &PollError) {
        self.renderer.error(&error.to_string());
        self.signal(ViewSignal::Error {
            fetch_failed: matches!(error, PollError::FetchFailed(_)),
        });
    }

    fn show_complete(&mut self, status: &S) {
        self.renderer.outcome(true, &status.outcome_text());
        self.signal(ViewSignal::Finished(TerminalOutcome::Complete));
    }

    fn show_failed(&mut self, status: &S) {
        self.renderer.outcome(false, &status.outcome_text());
        self.signal(ViewSignal::Finished(TerminalOutcome::Failed));
    }
}
