//! Synchronous poller state machine.
//!
//! `PollerCore` owns the last known status, the optional timer, and the view.
//! It never awaits: the actor loop asks it whether to start service calls and
//! feeds completed results back in.

use std::time::Duration;

use crate::error::{ActionFailure, PollError, ServiceError};
use crate::status::{StatusObject, TerminalOutcome};
use crate::view::StatusView;

use super::timer::PollingTimer;
use super::{PollPhase, PollerSnapshot};

pub(crate) struct PollerCore<S, V> {
    view: V,
    status: Option<S>,
    timer: Option<PollingTimer>,
    period: Duration,
    next_generation: u64,
    /// Outcome already routed to `show_complete`/`show_failed`.
    routed: Option<TerminalOutcome>,
    has_fetched: bool,
    fetch_in_flight: bool,
    stopped: bool,
}

impl<S, V> PollerCore<S, V>
where
    S: StatusObject,
    V: StatusView<S>,
{
    pub(crate) fn new(view: V, period: Duration) -> Self {
        Self {
            view,
            status: None,
            timer: None,
            period,
            next_generation: 1,
            routed: None,
            has_fetched: false,
            fetch_in_flight: false,
            stopped: false,
        }
    }

    /// Show the loading indicator. The caller follows up with a fetch.
    pub(crate) fn view_ready(&mut self) {
        if self.stopped {
            return;
        }
        self.view.show_loading();
    }

    /// Claim the single fetch slot. Returns false when stopped or when a fetch
    /// is already pending, in which case the request is folded into it.
    pub(crate) fn begin_fetch(&mut self) -> bool {
        if self.stopped {
            return false;
        }
        if self.fetch_in_flight {
            tracing::debug!("fetch already in flight; coalescing");
            return false;
        }
        self.fetch_in_flight = true;
        true
    }

    pub(crate) fn finish_fetch(&mut self, result: Result<S, ServiceError>) {
        self.fetch_in_flight = false;
        if self.stopped {
            return;
        }
        match result {
            Ok(status) => self.refresh_did_succeed(status),
            Err(err) => {
                tracing::warn!(error = %err, "error fetching status");
                self.view.show_error(&PollError::FetchFailed(err));
            }
        }
    }

    fn refresh_did_succeed(&mut self, status: S) {
        self.has_fetched = true;
        self.view.render(&status);
        self.route_terminal(&status);
        self.status = Some(status);
        self.toggle_polling();
    }

    fn route_terminal(&mut self, status: &S) {
        let outcome = status.terminal_outcome();
        if outcome == self.routed {
            return;
        }
        self.routed = outcome;
        match outcome {
            Some(TerminalOutcome::Complete) => self.view.show_complete(status),
            Some(TerminalOutcome::Failed) => self.view.show_failed(status),
            None => {}
        }
    }

    /// Apply the optimistic in-progress transition and start polling without
    /// an immediate fetch. Returns false once stopped.
    pub(crate) fn begin_trigger(&mut self) -> bool {
        if self.stopped {
            return false;
        }
        if let Some(status) = self.status.as_mut() {
            status.mark_in_progress();
            self.view.render(status);
        }
        self.ensure_timer();
        true
    }

    pub(crate) fn finish_trigger(&mut self, result: Result<bool, ServiceError>) {
        if self.stopped {
            return;
        }
        let failure = match result {
            Ok(true) => return,
            Ok(false) => ActionFailure::Rejected,
            Err(err) => ActionFailure::Service(err),
        };
        tracing::warn!(error = %failure, "error starting remote job");
        self.view.show_error(&PollError::ActionFailed(failure));
    }

    /// Called when the timer deadline passes. Returns whether to fetch.
    pub(crate) fn timer_fired(&mut self) -> bool {
        match self.timer.as_mut() {
            Some(timer) => timer.advance(),
            None => return false,
        }
        self.begin_fetch()
    }

    fn toggle_polling(&mut self) {
        if self.status.as_ref().is_some_and(S::is_in_progress) {
            self.ensure_timer();
        } else {
            self.cancel_timer();
        }
    }

    /// Create the timer unless one already exists.
    pub(crate) fn ensure_timer(&mut self) {
        if self.timer.is_some() {
            return;
        }
        let generation = self.next_generation;
        self.next_generation += 1;
        tracing::debug!(generation, period = ?self.period, "starting poll timer");
        self.timer = Some(PollingTimer::start(generation, self.period));
    }

    pub(crate) fn cancel_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            tracing::debug!(generation = timer.generation(), "stopping poll timer");
        }
    }

    /// Tear down: cancel the timer and silence every later callback.
    pub(crate) fn stop(&mut self) {
        self.cancel_timer();
        self.stopped = true;
    }

    pub(crate) fn deadline(&self) -> Option<tokio::time::Instant> {
        self.timer.as_ref().map(PollingTimer::deadline)
    }

    pub(crate) fn phase(&self) -> PollPhase {
        if self.stopped {
            PollPhase::Stopped
        } else if self.timer.is_some() {
            PollPhase::Polling
        } else if self.has_fetched {
            PollPhase::Idle
        } else {
            PollPhase::NotStarted
        }
    }

    pub(crate) fn snapshot(&self) -> PollerSnapshot<S> {
        PollerSnapshot {
            status: self.status.clone(),
            phase: self.phase(),
            timer_generation: self.timer.as_ref().map(PollingTimer::generation),
            fetch_in_flight: self.fetch_in_flight,
        }
    }
}
