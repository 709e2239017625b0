//! End-to-end poller lifecycle against a local status kind and in-test mocks.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use sitewatch::error::{PollError, ServiceError};
use sitewatch::service::StatusService;
use sitewatch::{
    spawn_poller, PollPhase, PollerOptions, StatusObject, StatusView, SubjectId, TerminalOutcome,
};

const INTERVAL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum JobState {
    Idle,
    Provisioning,
    Complete,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct JobStatus {
    state: JobState,
}

impl JobStatus {
    fn new(state: JobState) -> Self {
        Self { state }
    }
}

impl StatusObject for JobStatus {
    fn is_in_progress(&self) -> bool {
        self.state == JobState::Provisioning
    }

    fn mark_in_progress(&mut self) {
        self.state = JobState::Provisioning;
    }

    fn terminal_outcome(&self) -> Option<TerminalOutcome> {
        (self.state == JobState::Complete).then_some(TerminalOutcome::Complete)
    }

    fn label(&self) -> &'static str {
        match self.state {
            JobState::Idle => "idle",
            JobState::Provisioning => "provisioning",
            JobState::Complete => "complete",
        }
    }
}

#[derive(Default)]
struct QueueService {
    fetches: Mutex<VecDeque<Result<JobStatus, ServiceError>>>,
    fetch_calls: AtomicUsize,
    trigger_calls: AtomicUsize,
}

impl QueueService {
    fn with(fetches: Vec<Result<JobStatus, ServiceError>>) -> Arc<Self> {
        Arc::new(Self {
            fetches: Mutex::new(fetches.into()),
            ..Self::default()
        })
    }

    fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StatusService<JobStatus> for QueueService {
    async fn fetch(&self, _subject: &SubjectId) -> Result<JobStatus, ServiceError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        self.fetches
            .lock()
            .expect("queue poisoned")
            .pop_front()
            .unwrap_or_else(|| Err(ServiceError::InvalidResponse("queue empty".into())))
    }

    async fn trigger(&self, _subject: &SubjectId) -> Result<bool, ServiceError> {
        self.trigger_calls.fetch_add(1, Ordering::SeqCst);
        Ok(true)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Seen {
    Loading,
    Render(JobState),
    Error(String),
    Complete,
}

#[derive(Clone, Default)]
struct LogView {
    seen: Arc<Mutex<Vec<Seen>>>,
}

impl LogView {
    fn seen(&self) -> Vec<Seen> {
        self.seen.lock().expect("log poisoned").clone()
    }

    fn push(&self, event: Seen) {
        self.seen.lock().expect("log poisoned").push(event);
    }
}

impl StatusView<JobStatus> for LogView {
    fn render(&mut self, status: &JobStatus) {
        self.push(Seen::Render(status.state));
    }

    fn show_loading(&mut self) {
        self.push(Seen::Loading);
    }

    fn show_error(&mut self, error: &PollError) {
        self.push(Seen::Error(error.to_string()));
    }

    fn show_complete(&mut self, _status: &JobStatus) {
        self.push(Seen::Complete);
    }
}

async fn settle() {
    for _ in 0..32 {
        tokio::task::yield_now().await;
    }
}

fn options() -> PollerOptions {
    PollerOptions { interval: INTERVAL }
}

#[tokio::test(start_paused = true)]
async fn provisioning_job_polls_until_complete_then_stops() {
    let service = QueueService::with(vec![
        Ok(JobStatus::new(JobState::Provisioning)),
        Ok(JobStatus::new(JobState::Complete)),
    ]);
    let view = LogView::default();
    let poller = spawn_poller(
        options(),
        SubjectId::new("site-1"),
        Arc::clone(&service),
        view.clone(),
    );

    poller.view_ready().await.expect("view ready");
    settle().await;
    let snapshot = poller.snapshot().await.expect("snapshot");
    assert!(snapshot.is_polling(), "provisioning must start the timer");
    assert_eq!(snapshot.phase, PollPhase::Polling);

    tokio::time::sleep(INTERVAL).await;
    settle().await;
    let snapshot = poller.snapshot().await.expect("snapshot");
    assert!(!snapshot.is_polling(), "complete must cancel the timer");
    assert_eq!(snapshot.phase, PollPhase::Idle);
    assert_eq!(
        snapshot.status.map(|status| status.state),
        Some(JobState::Complete)
    );

    tokio::time::sleep(INTERVAL * 4).await;
    settle().await;
    assert_eq!(service.fetch_calls(), 2);

    poller.view_leaving().await.expect("leave");
    assert_eq!(
        view.seen(),
        vec![
            Seen::Loading,
            Seen::Render(JobState::Provisioning),
            Seen::Render(JobState::Complete),
            Seen::Complete,
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn manual_refresh_of_same_outcome_does_not_reroute() {
    let service = QueueService::with(vec![
        Ok(JobStatus::new(JobState::Complete)),
        Ok(JobStatus::new(JobState::Complete)),
    ]);
    let view = LogView::default();
    let poller = spawn_poller(
        options(),
        SubjectId::new("site-1"),
        Arc::clone(&service),
        view.clone(),
    );

    poller.view_ready().await.expect("view ready");
    settle().await;
    poller.refresh().await.expect("refresh");
    settle().await;
    poller.view_leaving().await.expect("leave");

    let completes = view
        .seen()
        .iter()
        .filter(|event| **event == Seen::Complete)
        .count();
    assert_eq!(completes, 1);
    assert_eq!(service.fetch_calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn failed_refresh_keeps_previous_status_and_timer() {
    let service = QueueService::with(vec![
        Ok(JobStatus::new(JobState::Provisioning)),
        Err(ServiceError::Status {
            code: 503,
            body: "busy".to_string(),
        }),
        Ok(JobStatus::new(JobState::Complete)),
    ]);
    let view = LogView::default();
    let poller = spawn_poller(
        options(),
        SubjectId::new("site-1"),
        Arc::clone(&service),
        view.clone(),
    );

    poller.view_ready().await.expect("view ready");
    settle().await;
    let before = poller.snapshot().await.expect("snapshot");

    tokio::time::sleep(INTERVAL).await;
    settle().await;
    let after = poller.snapshot().await.expect("snapshot");
    assert_eq!(after.status, before.status);
    assert_eq!(after.timer_generation, before.timer_generation);
    assert!(matches!(view.seen().last(), Some(Seen::Error(_))));

    tokio::time::sleep(INTERVAL).await;
    settle().await;
    assert_eq!(service.fetch_calls(), 3);
    assert!(!poller.snapshot().await.expect("snapshot").is_polling());
    poller.view_leaving().await.expect("leave");
}

#[tokio::test(start_paused = true)]
async fn trigger_from_idle_renders_optimistic_state_and_polls() {
    let service = QueueService::with(vec![
        Ok(JobStatus::new(JobState::Idle)),
        Ok(JobStatus::new(JobState::Provisioning)),
    ]);
    let view = LogView::default();
    let poller = spawn_poller(
        options(),
        SubjectId::new("site-1"),
        Arc::clone(&service),
        view.clone(),
    );

    poller.view_ready().await.expect("view ready");
    settle().await;
    assert!(!poller.snapshot().await.expect("snapshot").is_polling());

    poller.trigger_action().await.expect("trigger");
    assert_eq!(view.seen().last(), Some(&Seen::Render(JobState::Provisioning)));
    assert!(poller.snapshot().await.expect("snapshot").is_polling());

    settle().await;
    assert_eq!(service.trigger_calls.load(Ordering::SeqCst), 1);

    tokio::time::sleep(INTERVAL).await;
    settle().await;
    assert_eq!(service.fetch_calls(), 2);
    assert!(poller.snapshot().await.expect("snapshot").is_polling());
    poller.view_leaving().await.expect("leave");
}
