//! Shared test fixtures for poller, preferences, and config test modules.
//!
//! Keeping the scripted service and recording view here avoids each test
//! module rebuilding its own mocks.

use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use tokio::sync::Semaphore;

use crate::error::{PollError, ServiceError};
use crate::service::StatusService;
use crate::status::{StatusObject, SubjectId};
use crate::view::StatusView;

static TEST_DIR_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Temporary directory fixture with best-effort cleanup.
#[derive(Debug)]
pub struct TestTempDir {
    path: PathBuf,
}

impl TestTempDir {
    /// Create a unique temporary directory with a readable prefix.
    pub fn new(prefix: &str) -> Self {
        let suffix = TEST_DIR_COUNTER.fetch_add(1, Ordering::Relaxed);
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        let dir = std::env::temp_dir().join(format!("sitewatch-{prefix}-{millis}-{suffix}"));
        fs::create_dir_all(&dir).expect("failed to create temporary fixture directory");
        Self { path: dir }
    }

    /// Root directory path for this fixture.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Build a child path under the fixture root.
    pub fn child(&self, relative: &str) -> PathBuf {
        self.path.join(relative)
    }

    /// Write UTF-8 text to a child path, creating parent directories as needed.
    pub fn write_text(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.child(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("failed to create parent directories for fixture");
        }
        fs::write(&path, content).expect("failed to write fixture file");
        path
    }
}

impl Drop for TestTempDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

/// Let spawned tasks on the current-thread test runtime run to quiescence.
pub async fn settle() {
    for _ in 0..32 {
        tokio::task::yield_now().await;
    }
}

/// One observed view callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    Loading,
    Render(&'static str),
    Error(String),
    Complete,
    Failed,
}

/// View that records callbacks into a shared log.
pub struct RecordingView<S> {
    events: Arc<Mutex<Vec<ViewEvent>>>,
    _status: std::marker::PhantomData<fn(S)>,
}

impl<S> Clone for RecordingView<S> {
    fn clone(&self) -> Self {
        Self {
            events: Arc::clone(&self.events),
            _status: std::marker::PhantomData,
        }
    }
}

impl<S> RecordingView<S> {
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
            _status: std::marker::PhantomData,
        }
    }

    pub fn events(&self) -> Vec<ViewEvent> {
        self.events.lock().expect("view log poisoned").clone()
    }

    fn push(&self, event: ViewEvent) {
        self.events.lock().expect("view log poisoned").push(event);
    }
}

impl<S: StatusObject> StatusView<S> for RecordingView<S> {
    fn render(&mut self, status: &S) {
        self.push(ViewEvent::Render(status.label()));
    }

    fn show_loading(&mut self) {
        self.push(ViewEvent::Loading);
    }

    fn show_error(&mut self, error: &PollError) {
        self.push(ViewEvent::Error(error.to_string()));
    }

    fn show_complete(&mut self, _status: &S) {
        self.push(ViewEvent::Complete);
    }

    fn show_failed(&mut self, _status: &S) {
        self.push(ViewEvent::Failed);
    }
}

/// Service replaying queued responses, with optional gates that hold calls
/// pending until the test releases them.
pub struct ScriptedService<S> {
    fetches: Mutex<VecDeque<Result<S, ServiceError>>>,
    fetch_calls: AtomicUsize,
    fetch_gate: Semaphore,
    fetch_gated: AtomicBool,
    trigger: Mutex<Option<Result<bool, ServiceError>>>,
    trigger_gate: Semaphore,
    trigger_gated: AtomicBool,
    trigger_resolved: AtomicBool,
}

impl<S> ScriptedService<S> {
    pub fn new() -> Self {
        Self {
            fetches: Mutex::new(VecDeque::new()),
            fetch_calls: AtomicUsize::new(0),
            fetch_gate: Semaphore::new(0),
            fetch_gated: AtomicBool::new(false),
            trigger: Mutex::new(None),
            trigger_gate: Semaphore::new(0),
            trigger_gated: AtomicBool::new(false),
            trigger_resolved: AtomicBool::new(false),
        }
    }

    pub fn push_fetch(&self, result: Result<S, ServiceError>) {
        self.fetches
            .lock()
            .expect("fetch script poisoned")
            .push_back(result);
    }

    pub fn set_trigger(&self, result: Result<bool, ServiceError>) {
        *self.trigger.lock().expect("trigger script poisoned") = Some(result);
    }

    /// Hold every later fetch until `release_fetches`.
    pub fn gate_fetches(&self) {
        self.fetch_gated.store(true, Ordering::SeqCst);
    }

    pub fn release_fetches(&self, count: usize) {
        self.fetch_gate.add_permits(count);
    }

    pub fn gate_triggers(&self) {
        self.trigger_gated.store(true, Ordering::SeqCst);
    }

    pub fn release_triggers(&self) {
        self.trigger_gate.add_permits(1);
    }

    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    pub fn trigger_resolved(&self) -> bool {
        self.trigger_resolved.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl<S: StatusObject> StatusService<S> for ScriptedService<S> {
    async fn fetch(&self, _subject: &SubjectId) -> Result<S, ServiceError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        if self.fetch_gated.load(Ordering::SeqCst) {
            if let Ok(permit) = self.fetch_gate.acquire().await {
                permit.forget();
            }
        }
        self.fetches
            .lock()
            .expect("fetch script poisoned")
            .pop_front()
            .unwrap_or_else(|| Err(ServiceError::InvalidResponse("fetch script exhausted".into())))
    }

    async fn trigger(&self, _subject: &SubjectId) -> Result<bool, ServiceError> {
        if self.trigger_gated.load(Ordering::SeqCst) {
            if let Ok(permit) = self.trigger_gate.acquire().await {
                permit.forget();
            }
        }
        let result = self
            .trigger
            .lock()
            .expect("trigger script poisoned")
            .take()
            .unwrap_or(Err(ServiceError::Unsupported));
        self.trigger_resolved.store(true, Ordering::SeqCst);
        result
    }
}
