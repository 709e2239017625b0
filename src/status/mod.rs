//! Status objects produced by a status service and owned by the poller.
//!
//! Each subject kind carries a small closed set of state tags. The poller only
//! needs to know whether a state belongs to the in-progress subset, how to
//! apply the optimistic transition, and whether a state should be routed to a
//! terminal view callback.

pub mod backup;
pub mod scan;

pub use backup::{BackupState, BackupStatus};
pub use scan::{ScanRun, ScanState, ScanStatus, ScanThreat, ThreatFix};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of the entity being polled (a site, a backup job, a scan job).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubjectId(String);

impl SubjectId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SubjectId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for SubjectId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Terminal states that get dedicated view routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalOutcome {
    Complete,
    Failed,
}

/// Contract between a status payload and the poller.
pub trait StatusObject: Clone + fmt::Debug + Send + Sync + 'static {
    /// True when the state tag is in the in-progress subset.
    fn is_in_progress(&self) -> bool;

    /// Apply the optimistic transition used right after a trigger call.
    fn mark_in_progress(&mut self);

    /// Terminal outcome for kinds that route completion to the view.
    fn terminal_outcome(&self) -> Option<TerminalOutcome> {
        None
    }

    /// Short state tag for logs and terminal output.
    fn label(&self) -> &'static str;
}
