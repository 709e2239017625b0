//! Downloadable backup status.

use serde::{Deserialize, Serialize};

use super::{StatusObject, TerminalOutcome};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackupState {
    #[default]
    Queued,
    Running,
    Complete,
    Failed,
}

impl BackupState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Queued => "queued",
            Self::Running => "running",
            Self::Complete => "complete",
            Self::Failed => "failed",
        }
    }
}

/// Progress of one downloadable backup job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupStatus {
    pub download_id: u64,
    pub state: BackupState,
    /// Percent complete while the job runs.
    #[serde(default)]
    pub progress: Option<u8>,
    /// Download link, present once complete.
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub valid_until: Option<String>,
}

impl StatusObject for BackupStatus {
    fn is_in_progress(&self) -> bool {
        matches!(self.state, BackupState::Queued | BackupState::Running)
    }

    fn mark_in_progress(&mut self) {
        self.state = BackupState::Running;
    }

    fn terminal_outcome(&self) -> Option<TerminalOutcome> {
        match self.state {
            BackupState::Complete => Some(TerminalOutcome::Complete),
            BackupState::Failed => Some(TerminalOutcome::Failed),
            BackupState::Queued | BackupState::Running => None,
        }
    }

    fn label(&self) -> &'static str {
        self.state.as_str()
    }
}
