//! Plain-text summaries of status objects and insights layouts.

use crate::preferences::InsightsLayout;
use crate::status::{BackupState, BackupStatus, ScanState, ScanStatus, StatusObject};

/// Renderer-independent description of one status payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusSummary {
    pub title: String,
    /// Percent to draw as a progress bar, when the job reports one.
    pub progress: Option<u8>,
    pub fields: Vec<(&'static str, String)>,
    pub details: Vec<String>,
}

/// Status kinds the terminal front-end knows how to describe.
pub trait Summarize: StatusObject {
    /// Noun used in lifecycle lines ("scan", "backup").
    fn noun() -> &'static str;

    fn summarize(&self) -> StatusSummary;

    /// Line printed once when the job reaches a terminal outcome.
    fn outcome_text(&self) -> String {
        format!("{} {}", Self::noun(), self.label())
    }
}

impl Summarize for ScanStatus {
    fn noun() -> &'static str {
        "scan"
    }

    fn summarize(&self) -> StatusSummary {
        let mut fields = vec![("state", self.state.as_str().to_string())];
        let progress = match self.state {
            ScanState::Provisioning | ScanState::Scanning => Some(self.progress.unwrap_or(0)),
            ScanState::Idle | ScanState::Unavailable => None,
        };

        let mut details = Vec::new();
        if let Some(threats) = self.threats() {
            let fixable = self.fixable_threats().len();
            fields.push(("threats", threats.len().to_string()));
            fields.push(("fixable", fixable.to_string()));
            for threat in threats {
                let mut line = format!("#{} {}", threat.id, threat.signature);
                if let Some(fix) = &threat.fixable {
                    line.push_str(&format!(" (fix: {})", fix.kind));
                }
                details.push(line);
            }
        }
        if let Some(run) = &self.most_recent {
            if let Some(timestamp) = run.timestamp.as_deref() {
                fields.push(("last scan", timestamp.to_string()));
            }
        }

        StatusSummary {
            title: format!("scan {}", self.state.as_str()),
            progress,
            fields,
            details,
        }
    }
}

impl Summarize for BackupStatus {
    fn noun() -> &'static str {
        "backup"
    }

    fn summarize(&self) -> StatusSummary {
        let mut fields = vec![
            ("download", self.download_id.to_string()),
            ("state", self.state.as_str().to_string()),
        ];
        if let Some(url) = self.url.as_deref() {
            fields.push(("url", url.to_string()));
        }
        if let Some(valid_until) = self.valid_until.as_deref() {
            fields.push(("valid until", valid_until.to_string()));
        }
        let progress = match self.state {
            BackupState::Queued | BackupState::Running => Some(self.progress.unwrap_or(0)),
            BackupState::Complete | BackupState::Failed => None,
        };
        StatusSummary {
            title: format!("backup {}", self.state.as_str()),
            progress,
            fields,
            details: Vec::new(),
        }
    }

    fn outcome_text(&self) -> String {
        match (self.state, self.url.as_deref()) {
            (BackupState::Complete, Some(url)) => format!("backup ready: {url}"),
            (BackupState::Complete, None) => "backup ready".to_string(),
            _ => format!("backup {}", self.state.as_str()),
        }
    }
}

/// Numbered card list for `insights`; pinned cards are tagged.
pub fn insights_lines(layout: &InsightsLayout) -> Vec<String> {
    if layout.is_empty() {
        return vec!["(no insights)".to_string()];
    }
    layout
        .insights()
        .iter()
        .enumerate()
        .map(|(idx, insight)| {
            let mut line = format!("{}. {}", idx + 1, insight);
            if insight.is_pinned() {
                line.push_str(" [pinned]");
            }
            line
        })
        .collect()
}
