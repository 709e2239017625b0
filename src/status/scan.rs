//! Security scan status.

use serde::{Deserialize, Serialize};

use super::StatusObject;

/// Scan lifecycle reported by the remote service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanState {
    #[default]
    Idle,
    Provisioning,
    Scanning,
    Unavailable,
}

impl ScanState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Provisioning => "provisioning",
            Self::Scanning => "scanning",
            Self::Unavailable => "unavailable",
        }
    }
}

/// Suggested remediation for a threat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreatFix {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub target: Option<String>,
}

/// One finding from the last completed scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanThreat {
    pub id: u64,
    pub signature: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub fixable: Option<ThreatFix>,
}

/// Summary of the most recent finished scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanRun {
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub progress: Option<u8>,
    #[serde(default)]
    pub is_initial: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanStatus {
    pub state: ScanState,
    #[serde(default)]
    pub progress: Option<u8>,
    #[serde(default)]
    pub threats: Option<Vec<ScanThreat>>,
    #[serde(default)]
    pub most_recent: Option<ScanRun>,
}

impl ScanStatus {
    /// Threats are only meaningful once the scan has settled back to idle.
    pub fn threats(&self) -> Option<&[ScanThreat]> {
        match self.state {
            ScanState::Idle => self.threats.as_deref(),
            _ => None,
        }
    }

    pub fn fixable_threats(&self) -> Vec<&ScanThreat> {
        self.threats
            .iter()
            .flatten()
            .filter(|threat| threat.fixable.is_some())
            .collect()
    }

    pub fn has_fixable_threats(&self) -> bool {
        !self.fixable_threats().is_empty()
    }
}

impl StatusObject for ScanStatus {
    fn is_in_progress(&self) -> bool {
        matches!(self.state, ScanState::Provisioning | ScanState::Scanning)
    }

    fn mark_in_progress(&mut self) {
        self.state = ScanState::Scanning;
    }

    fn label(&self) -> &'static str {
        self.state.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn threat(id: u64, fixable: bool) -> ScanThreat {
        ScanThreat {
            id,
            signature: format!("sig-{id}"),
            description: None,
            fixable: fixable.then(|| ThreatFix {
                kind: "replace".into(),
                target: None,
            }),
        }
    }

    #[test]
    fn in_progress_subset_is_provisioning_and_scanning() {
        let mut status = ScanStatus::default();
        for (state, expected) in [
            (ScanState::Idle, false),
            (ScanState::Provisioning, true),
            (ScanState::Scanning, true),
            (ScanState::Unavailable, false),
        ] {
            status.state = state;
            assert_eq!(status.is_in_progress(), expected, "state {state:?}");
        }
        assert!(status.terminal_outcome().is_none());
    }

    #[test]
    fn threats_hidden_unless_idle() {
        let mut status = ScanStatus {
            state: ScanState::Idle,
            threats: Some(vec![threat(1, true), threat(2, false)]),
            ..ScanStatus::default()
        };
        assert_eq!(status.threats().map(<[_]>::len), Some(2));

        status.mark_in_progress();
        assert_eq!(status.state, ScanState::Scanning);
        assert!(status.threats().is_none());
    }

    #[test]
    fn fixable_threats_filters_by_fix() {
        let status = ScanStatus {
            threats: Some(vec![threat(1, true), threat(2, false), threat(3, true)]),
            ..ScanStatus::default()
        };
        let ids: Vec<u64> = status.fixable_threats().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert!(status.has_fixable_threats());
        assert!(!ScanStatus::default().has_fixable_threats());
    }

    #[test]
    fn decodes_service_payload() {
        let payload = r#"{
            "state": "scanning",
            "progress": 42,
            "most_recent": {"timestamp": "2026-10-01T00:00:00Z", "is_initial": true}
        }"#;
        let status: ScanStatus = serde_json::from_str(payload).expect("decode");
        assert_eq!(status.state, ScanState::Scanning);
        assert_eq!(status.progress, Some(42));
        assert!(status.most_recent.is_some_and(|run| run.is_initial));
    }
}
