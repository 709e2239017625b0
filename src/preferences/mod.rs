//! Per-subject preferences persisted as one JSON file.
//!
//! Flags that used to live as loose global keys are grouped here by subject
//! id and injected into whatever needs them. Global flags (shared by every
//! site) sit next to the per-site map.

mod insights;

pub use insights::{GrowAudienceNudge, InsightKind, InsightsLayout, DEFAULT_INSIGHTS};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::PreferencesError;
use crate::status::SubjectId;

/// On-disk schema version for [`Preferences`].
const PREFERENCES_FILE_VERSION: u32 = 1;

/// Settings scoped to one site.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SitePreferences {
    /// Saved card order; `None` means the site was never customized.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insights: Option<Vec<InsightKind>>,
    #[serde(default)]
    pub hide_grow_audience: bool,
}

/// Whole preferences document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    version: u32,
    /// Not per site: once dismissed the customize card is gone everywhere.
    #[serde(default)]
    pub hide_customize: bool,
    #[serde(default)]
    pub sites: BTreeMap<SubjectId, SitePreferences>,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            version: PREFERENCES_FILE_VERSION,
            hide_customize: false,
            sites: BTreeMap::new(),
        }
    }
}

/// Preferences document plus the file it is saved to.
#[derive(Debug, Clone, Default)]
pub struct PreferencesStore {
    path: Option<PathBuf>,
    data: Preferences,
}

impl PreferencesStore {
    /// Store that is never written to disk.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Load preferences from `path`. A missing file yields empty preferences.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, PreferencesError> {
        let path = path.as_ref().to_path_buf();
        let data = match fs::read_to_string(&path) {
            Ok(raw) => parse_preferences(&raw)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Preferences::default(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self {
            path: Some(path),
            data,
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn preferences(&self) -> &Preferences {
        &self.data
    }

    pub fn site(&self, site: &SubjectId) -> Option<&SitePreferences> {
        self.data.sites.get(site)
    }

    /// Settings for `site`, created empty on first use.
    pub fn site_mut(&mut self, site: &SubjectId) -> &mut SitePreferences {
        self.data.sites.entry(site.clone()).or_default()
    }

    pub fn hide_customize(&self) -> bool {
        self.data.hide_customize
    }

    pub fn set_hide_customize(&mut self, hidden: bool) {
        self.data.hide_customize = hidden;
    }

    /// Write the document. No-op for in-memory stores.
    pub fn save(&self) -> Result<(), PreferencesError> {
        let Some(path) = self.path.as_deref() else {
            return Ok(());
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_vec_pretty(&self.data)?;
        // Write a sibling temp file first so a partial write never replaces
        // the last good document.
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, path)?;
        tracing::debug!(path = %path.display(), "saved preferences");
        Ok(())
    }
}

fn parse_preferences(raw: &str) -> Result<Preferences, PreferencesError> {
    if raw.trim().is_empty() {
        return Ok(Preferences::default());
    }
    let data: Preferences = serde_json::from_str(raw)?;
    if data.version != PREFERENCES_FILE_VERSION {
        return Err(PreferencesError::Invalid(format!(
            "unsupported preferences file version {}",
            data.version
        )));
    }
    Ok(data)
}
