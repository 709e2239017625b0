//! `sitewatch insights`: load, edit, persist, and print one site's layout.

use sitewatch::config::Config;
use sitewatch::error::PreferencesError;
use sitewatch::preferences::{GrowAudienceNudge, InsightKind, InsightsLayout, PreferencesStore};
use sitewatch::status::SubjectId;
use sitewatch::ui::{insights_lines, Renderer};

/// One layout edit requested on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InsightsEdit {
    MoveUp(InsightKind),
    MoveDown(InsightKind),
    Remove(InsightKind),
    Add(InsightKind),
    DismissCustomize,
    DismissGrowAudience,
}

impl InsightsEdit {
    /// Apply the edit. Returns a warning when the edit was not allowed.
    pub(crate) fn apply(
        self,
        layout: &mut InsightsLayout,
        store: &mut PreferencesStore,
    ) -> Option<String> {
        let applied = match self {
            Self::MoveUp(card) => layout.move_up(card),
            Self::MoveDown(card) => layout.move_down(card),
            Self::Remove(card) => layout.remove(card),
            Self::Add(card) => layout.add(card),
            Self::DismissCustomize => {
                layout.dismiss_customize(store);
                true
            }
            Self::DismissGrowAudience => {
                layout.dismiss_grow_audience(store);
                true
            }
        };
        (!applied).then(|| self.refusal())
    }

    fn refusal(self) -> String {
        match self {
            Self::MoveUp(card) => format!("`{card}` cannot move up"),
            Self::MoveDown(card) => format!("`{card}` cannot move down"),
            Self::Remove(card) => format!("`{card}` is not shown"),
            Self::Add(card) if card.is_pinned() => format!("`{card}` cannot be added"),
            Self::Add(card) => format!("`{card}` is already shown"),
            Self::DismissCustomize | Self::DismissGrowAudience => "nothing to dismiss".to_string(),
        }
    }
}

/// Load the layout, apply `edit`, save, and return the printable lines plus
/// any refusal warning.
pub(crate) fn edit_layout(
    store: &mut PreferencesStore,
    site: &SubjectId,
    nudge: GrowAudienceNudge,
    edit: Option<InsightsEdit>,
) -> Result<(Vec<String>, Option<String>), PreferencesError> {
    let mut layout = InsightsLayout::load(store, site, nudge);
    let warning = edit.and_then(|edit| edit.apply(&mut layout, store));
    layout.save(store);
    store.save()?;
    Ok((insights_lines(&layout), warning))
}

pub(crate) fn run(
    config: &Config,
    renderer: Renderer,
    site: SubjectId,
    nudge: GrowAudienceNudge,
    edit: Option<InsightsEdit>,
) -> i32 {
    let path = config.preferences.resolved_path();
    let mut store = match PreferencesStore::open(&path) {
        Ok(store) => store,
        Err(e) => {
            renderer.error(&format!("failed to open {}: {e}", path.display()));
            return 1;
        }
    };

    let (lines, warning) = match edit_layout(&mut store, &site, nudge, edit) {
        Ok(result) => result,
        Err(e) => {
            renderer.error(&format!("failed to save {}: {e}", path.display()));
            return 1;
        }
    };
    if let Some(warning) = warning {
        renderer.warn(&warning);
    }
    renderer.section(&format!("insights ({site})"));
    for line in lines {
        renderer.detail(&line);
    }
    0
}
