//! Ordered insights cards for one site.
//!
//! The order is what the stats dashboard displays top to bottom. Two cards
//! are "pinned": once shown they sit at the top and nothing can move above
//! them, and each can be dismissed for good.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::PreferencesStore;
use crate::status::SubjectId;

/// Sites with fewer all-time views than this get the grow-audience card.
const GROW_AUDIENCE_VIEW_THRESHOLD: u64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InsightKind {
    GrowAudience,
    Customize,
    LatestPostSummary,
    AllTimeStats,
    FollowersTotals,
    MostPopularTime,
    TagsAndCategories,
    AnnualSiteStats,
    Comments,
    Followers,
    TodaysStats,
    PostingActivity,
    Publicize,
    AllDotComFollowers,
    AllEmailFollowers,
    AllComments,
    AllTagsAndCategories,
    AllAnnual,
}

/// Shown in this order when a site's insights were never customized.
pub const DEFAULT_INSIGHTS: [InsightKind; 4] = [
    InsightKind::LatestPostSummary,
    InsightKind::TodaysStats,
    InsightKind::AllTimeStats,
    InsightKind::FollowersTotals,
];

impl InsightKind {
    pub const ALL: [InsightKind; 18] = [
        Self::GrowAudience,
        Self::Customize,
        Self::LatestPostSummary,
        Self::AllTimeStats,
        Self::FollowersTotals,
        Self::MostPopularTime,
        Self::TagsAndCategories,
        Self::AnnualSiteStats,
        Self::Comments,
        Self::Followers,
        Self::TodaysStats,
        Self::PostingActivity,
        Self::Publicize,
        Self::AllDotComFollowers,
        Self::AllEmailFollowers,
        Self::AllComments,
        Self::AllTagsAndCategories,
        Self::AllAnnual,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::GrowAudience => "growAudience",
            Self::Customize => "customize",
            Self::LatestPostSummary => "latestPostSummary",
            Self::AllTimeStats => "allTimeStats",
            Self::FollowersTotals => "followersTotals",
            Self::MostPopularTime => "mostPopularTime",
            Self::TagsAndCategories => "tagsAndCategories",
            Self::AnnualSiteStats => "annualSiteStats",
            Self::Comments => "comments",
            Self::Followers => "followers",
            Self::TodaysStats => "todaysStats",
            Self::PostingActivity => "postingActivity",
            Self::Publicize => "publicize",
            Self::AllDotComFollowers => "allDotComFollowers",
            Self::AllEmailFollowers => "allEmailFollowers",
            Self::AllComments => "allComments",
            Self::AllTagsAndCategories => "allTagsAndCategories",
            Self::AllAnnual => "allAnnual",
        }
    }

    pub fn is_pinned(self) -> bool {
        matches!(self, Self::GrowAudience | Self::Customize)
    }
}

impl fmt::Display for InsightKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InsightKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| format!("unknown insight `{needle}`"))
    }
}

/// Inputs deciding whether the grow-audience card may appear.
#[derive(Debug, Clone, Copy, Default)]
pub struct GrowAudienceNudge {
    /// All-time view count, when stats have loaded.
    pub all_time_views: Option<u64>,
    /// Whether a nudge is still available to show.
    pub nudge_available: bool,
}

impl GrowAudienceNudge {
    pub fn is_eligible(&self) -> bool {
        self.all_time_views.unwrap_or(0) < GROW_AUDIENCE_VIEW_THRESHOLD && self.nudge_available
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsightsLayout {
    site: SubjectId,
    insights: Vec<InsightKind>,
}

impl InsightsLayout {
    /// Load the saved order for `site` (or the defaults) and settle the
    /// pinned cards.
    ///
    /// An ineligible grow-audience card is dismissed for the site, which
    /// updates `store`; callers persist it with [`PreferencesStore::save`].
    pub fn load(store: &mut PreferencesStore, site: &SubjectId, nudge: GrowAudienceNudge) -> Self {
        let insights = store
            .site(site)
            .and_then(|prefs| prefs.insights.clone())
            .unwrap_or_else(|| DEFAULT_INSIGHTS.to_vec());
        let mut layout = Self {
            site: site.clone(),
            insights,
        };
        layout.load_pinned_cards(store, nudge);
        layout
    }

    fn load_pinned_cards(&mut self, store: &mut PreferencesStore, nudge: GrowAudienceNudge) {
        if nudge.is_eligible() {
            let hidden = store
                .site(&self.site)
                .is_some_and(|prefs| prefs.hide_grow_audience);
            self.load_dismissable(InsightKind::GrowAudience, hidden);
        } else {
            self.dismiss_grow_audience(store);
        }

        if !self.contains(InsightKind::GrowAudience) {
            self.load_dismissable(InsightKind::Customize, store.hide_customize());
        }
    }

    /// Add a dismissable card at the top or drop it, per its hidden flag.
    fn load_dismissable(&mut self, insight: InsightKind, hidden: bool) {
        let shown = self.contains(insight);
        if !hidden && !shown {
            self.insights.insert(0, insight);
        } else if hidden && shown {
            self.insights.retain(|kind| *kind != insight);
        }
    }

    /// Persist the current order for this site.
    pub fn save(&self, store: &mut PreferencesStore) {
        store.site_mut(&self.site).insights = Some(self.insights.clone());
    }

    pub fn site(&self) -> &SubjectId {
        &self.site
    }

    pub fn insights(&self) -> &[InsightKind] {
        &self.insights
    }

    pub fn is_empty(&self) -> bool {
        self.insights.is_empty()
    }

    pub fn contains(&self, insight: InsightKind) -> bool {
        self.insights.contains(&insight)
    }

    pub fn index_of(&self, insight: InsightKind) -> Option<usize> {
        self.insights.iter().position(|kind| *kind == insight)
    }

    fn is_showing_pinned_card(&self) -> bool {
        self.insights.iter().any(|kind| kind.is_pinned())
    }

    /// Pinned cards never move; other cards stay below a shown pinned card.
    pub fn can_move_up(&self, insight: InsightKind) -> bool {
        if insight.is_pinned() {
            return false;
        }
        let min_index = usize::from(self.is_showing_pinned_card());
        self.index_of(insight)
            .is_some_and(|index| index > min_index)
    }

    pub fn can_move_down(&self, insight: InsightKind) -> bool {
        if insight.is_pinned() {
            return false;
        }
        self.index_of(insight)
            .is_some_and(|index| index + 1 < self.insights.len())
    }

    /// Returns false when the move is not allowed.
    pub fn move_up(&mut self, insight: InsightKind) -> bool {
        if !self.can_move_up(insight) {
            return false;
        }
        self.swap_with_neighbor(insight, -1)
    }

    /// Returns false when the move is not allowed.
    pub fn move_down(&mut self, insight: InsightKind) -> bool {
        if !self.can_move_down(insight) {
            return false;
        }
        self.swap_with_neighbor(insight, 1)
    }

    fn swap_with_neighbor(&mut self, insight: InsightKind, offset: isize) -> bool {
        let Some(index) = self.index_of(insight) else {
            return false;
        };
        let Some(target) = index.checked_add_signed(offset) else {
            return false;
        };
        if target >= self.insights.len() {
            return false;
        }
        self.insights.swap(index, target);
        true
    }

    pub fn remove(&mut self, insight: InsightKind) -> bool {
        let before = self.insights.len();
        self.insights.retain(|kind| *kind != insight);
        self.insights.len() != before
    }

    /// Append a card not already shown. Pinned cards only enter at the top
    /// on load, so they cannot be added.
    pub fn add(&mut self, insight: InsightKind) -> bool {
        if insight.is_pinned() || self.contains(insight) {
            return false;
        }
        self.insights.push(insight);
        true
    }

    /// Hide the customize card for every site.
    pub fn dismiss_customize(&mut self, store: &mut PreferencesStore) {
        self.insights.retain(|kind| *kind != InsightKind::Customize);
        store.set_hide_customize(true);
    }

    /// Hide the grow-audience card for this site.
    pub fn dismiss_grow_audience(&mut self, store: &mut PreferencesStore) {
        self.insights
            .retain(|kind| *kind != InsightKind::GrowAudience);
        store.site_mut(&self.site).hide_grow_audience = true;
    }
}
