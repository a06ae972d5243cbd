//! Tracked metrics and the keys they map to.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::settings::keys;

/// One of the quantities pushed to Beeminder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MetricId {
    /// Cards completed in the review queue.
    ReviewCount,
    /// Debounced edit bursts under a tagged node.
    EditCount,
    /// Started cards that are not currently due.
    MaintainedProgress,
}

/// How a metric's current value is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressKind {
    /// Per-event increment against the counter store.
    Incremental,
    /// Point-in-time count recomputed from the card set.
    Gauge,
}

impl MetricId {
    /// Every metric, in display order.
    pub const ALL: [Self; 3] = [Self::ReviewCount, Self::EditCount, Self::MaintainedProgress];

    /// Identifier used in request ids and trace lines.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ReviewCount => "reviewCount",
            Self::EditCount => "editCount",
            Self::MaintainedProgress => "maintainedProgress",
        }
    }

    /// Prefix of the per-day counter key.
    pub const fn counter_prefix(self) -> &'static str {
        match self {
            Self::ReviewCount => "bm-review-count-",
            Self::EditCount => "bm-edit-count-",
            Self::MaintainedProgress => "bm-maintained-progress-",
        }
    }

    /// Settings key holding the goal slug for this metric.
    pub const fn goal_setting_key(self) -> &'static str {
        match self {
            Self::ReviewCount => keys::GOAL_REVIEWS,
            Self::EditCount => keys::GOAL_EDITS,
            Self::MaintainedProgress => keys::GOAL_MAINTAINED,
        }
    }

    pub const fn progress_kind(self) -> ProgressKind {
        match self {
            Self::ReviewCount | Self::EditCount => ProgressKind::Incremental,
            Self::MaintainedProgress => ProgressKind::Gauge,
        }
    }

    /// Human label used by the status table.
    pub const fn label(self) -> &'static str {
        match self {
            Self::ReviewCount => "Reviews",
            Self::EditCount => "Edits",
            Self::MaintainedProgress => "Maintained",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "reviewCount" | "review-count" | "reviews" => Some(Self::ReviewCount),
            "editCount" | "edit-count" | "edits" => Some(Self::EditCount),
            "maintainedProgress" | "maintained-progress" | "maintained" => {
                Some(Self::MaintainedProgress)
            }
            _ => None,
        }
    }
}

impl fmt::Display for MetricId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
