//! Sync decision policy and outcomes.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::datapoint::RequestId;
use super::goal::MissingField;

/// How the current value is reconciled against the newest remote datapoint.
///
/// The two modes are mutually exclusive: a goal fed deltas and a goal fed
/// absolute values end up with different totals for the same history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecisionMode {
    /// Post `current - remote` when positive, otherwise skip.
    #[default]
    Delta,
    /// Post `current` whenever it differs from `remote`.
    Absolute,
}

impl DecisionMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Delta => "delta",
            Self::Absolute => "absolute",
        }
    }
}

/// Result of applying a [`DecisionMode`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Decision {
    Skip(SkipReason),
    Post(f64),
}

/// Decide what, if anything, to post.
///
/// `remote` is `None` when the goal has no datapoints or the read failed.
/// Delta mode treats that as zero. Absolute mode always posts when there
/// is nothing to compare against.
#[allow(clippy::cast_precision_loss)]
pub fn decide(mode: DecisionMode, current: u64, remote: Option<f64>) -> Decision {
    let current = current as f64;
    match mode {
        DecisionMode::Delta => {
            let delta = current - remote.unwrap_or(0.0);
            if delta <= 0.0 {
                Decision::Skip(SkipReason::NothingNew)
            } else {
                Decision::Post(delta)
            }
        }
        DecisionMode::Absolute => match remote {
            Some(remote) if (current - remote).abs() < f64::EPSILON => {
                Decision::Skip(SkipReason::Unchanged)
            }
            _ => Decision::Post(current),
        },
    }
}

/// Per-invocation states; terminal states live in [`SyncOutcome`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    Start,
    SettingsResolved,
    ValueComputed,
    DecisionMade,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    ConfigMissing(MissingField),
    NoProgressSource,
    /// Delta mode: current is not above remote.
    NothingNew,
    /// Absolute mode: current equals remote.
    Unchanged,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigMissing(field) => write!(f, "{field} is not set"),
            Self::NoProgressSource => f.write_str("no progress source registered"),
            Self::NothingNew => f.write_str("nothing new to report"),
            Self::Unchanged => f.write_str("value unchanged"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncFailure {
    /// The progress source or counter store could not be read or written.
    Progress(String),
    /// The request never got a response.
    Network(String),
    /// Beeminder answered with a failure.
    Api { status: u16, body: String },
    /// Beeminder answered 2xx with a body that is not a datapoint. The post
    /// may have landed, but it is unconfirmed and reported as a failure.
    InvalidResponse(String),
}

impl fmt::Display for SyncFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Progress(msg) => write!(f, "progress unavailable: {msg}"),
            Self::Network(msg) => write!(f, "network error: {msg}"),
            Self::Api { status, body } => write!(f, "API error ({status}): {body}"),
            Self::InvalidResponse(msg) => write!(f, "unreadable response: {msg}"),
        }
    }
}

/// Terminal state of one sync invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncOutcome {
    Skipped(SkipReason),
    Posted { value: f64, request_id: RequestId },
    Failed(SyncFailure),
}

impl SyncOutcome {
    /// Only a confirmed post counts as success.
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Posted { .. })
    }
}

impl fmt::Display for SyncOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Skipped(reason) => write!(f, "skipped: {reason}"),
            Self::Posted { value, request_id } => {
                write!(f, "posted {value} ({request_id})")
            }
            Self::Failed(failure) => write!(f, "failed: {failure}"),
        }
    }
}
