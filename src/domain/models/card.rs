//! Spaced-repetition cards as exposed by the host.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    #[serde(default)]
    pub id: Option<String>,

    /// Set once the card has been reviewed at least once.
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub last_repetition_time: Option<DateTime<Utc>>,

    /// Unset when the card is disabled.
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub next_repetition_time: Option<DateTime<Utc>>,
}

impl Card {
    /// Started, enabled and not yet due at `now`.
    pub fn is_maintained(&self, now: DateTime<Utc>) -> bool {
        self.last_repetition_time.is_some()
            && self.next_repetition_time.is_some_and(|next| next > now)
    }
}
