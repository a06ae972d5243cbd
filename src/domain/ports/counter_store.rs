//! Counter store port.

use async_trait::async_trait;
use std::fmt;

use crate::domain::errors::DomainResult;
use crate::domain::models::{Daystamp, MetricId};

/// Key of one (metric, day) counter, e.g. `bm-review-count-2026-3-7`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CounterKey(String);

impl CounterKey {
    pub fn new(metric: MetricId, day: Daystamp) -> Self {
        Self(format!("{}{}", metric.counter_prefix(), day.storage_form()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CounterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Durable, synced key to non-negative integer mapping.
///
/// Last write wins per key. Old-day keys are abandoned, never deleted.
#[async_trait]
pub trait CounterStore: Send + Sync {
    /// Current value, 0 when the key has never been written.
    async fn get(&self, key: &CounterKey) -> DomainResult<u64>;

    async fn set(&self, key: &CounterKey, value: u64) -> DomainResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    proptest! {
        /// Distinct days never share a counter key.
        #[test]
        fn prop_days_have_distinct_keys(a in 0i64..20_000, b in 0i64..20_000) {
            prop_assume!(a != b);
            let epoch = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
            let d1 = Daystamp::new(epoch + chrono::Duration::days(a));
            let d2 = Daystamp::new(epoch + chrono::Duration::days(b));
            for metric in MetricId::ALL {
                prop_assert_ne!(CounterKey::new(metric, d1), CounterKey::new(metric, d2));
            }
        }
    }

    #[test]
    fn test_key_format() {
        let day = Daystamp::new(NaiveDate::from_ymd_opt(2026, 3, 7).unwrap());
        assert_eq!(
            CounterKey::new(MetricId::ReviewCount, day).as_str(),
            "bm-review-count-2026-3-7"
        );
        assert_eq!(
            CounterKey::new(MetricId::EditCount, day).as_str(),
            "bm-edit-count-2026-3-7"
        );
    }
}
