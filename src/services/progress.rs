//! Progress source strategies.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tracing::debug;

use crate::domain::errors::DomainResult;
use crate::domain::models::{Daystamp, MetricId};
use crate::domain::ports::{CardSet, Clock, CounterKey, CounterStore, ProgressSource};

/// One more than today's stored counter.
///
/// The new value is only written by [`ProgressSource::commit`], so a skipped
/// sync leaves the counter untouched.
pub struct IncrementalProgress {
    store: Arc<dyn CounterStore>,
}

impl IncrementalProgress {
    pub fn new(store: Arc<dyn CounterStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ProgressSource for IncrementalProgress {
    async fn compute(&self, metric: MetricId, day: Daystamp) -> DomainResult<u64> {
        let current = self.store.get(&CounterKey::new(metric, day)).await?;
        Ok(current.saturating_add(1))
    }

    async fn commit(&self, metric: MetricId, day: Daystamp, value: u64) -> DomainResult<()> {
        let key = CounterKey::new(metric, day);
        debug!(key = %key, value, "committing counter");
        self.store.set(&key, value).await
    }
}

/// Number of cards that are started, enabled and not yet due.
pub struct GaugeProgress {
    cards: Arc<dyn CardSet>,
    clock: Arc<dyn Clock>,
}

impl GaugeProgress {
    pub fn new(cards: Arc<dyn CardSet>, clock: Arc<dyn Clock>) -> Self {
        Self { cards, clock }
    }
}

#[async_trait]
impl ProgressSource for GaugeProgress {
    async fn compute(&self, _metric: MetricId, _day: Daystamp) -> DomainResult<u64> {
        let now = self.clock.now().with_timezone(&Utc);
        let cards = self.cards.all().await?;
        let maintained = cards.iter().filter(|card| card.is_maintained(now)).count();
        debug!(total = cards.len(), maintained, "computed maintained progress");
        Ok(maintained as u64)
    }
}
