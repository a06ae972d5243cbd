//! Progress source port.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::{Daystamp, MetricId};

/// Produces the value a sync reports for a metric.
///
/// `compute` must not mutate anything; sources with local state persist it
/// in `commit`, which the orchestrator calls once the goal is known to be
/// configured and before anything is posted.
#[async_trait]
pub trait ProgressSource: Send + Sync {
    async fn compute(&self, metric: MetricId, day: Daystamp) -> DomainResult<u64>;

    async fn commit(&self, _metric: MetricId, _day: Daystamp, _value: u64) -> DomainResult<()> {
        Ok(())
    }
}
