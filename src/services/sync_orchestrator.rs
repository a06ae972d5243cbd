//! Sync orchestrator.
//!
//! Reconciles a metric's current progress against the newest datapoint on
//! its Beeminder goal and posts when the decision policy says so. One
//! invocation walks `Start -> SettingsResolved -> ValueComputed ->
//! DecisionMade` and ends `Skipped`, `Posted` or `Failed`.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use super::daystamp_clock::DaystampClock;
use super::goal_settings::resolve_goal;
use super::trace_logger::TraceLogger;
use crate::domain::models::{
    decide, Decision, DecisionMode, GoalConfig, MetricId, NewDatapoint, RequestId, SkipReason,
    SyncFailure, SyncOutcome, SyncState,
};
use crate::domain::ports::{BeeminderClient, ProgressSource, SettingsStore};

/// Default name in the datapoint comment.
pub const DEFAULT_COMMENT_SOURCE: &str = "RemNote";

/// Runs sync invocations, one at a time per metric.
pub struct SyncOrchestrator {
    settings: Arc<dyn SettingsStore>,
    client: Arc<dyn BeeminderClient>,
    sources: HashMap<MetricId, Arc<dyn ProgressSource>>,
    days: DaystampClock,
    trace: TraceLogger,
    mode: DecisionMode,
    comment_source: String,
    locks: HashMap<MetricId, Mutex<()>>,
}

impl SyncOrchestrator {
    pub fn new(
        settings: Arc<dyn SettingsStore>,
        client: Arc<dyn BeeminderClient>,
        days: DaystampClock,
        trace: TraceLogger,
    ) -> Self {
        Self {
            settings,
            client,
            sources: HashMap::new(),
            days,
            trace,
            mode: DecisionMode::default(),
            comment_source: DEFAULT_COMMENT_SOURCE.to_string(),
            locks: MetricId::ALL.into_iter().map(|m| (m, Mutex::new(()))).collect(),
        }
    }

    #[must_use]
    pub fn with_mode(mut self, mode: DecisionMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn with_comment_source(mut self, source: impl Into<String>) -> Self {
        self.comment_source = source.into();
        self
    }

    /// Register the progress source for `metric`, replacing any previous one.
    #[must_use]
    pub fn with_source(mut self, metric: MetricId, source: Arc<dyn ProgressSource>) -> Self {
        self.sources.insert(metric, source);
        self
    }

    pub const fn mode(&self) -> DecisionMode {
        self.mode
    }

    /// Sync `metric`. True only when a datapoint was posted.
    pub async fn sync(&self, metric: MetricId) -> bool {
        self.sync_detailed(metric).await.is_success()
    }

    /// Sync `metric` and report how the invocation ended.
    ///
    /// Invocations for the same metric are serialized; different metrics
    /// run independently.
    #[instrument(skip(self), fields(metric = %metric, mode = self.mode.as_str()))]
    pub async fn sync_detailed(&self, metric: MetricId) -> SyncOutcome {
        let _guard = match self.locks.get(&metric) {
            Some(lock) => Some(lock.lock().await),
            None => None,
        };

        let (goal, outcome) = self.run(metric).await;

        match &outcome {
            SyncOutcome::Posted { .. } => info!(%outcome, "sync finished"),
            SyncOutcome::Skipped(_) => debug!(%outcome, "sync finished"),
            SyncOutcome::Failed(_) => warn!(%outcome, "sync finished"),
        }

        let line = match goal {
            Some(goal) => format!("{metric} -> {}: {outcome}", goal.display_name()),
            None => format!("{metric}: {outcome}"),
        };
        self.trace.log(&line).await;

        outcome
    }

    async fn run(&self, metric: MetricId) -> (Option<GoalConfig>, SyncOutcome) {
        debug!(state = ?SyncState::Start);

        // Configuration is checked before any counter is touched.
        let goal = match resolve_goal(self.settings.as_ref(), metric).await {
            Ok(goal) => goal,
            Err(missing) => {
                return (None, SyncOutcome::Skipped(SkipReason::ConfigMissing(missing)));
            }
        };
        let Some(source) = self.sources.get(&metric) else {
            return (Some(goal), SyncOutcome::Skipped(SkipReason::NoProgressSource));
        };
        debug!(state = ?SyncState::SettingsResolved, goal = %goal.display_name());

        let day = self.days.today();
        let current = match source.compute(metric, day).await {
            Ok(value) => value,
            Err(err) => {
                return (Some(goal), SyncOutcome::Failed(SyncFailure::Progress(err.to_string())));
            }
        };
        if let Err(err) = source.commit(metric, day, current).await {
            return (Some(goal), SyncOutcome::Failed(SyncFailure::Progress(err.to_string())));
        }
        debug!(state = ?SyncState::ValueComputed, current, %day);

        let remote = self
            .client
            .fetch_latest_datapoint(&goal)
            .await
            .map(|point| point.value);

        let decision = decide(self.mode, current, remote);
        debug!(state = ?SyncState::DecisionMade, ?remote, ?decision);

        let value = match decision {
            Decision::Skip(reason) => return (Some(goal), SyncOutcome::Skipped(reason)),
            Decision::Post(value) => value,
        };

        let request_id = RequestId::new(metric, day, self.days.clock().now().timestamp_millis());
        let datapoint = NewDatapoint::new(day, value, &self.comment_source, request_id.clone());

        let outcome = match self.client.post_datapoint(&goal, &datapoint).await {
            Ok(_) => SyncOutcome::Posted { value, request_id },
            Err(err) => SyncOutcome::Failed(err.into()),
        };
        (Some(goal), outcome)
    }
}
