//! Composition root for the CLI.

use anyhow::{Context, Result};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::adapters::memory::{InMemoryCardSet, InMemoryDocumentTree};
use crate::adapters::sqlite::{
    database_url, initialize_database, SqliteCounterStore, SqliteTraceLog,
};
use crate::adapters::ConfigSettings;
use crate::domain::models::{Config, MetricId, ProgressKind};
use crate::domain::ports::{Clock, CounterKey, CounterStore, ProgressSource, SystemClock};
use crate::infrastructure::beeminder::{BeeminderClientConfig, HttpBeeminderClient};
use crate::services::{
    AncestorTagResolver, DaystampClock, GaugeProgress, IncrementalProgress, SyncOrchestrator,
    TraceLogger,
};

/// Host data exported as JSON files.
#[derive(Debug, Clone, Default)]
pub struct HostSnapshots {
    /// `{"nodes": [...]}` document tree
    pub tree: Option<PathBuf>,
    /// Array of cards
    pub cards: Option<PathBuf>,
}

/// Every collaborator of the sync core, built from one [`Config`].
pub struct SyncRuntime {
    pub config: Config,
    pub pool: SqlitePool,
    pub counters: Arc<SqliteCounterStore>,
    pub trace_log: Arc<SqliteTraceLog>,
    pub settings: Arc<ConfigSettings>,
    pub client: Arc<HttpBeeminderClient>,
    pub tree: Arc<InMemoryDocumentTree>,
    pub cards: Arc<InMemoryCardSet>,
    pub days: DaystampClock,
    pub orchestrator: Arc<SyncOrchestrator>,
}

impl SyncRuntime {
    /// Open the database and build the orchestrator.
    pub async fn open(config: Config, snapshots: HostSnapshots) -> Result<Self> {
        let url = database_url(&config.database.path);
        let pool = initialize_database(&url)
            .await
            .with_context(|| format!("Failed to open database at {}", config.database.path))?;

        let tree = match snapshots.tree {
            Some(ref path) => InMemoryDocumentTree::load(path)
                .await
                .with_context(|| format!("Failed to load document tree {}", path.display()))?,
            None => InMemoryDocumentTree::new(),
        };
        let cards = match snapshots.cards {
            Some(ref path) => InMemoryCardSet::load(path)
                .await
                .with_context(|| format!("Failed to load cards {}", path.display()))?,
            None => InMemoryCardSet::default(),
        };

        let client = HttpBeeminderClient::new(BeeminderClientConfig::from(&config.beeminder))
            .context("Failed to build Beeminder client")?;

        let clock: Arc<dyn Clock> = Arc::new(SystemClock::new(config.sync.utc_offset_minutes));
        let days = DaystampClock::new(clock.clone(), config.sync.rollover_hour);

        let counters = Arc::new(SqliteCounterStore::new(pool.clone()));
        let trace_log = Arc::new(SqliteTraceLog::new(pool.clone()));
        let settings = Arc::new(ConfigSettings::new(config.clone()));
        let client = Arc::new(client);
        let tree = Arc::new(tree);
        let cards = Arc::new(cards);

        let incremental: Arc<dyn ProgressSource> =
            Arc::new(IncrementalProgress::new(counters.clone()));
        let gauge: Arc<dyn ProgressSource> = Arc::new(GaugeProgress::new(cards.clone(), clock));

        let mut orchestrator = SyncOrchestrator::new(
            settings.clone(),
            client.clone(),
            days.clone(),
            TraceLogger::new(trace_log.clone(), settings.clone()),
        )
        .with_mode(config.sync.mode)
        .with_comment_source(config.beeminder.comment_source.clone());

        for metric in MetricId::ALL {
            let source = match metric.progress_kind() {
                ProgressKind::Incremental => incremental.clone(),
                ProgressKind::Gauge => gauge.clone(),
            };
            orchestrator = orchestrator.with_source(metric, source);
        }

        info!(
            database = %config.database.path,
            mode = config.sync.mode.as_str(),
            "sync runtime ready"
        );

        Ok(Self {
            config,
            pool,
            counters,
            trace_log,
            settings,
            client,
            tree,
            cards,
            days,
            orchestrator: Arc::new(orchestrator),
        })
    }

    pub fn resolver(&self) -> AncestorTagResolver {
        AncestorTagResolver::new(
            self.tree.clone(),
            self.config.sync.count_edits_tag.clone(),
            self.config.sync.max_ancestor_depth,
        )
    }

    pub fn debounce_window(&self) -> Duration {
        Duration::from_millis(self.config.sync.debounce_ms)
    }

    /// Today's stored counter for an incremental metric.
    pub async fn today_count(&self, metric: MetricId) -> Result<u64> {
        let key = CounterKey::new(metric, self.days.today());
        debug!(key = %key, "reading counter");
        Ok(self.counters.get(&key).await?)
    }
}
