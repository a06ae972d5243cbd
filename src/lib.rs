//! bmsync - Beeminder progress sync
//!
//! Counts review completions and edits inside tagged subtrees, measures how
//! many cards are currently maintained, and reports each metric to a
//! Beeminder goal as datapoints.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): models, the sync decision policy and ports
//! - **Adapters** (`adapters`): SQLite, in-memory and config-backed port implementations
//! - **Service Layer** (`services`): orchestration, debouncing, event routing
//! - **Infrastructure Layer** (`infrastructure`): Beeminder HTTP client, config, logging
//! - **Application Layer** (`application`): composition root
//! - **CLI Layer** (`cli`): command-line interface
//!
//! # Example
//!
//! ```ignore
//! use bmsync::application::{HostSnapshots, SyncRuntime};
//! use bmsync::domain::models::MetricId;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = bmsync::ConfigLoader::load()?;
//!     let runtime = SyncRuntime::open(config, HostSnapshots::default()).await?;
//!     runtime.orchestrator.sync(MetricId::ReviewCount).await;
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use application::{HostSnapshots, SyncRuntime};
pub use domain::errors::{DomainError, DomainResult, RemoteError};
pub use domain::models::{
    Config, Daystamp, DecisionMode, GoalConfig, HostEvent, MetricId, NodeId, SyncOutcome,
};
pub use domain::ports::{
    BeeminderClient, CardSet, Clock, CounterStore, DocumentTree, ProgressSource, SettingsStore,
    TraceLog,
};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{EventBus, SyncOrchestrator, SyncTriggers};
