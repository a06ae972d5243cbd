//! Port trait definitions (Hexagonal Architecture)
//!
//! Async trait interfaces for the host collaborators and remote services
//! the sync core depends on:
//! - CounterStore: synced per-day counters
//! - BeeminderClient: datapoint reads and writes
//! - DocumentTree / CardSet: read-only host data
//! - SettingsStore: host settings
//! - TraceLog: host-visible log lines
//! - ProgressSource: current value of a metric
//! - Clock: wall-clock time

pub mod beeminder_client;
pub mod card_set;
pub mod clock;
pub mod counter_store;
pub mod document_tree;
pub mod progress_source;
pub mod settings_store;
pub mod trace_log;

pub use beeminder_client::BeeminderClient;
pub use card_set::CardSet;
pub use clock::{Clock, FixedClock, SystemClock};
pub use counter_store::{CounterKey, CounterStore};
pub use document_tree::{DocumentTree, NodeRef};
pub use progress_source::ProgressSource;
pub use settings_store::SettingsStore;
pub use trace_log::{TraceEntry, TraceLog};
