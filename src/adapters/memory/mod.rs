//! In-memory adapters.
//!
//! Used by tests, and by the CLI for host data handed over as JSON
//! snapshots (document tree, card set).

pub mod card_set;
pub mod counter_store;
pub mod document_tree;
pub mod settings;
pub mod trace_log;

pub use card_set::InMemoryCardSet;
pub use counter_store::InMemoryCounterStore;
pub use document_tree::{DocumentSnapshot, InMemoryDocumentTree, SnapshotNode};
pub use settings::InMemorySettings;
pub use trace_log::InMemoryTraceLog;
