//! Sync services: the components between host events and Beeminder.

pub mod ancestor_tags;
pub mod daystamp_clock;
pub mod debouncer;
pub mod event_bus;
pub mod goal_settings;
pub mod progress;
pub mod sync_orchestrator;
pub mod sync_triggers;
pub mod trace_logger;

#[cfg(test)]
pub(crate) mod test_support;

pub use ancestor_tags::AncestorTagResolver;
pub use daystamp_clock::DaystampClock;
pub use debouncer::Debouncer;
pub use event_bus::{EventBus, Subscription};
pub use goal_settings::resolve_goal;
pub use progress::{GaugeProgress, IncrementalProgress};
pub use sync_orchestrator::SyncOrchestrator;
pub use sync_triggers::SyncTriggers;
pub use trace_logger::TraceLogger;
