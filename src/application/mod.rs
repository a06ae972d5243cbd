//! Application layer: wires adapters, infrastructure and services into a
//! running sync core.

pub mod runtime;

pub use runtime::{HostSnapshots, SyncRuntime};
