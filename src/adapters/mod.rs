//! Adapters implementing the domain ports.

pub mod config_settings;
pub mod memory;
pub mod sqlite;

pub use config_settings::ConfigSettings;
