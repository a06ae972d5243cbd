//! Infrastructure layer module
//!
//! External integrations: the Beeminder HTTP client, configuration loading
//! and logging. Implementations satisfy the port traits defined in the
//! domain layer.

pub mod beeminder;
pub mod config;
pub mod logging;
