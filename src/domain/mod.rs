//! Domain layer for bmsync
//!
//! Models, port traits and error types. Nothing here talks to the network
//! or the filesystem directly.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{DomainError, DomainResult, RemoteError};
