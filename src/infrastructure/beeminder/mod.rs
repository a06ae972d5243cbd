//! Beeminder API client.

pub mod client;
pub mod errors;

pub use client::{BeeminderClientConfig, HttpBeeminderClient};
pub use errors::BeeminderApiError;
