//! Domain errors for bmsync.

use thiserror::Error;

use super::models::SyncFailure;

/// Errors from host collaborators and local storage.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Host read failed: {0}")]
    HostReadFailed(String),

    #[error("Node not found: {0}")]
    NodeNotFound(String),

    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl From<sqlx::Error> for DomainError {
    fn from(err: sqlx::Error) -> Self {
        DomainError::StorageError(err.to_string())
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        DomainError::SerializationError(err.to_string())
    }
}

/// Failure talking to Beeminder.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteError {
    /// No response: connection, DNS, TLS or timeout.
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Beeminder responded with a non-success status.
    #[error("API error ({status}): {body}")]
    ApiError { status: u16, body: String },

    /// A success response that could not be decoded.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl From<RemoteError> for SyncFailure {
    fn from(err: RemoteError) -> Self {
        match err {
            RemoteError::NetworkError(msg) => SyncFailure::Network(msg),
            RemoteError::ApiError { status, body } => SyncFailure::Api { status, body },
            RemoteError::InvalidResponse(msg) => SyncFailure::InvalidResponse(msg),
        }
    }
}
