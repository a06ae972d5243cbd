use reqwest::StatusCode;
use thiserror::Error;

use crate::domain::errors::RemoteError;

/// Errors that can occur when interacting with the Beeminder API
#[derive(Error, Debug)]
pub enum BeeminderApiError {
    /// Rejected parameters (HTTP 400, 422)
    #[error("Invalid request ({0}): {1}")]
    InvalidRequest(StatusCode, String),

    /// Bad or missing auth token (HTTP 401)
    #[error("Invalid auth token - authentication failed: {0}")]
    Unauthorized(String),

    /// Unknown user or goal (HTTP 404)
    #[error("User or goal not found: {0}")]
    NotFound(String),

    /// Rate limit exceeded (HTTP 429)
    #[error("Rate limit exceeded - too many requests: {0}")]
    RateLimitExceeded(String),

    /// Server error from Beeminder (HTTP 5xx)
    #[error("Server error ({0}): {1}")]
    ServerError(StatusCode, String),

    /// Network or connection error, including timeouts
    #[error("Network error: {0}")]
    NetworkError(#[source] reqwest::Error),

    /// Success status with a body that is not what we expected
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Any other non-success status
    #[error("Unexpected status ({0}): {1}")]
    UnknownError(StatusCode, String),
}

impl BeeminderApiError {
    pub fn from_status(status: StatusCode, body: String) -> Self {
        match status {
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                Self::InvalidRequest(status, body)
            }
            StatusCode::UNAUTHORIZED => Self::Unauthorized(body),
            StatusCode::NOT_FOUND => Self::NotFound(body),
            StatusCode::TOO_MANY_REQUESTS => Self::RateLimitExceeded(body),
            status if status.is_server_error() => Self::ServerError(status, body),
            _ => Self::UnknownError(status, body),
        }
    }

    /// HTTP status Beeminder answered with, if it answered at all.
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Unauthorized(_) => Some(StatusCode::UNAUTHORIZED),
            Self::NotFound(_) => Some(StatusCode::NOT_FOUND),
            Self::RateLimitExceeded(_) => Some(StatusCode::TOO_MANY_REQUESTS),
            Self::InvalidRequest(status, _)
            | Self::ServerError(status, _)
            | Self::UnknownError(status, _) => Some(*status),
            Self::NetworkError(_) | Self::InvalidResponse(_) => None,
        }
    }
}

impl From<reqwest::Error> for BeeminderApiError {
    fn from(err: reqwest::Error) -> Self {
        // The URL carries the auth token.
        Self::NetworkError(err.without_url())
    }
}

impl From<BeeminderApiError> for RemoteError {
    fn from(err: BeeminderApiError) -> Self {
        match err {
            BeeminderApiError::NetworkError(e) => Self::NetworkError(e.to_string()),
            BeeminderApiError::InvalidResponse(msg) => Self::InvalidResponse(msg),
            BeeminderApiError::InvalidRequest(status, body)
            | BeeminderApiError::ServerError(status, body)
            | BeeminderApiError::UnknownError(status, body) => Self::ApiError {
                status: status.as_u16(),
                body,
            },
            BeeminderApiError::Unauthorized(body) => Self::ApiError {
                status: StatusCode::UNAUTHORIZED.as_u16(),
                body,
            },
            BeeminderApiError::NotFound(body) => Self::ApiError {
                status: StatusCode::NOT_FOUND.as_u16(),
                body,
            },
            BeeminderApiError::RateLimitExceeded(body) => Self::ApiError {
                status: StatusCode::TOO_MANY_REQUESTS.as_u16(),
                body,
            },
        }
    }
}
