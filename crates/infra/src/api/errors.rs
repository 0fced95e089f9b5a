//! API-specific error types
//!
//! Status-level failures of backend calls, collapsed into the domain error at
//! the port boundary.

use std::time::Duration;

use creatorlink_domain::CreatorLinkError;
use thiserror::Error;

/// API operation errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Rate limit exceeded: {0}")]
    RateLimit(String),

    #[error("Server error: {0}")]
    Server(String),

    #[error("Client error: {0}")]
    Client(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Timeout after {0:?}")]
    Timeout(Duration),
}

impl From<CreatorLinkError> for ApiError {
    fn from(err: CreatorLinkError) -> Self {
        match err {
            CreatorLinkError::Network(message) => Self::Network(message),
            CreatorLinkError::Auth(message) => Self::Auth(message),
            CreatorLinkError::Config(message) => Self::Config(message),
            CreatorLinkError::NotFound(message) => Self::NotFound(message),
            CreatorLinkError::InvalidInput(message) => Self::Client(message),
            other => Self::Server(other.to_string()),
        }
    }
}

/// Collapse into the domain error at the port boundary.
impl From<ApiError> for CreatorLinkError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Auth(message) => Self::Auth(message),
            ApiError::NotFound(message) => Self::NotFound(message),
            ApiError::Client(message) => Self::InvalidInput(message),
            ApiError::Config(message) => Self::Config(message),
            ApiError::RateLimit(message)
            | ApiError::Server(message)
            | ApiError::Network(message) => Self::Network(message),
            ApiError::Timeout(after) => Self::Network(format!("request timed out after {after:?}")),
        }
    }
}
