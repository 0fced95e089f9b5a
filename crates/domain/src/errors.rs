//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for CreatorLink
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum CreatorLinkError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),

    /// The platform is missing from the catalog or the backend.
    #[error("Platform not configured: {0}")]
    PlatformNotConfigured(String),

    /// The platform exists but an administrator has disabled it.
    #[error("Platform inactive: {0}")]
    PlatformInactive(String),

    #[error("Connection limit reached: {0}")]
    ConnectionLimitReached(String),

    /// An OAuth flow for this platform is already running.
    #[error("Connection already in progress: {0}")]
    ConnectionInProgress(String),

    /// A lifecycle operation for this connection is already running.
    #[error("Operation already in progress: {0}")]
    OperationInProgress(String),

    #[error("Popup blocked: {0}")]
    PopupBlocked(String),

    #[error("Cancelled: {0}")]
    Cancelled(String),
}

impl CreatorLinkError {
    /// Configuration errors need an administrator; retrying will not help.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Config(_) | Self::PlatformNotConfigured(_) | Self::PlatformInactive(_))
    }

    /// Errors caused by a network blip or an unavailable backend.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}

/// Result type alias for CreatorLink operations
pub type Result<T> = std::result::Result<T, CreatorLinkError>;
