//! OAuth flow types
//!
//! The OAuth exchange itself happens on the backend. These types describe the
//! client's view of a flow: the initiation handshake, the status reported by
//! the backend while the user authorizes, and the terminal outcome.

use serde::{Deserialize, Serialize};

use super::connection::SocialConnection;
use crate::constants::{DEFAULT_POPUP_HEIGHT, DEFAULT_POPUP_WIDTH};

/// Body of the initiate request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitiateConnectionRequest {
    pub platform_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_scopes: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,
}

/// Backend answer to an initiate request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OAuthInitiation {
    pub authorization_url: String,
    /// Opaque token correlating status polls with this flow.
    pub state: String,
    pub platform: String,
}

/// Status values reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OAuthStatusKind {
    Pending,
    Completed,
    Failed,
    Expired,
}

crate::impl_domain_status_conversions!(OAuthStatusKind {
    Pending => "pending",
    Completed => "completed",
    Failed => "failed",
    Expired => "expired",
});

/// Backend answer to a status poll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OAuthStatus {
    pub status: OAuthStatusKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl OAuthStatus {
    pub fn pending() -> Self {
        Self { status: OAuthStatusKind::Pending, connection_id: None, error_message: None }
    }

    pub fn completed(connection_id: impl Into<String>) -> Self {
        Self {
            status: OAuthStatusKind::Completed,
            connection_id: Some(connection_id.into()),
            error_message: None,
        }
    }

    pub fn failed(message: Option<String>) -> Self {
        Self { status: OAuthStatusKind::Failed, connection_id: None, error_message: message }
    }

    pub fn expired() -> Self {
        Self { status: OAuthStatusKind::Expired, connection_id: None, error_message: None }
    }
}

/// Terminal result of one OAuth session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum OAuthOutcome {
    Completed { connection: SocialConnection },
    Failed { message: String },
    Expired,
    /// The user closed the authorization window.
    Cancelled,
    /// No resolution within the polling bound.
    TimedOut,
}

impl OAuthOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Completed { .. } => "completed",
            Self::Failed { .. } => "failed",
            Self::Expired => "expired",
            Self::Cancelled => "cancelled",
            Self::TimedOut => "timed_out",
        }
    }

    pub fn connection(&self) -> Option<&SocialConnection> {
        match self {
            Self::Completed { connection } => Some(connection),
            _ => None,
        }
    }

    /// Human readable reason for non-successful outcomes.
    pub fn failure_reason(&self) -> Option<String> {
        match self {
            Self::Completed { .. } => None,
            Self::Failed { message } => Some(message.clone()),
            Self::Expired => Some("The authorization request expired. Please try again.".into()),
            Self::Cancelled => Some("The authorization window was closed before finishing.".into()),
            Self::TimedOut => Some("Timed out waiting for authorization.".into()),
        }
    }
}

/// Fixed size of the authorization window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopupSize {
    pub width: u32,
    pub height: u32,
}

impl Default for PopupSize {
    fn default() -> Self {
        Self { width: DEFAULT_POPUP_WIDTH, height: DEFAULT_POPUP_HEIGHT }
    }
}
