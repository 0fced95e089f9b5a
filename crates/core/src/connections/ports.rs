//! Port interfaces for social connection management
//!
//! These traits define the boundaries between core business logic
//! and infrastructure implementations for connection operations.

use async_trait::async_trait;
use creatorlink_domain::{Result, SocialConnection};

/// Backend operations on a user's social connections
#[async_trait]
pub trait ConnectionsBackend: Send + Sync {
    /// List every connection of the current user
    async fn list_connections(&self) -> Result<Vec<SocialConnection>>;

    /// Fetch a single connection by ID
    async fn get_connection(&self, id: &str) -> Result<SocialConnection>;

    /// Ask the backend to refresh the connection's OAuth token
    async fn refresh_connection(&self, id: &str) -> Result<()>;

    /// Enable or disable automation for a connection
    async fn set_automation(&self, id: &str, enabled: bool) -> Result<()>;

    /// Delete (disconnect) a connection
    async fn delete_connection(&self, id: &str) -> Result<()>;
}

/// Interactive confirmation for destructive operations.
#[async_trait]
pub trait Confirmation: Send + Sync {
    /// Returns `Ok(true)` when the user accepts.
    async fn confirm(&self, prompt: &str) -> Result<bool>;
}
