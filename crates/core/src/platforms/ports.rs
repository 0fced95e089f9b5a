//! Port interfaces for the platform catalog
//!
//! These traits define the boundaries between core business logic
//! and infrastructure implementations for platform lookups.

use async_trait::async_trait;
use creatorlink_domain::{Platform, PlatformStatus, Result};

/// Read-only access to the platform catalog held by the backend.
#[async_trait]
pub trait PlatformCatalog: Send + Sync {
    /// List platforms, optionally filtered by administrative status
    async fn list_platforms(&self, status: Option<PlatformStatus>) -> Result<Vec<Platform>>;

    /// Look up a single platform by name or slug
    ///
    /// Returns `Ok(None)` when the backend has no such platform.
    async fn find_platform_by_name(&self, name: &str) -> Result<Option<Platform>>;
}
