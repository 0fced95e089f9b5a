//! Connection lifecycle service - core business logic
//!
//! Refresh, automation toggling and disconnection are plain request/response
//! calls against the backend. The cached record is only touched after the
//! backend confirmed the change, so a failed call leaves local state exactly
//! as it was.

use std::sync::Arc;

use chrono::Utc;
use creatorlink_domain::{
    ConnectionOperation, CreatorLinkError, Platform, Result, SocialConnection,
};
use tracing::{debug, info, instrument, warn};

use super::ports::{Confirmation, ConnectionsBackend};
use super::store::ConnectionStore;
use crate::platforms::ports::PlatformCatalog;

/// Lifecycle operations layered on top of the connection store
pub struct ConnectionService {
    backend: Arc<dyn ConnectionsBackend>,
    catalog: Arc<dyn PlatformCatalog>,
    store: Arc<ConnectionStore>,
    confirmation: Arc<dyn Confirmation>,
}

impl ConnectionService {
    pub fn new(
        backend: Arc<dyn ConnectionsBackend>,
        catalog: Arc<dyn PlatformCatalog>,
        store: Arc<ConnectionStore>,
        confirmation: Arc<dyn Confirmation>,
    ) -> Self {
        Self { backend, catalog, store, confirmation }
    }

    pub fn store(&self) -> &Arc<ConnectionStore> {
        &self.store
    }

    /// Load the platform catalog and the user's connections into the store.
    ///
    /// Returns the number of cached connections.
    #[instrument(skip(self))]
    pub async fn load(&self) -> Result<usize> {
        let platforms = self.catalog.list_platforms(None).await?;
        let connections = self.backend.list_connections().await?;
        let count = connections.len();

        self.store.replace_platforms(platforms);
        self.store.replace_connections(connections);

        info!(connections = count, "connection store loaded");
        Ok(count)
    }

    /// Cached connections, optionally filtered by platform name or slug.
    pub fn list(&self, platform: Option<&str>) -> Result<Vec<SocialConnection>> {
        match platform {
            None => Ok(self.store.all()),
            Some(name) => {
                let platform = self.cached_platform(name)?;
                Ok(self.store.by_platform(&platform.id))
            }
        }
    }

    /// Refresh the OAuth token of a connection.
    #[instrument(skip(self))]
    pub async fn refresh(&self, id: &str) -> Result<SocialConnection> {
        let cached = self.require_cached(id)?;
        let _guard = self.store.begin(id, ConnectionOperation::Refresh)?;

        if let Err(err) = self.backend.refresh_connection(id).await {
            warn!(connection_id = id, error = %err, "token refresh failed");
            return Err(err);
        }

        let now = Utc::now();
        let updated = self.store.update(id, |connection| connection.mark_refreshed(now)).unwrap_or_else(|| {
            debug!(connection_id = id, "connection left the cache during refresh");
            let mut connection = cached;
            connection.mark_refreshed(now);
            connection
        });

        info!(connection_id = id, "token refreshed");
        Ok(updated)
    }

    /// Enable or disable automation for a connection.
    #[instrument(skip(self))]
    pub async fn toggle_automation(&self, id: &str, enabled: bool) -> Result<SocialConnection> {
        let cached = self.require_cached(id)?;
        let _guard = self.store.begin(id, ConnectionOperation::ToggleAutomation)?;

        if let Err(err) = self.backend.set_automation(id, enabled).await {
            warn!(connection_id = id, enabled, error = %err, "automation toggle failed");
            return Err(err);
        }

        let updated =
            self.store.update(id, |connection| connection.set_automation(enabled)).unwrap_or_else(|| {
                debug!(connection_id = id, "connection left the cache during automation toggle");
                let mut connection = cached;
                connection.set_automation(enabled);
                connection
            });

        info!(connection_id = id, enabled, "automation updated");
        Ok(updated)
    }

    /// Disconnect a connection after interactive confirmation.
    ///
    /// Declining returns `CreatorLinkError::Cancelled` without contacting the
    /// backend.
    #[instrument(skip(self))]
    pub async fn disconnect(&self, id: &str) -> Result<()> {
        let connection = self.require_cached(id)?;
        if let Some(operation) = self.store.in_flight(id) {
            return Err(CreatorLinkError::OperationInProgress(format!(
                "{operation} already running for connection {id}"
            )));
        }

        let prompt = format!("Disconnect {}? Automations using it will stop.", connection.label());
        if !self.confirmation.confirm(&prompt).await? {
            info!(connection_id = id, "disconnect declined");
            return Err(CreatorLinkError::Cancelled(format!("disconnect of {id} declined")));
        }

        let _guard = self.store.begin(id, ConnectionOperation::Disconnect)?;

        if let Err(err) = self.backend.delete_connection(id).await {
            warn!(connection_id = id, error = %err, "disconnect failed");
            return Err(err);
        }

        self.store.remove(id);
        info!(connection_id = id, "connection removed");
        Ok(())
    }

    fn require_cached(&self, id: &str) -> Result<SocialConnection> {
        self.store
            .get(id)
            .ok_or_else(|| CreatorLinkError::NotFound(format!("connection {id} is not loaded")))
    }

    fn cached_platform(&self, name: &str) -> Result<Platform> {
        self.store
            .platform_by_name(name)
            .ok_or_else(|| CreatorLinkError::PlatformNotConfigured(name.to_string()))
    }
}
