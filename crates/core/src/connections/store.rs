//! In-memory connection store
//!
//! Holds the client's cached copy of the user's connections together with the
//! platform catalog needed to enforce per-platform limits without a network
//! round trip. Records are only mutated after the backend confirmed a change.
//!
//! Every lifecycle operation registers a per-connection in-flight marker so
//! callers can disable controls for that connection only.

use chrono::{DateTime, Utc};
use creatorlink_domain::{
    ConnectionOperation, CreatorLinkError, Platform, Result, SocialConnection,
};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::RwLock;

/// Cached connections, platform catalog and in-flight markers.
#[derive(Default)]
pub struct ConnectionStore {
    connections: RwLock<Vec<SocialConnection>>,
    platforms: RwLock<Vec<Platform>>,
    in_flight: DashMap<String, ConnectionOperation>,
}

impl ConnectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the cached connections with a fresh listing.
    pub fn replace_connections(&self, connections: Vec<SocialConnection>) {
        *self.connections.write() = connections;
    }

    /// Replace the cached platform catalog.
    pub fn replace_platforms(&self, platforms: Vec<Platform>) {
        *self.platforms.write() = platforms;
    }

    pub fn all(&self) -> Vec<SocialConnection> {
        self.connections.read().clone()
    }

    pub fn len(&self) -> usize {
        self.connections.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.read().is_empty()
    }

    pub fn get(&self, id: &str) -> Option<SocialConnection> {
        self.connections.read().iter().find(|c| c.id == id).cloned()
    }

    /// Connections linked to the given platform ID.
    pub fn by_platform(&self, platform_id: &str) -> Vec<SocialConnection> {
        self.connections.read().iter().filter(|c| c.platform_id == platform_id).cloned().collect()
    }

    pub fn active_count(&self, platform_id: &str) -> usize {
        self.connections
            .read()
            .iter()
            .filter(|c| c.platform_id == platform_id && c.is_active)
            .count()
    }

    /// Active connections with an expired token or failing automation.
    pub fn needs_attention(&self, now: DateTime<Utc>) -> Vec<SocialConnection> {
        self.connections.read().iter().filter(|c| c.needs_attention(now)).cloned().collect()
    }

    /// Cached catalog entry matching a platform name or slug.
    pub fn platform_by_name(&self, name: &str) -> Option<Platform> {
        self.platforms.read().iter().find(|p| p.matches_name(name)).cloned()
    }

    /// Whether another account can be linked on this platform.
    pub fn can_connect(&self, platform: &Platform) -> bool {
        self.active_count(&platform.id) < platform.max_accounts_allowed as usize
    }

    /// Insert a connection or replace the record with the same ID.
    pub fn upsert(&self, connection: SocialConnection) {
        let mut connections = self.connections.write();
        match connections.iter_mut().find(|c| c.id == connection.id) {
            Some(existing) => *existing = connection,
            None => connections.push(connection),
        }
    }

    /// Apply `update` to the cached record. Returns the updated copy.
    pub fn update<F>(&self, id: &str, update: F) -> Option<SocialConnection>
    where
        F: FnOnce(&mut SocialConnection),
    {
        let mut connections = self.connections.write();
        let connection = connections.iter_mut().find(|c| c.id == id)?;
        update(connection);
        Some(connection.clone())
    }

    /// Remove exactly the connection with `id`.
    pub fn remove(&self, id: &str) -> Option<SocialConnection> {
        let mut connections = self.connections.write();
        let index = connections.iter().position(|c| c.id == id)?;
        Some(connections.remove(index))
    }

    pub fn is_busy(&self, id: &str) -> bool {
        self.in_flight.contains_key(id)
    }

    /// Operation currently in flight for a connection, if any.
    pub fn in_flight(&self, id: &str) -> Option<ConnectionOperation> {
        self.in_flight.get(id).map(|entry| *entry.value())
    }

    /// Mark `operation` as in flight for `id`.
    ///
    /// Rejects the call when any operation is already running for the same
    /// connection. The marker is released when the guard drops.
    pub fn begin(&self, id: &str, operation: ConnectionOperation) -> Result<InFlightGuard<'_>> {
        match self.in_flight.entry(id.to_string()) {
            Entry::Occupied(entry) => Err(CreatorLinkError::OperationInProgress(format!(
                "{} already running for connection {id}",
                entry.get()
            ))),
            Entry::Vacant(entry) => {
                entry.insert(operation);
                Ok(InFlightGuard { store: self, id: id.to_string() })
            }
        }
    }
}

/// Releases a connection's in-flight marker on drop.
pub struct InFlightGuard<'a> {
    store: &'a ConnectionStore,
    id: String,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.store.in_flight.remove(&self.id);
    }
}
