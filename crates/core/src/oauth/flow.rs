//! End-to-end connect flow
//!
//! Composes initiation, the authorization window and the status poller, and
//! caches the resulting connection. At most one flow runs per platform, keyed
//! on the cached platform's ID so a name and its slug share one guard.

use std::sync::Arc;

use creatorlink_domain::{CreatorLinkError, OAuthOutcome, Result};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::{info, instrument};

use super::initiation::OAuthInitiator;
use super::poller::StatusPoller;
use super::popup::PopupDriver;
use super::session::OAuthSession;
use crate::connections::ConnectionStore;

/// Links a new account on a platform
pub struct ConnectFlow {
    initiator: OAuthInitiator,
    popup: PopupDriver,
    poller: StatusPoller,
    store: Arc<ConnectionStore>,
    connecting: DashMap<String, ()>,
}

impl ConnectFlow {
    pub fn new(
        initiator: OAuthInitiator,
        popup: PopupDriver,
        poller: StatusPoller,
        store: Arc<ConnectionStore>,
    ) -> Self {
        Self { initiator, popup, poller, store, connecting: DashMap::new() }
    }

    /// Whether a flow is currently running for the platform (name or slug).
    pub fn is_connecting(&self, platform_name: &str) -> bool {
        self.store
            .platform_by_name(platform_name)
            .is_some_and(|platform| self.connecting.contains_key(&platform.id))
    }

    /// Run a complete OAuth flow for `platform_name`.
    ///
    /// Configuration problems, the account limit, a concurrent flow for the
    /// same platform and a blocked window are errors. Everything the flow can
    /// resolve to once the window is open is reported as an [`OAuthOutcome`].
    #[instrument(skip(self, extra_scopes))]
    pub async fn connect(&self, platform_name: &str, extra_scopes: &[String]) -> Result<OAuthOutcome> {
        let _guard = self.begin(platform_name)?;

        let (platform, initiation) = self.initiator.initiate(platform_name, extra_scopes).await?;
        let popup = self.popup.open(&initiation.authorization_url)?;
        let session = OAuthSession::new(initiation, popup);
        info!(session_id = %session.id, platform = %platform.name, "waiting for authorization");

        let outcome = self.poller.run(&session).await;

        if let Some(connection) = outcome.connection() {
            self.store.upsert(connection.clone());
        }

        Ok(outcome)
    }

    fn begin(&self, platform_name: &str) -> Result<ConnectingGuard<'_>> {
        let platform = self.store.platform_by_name(platform_name).ok_or_else(|| {
            CreatorLinkError::PlatformNotConfigured(format!(
                "{platform_name} is not configured for this workspace"
            ))
        })?;

        let key = platform.id;
        match self.connecting.entry(key.clone()) {
            Entry::Occupied(_) => Err(CreatorLinkError::ConnectionInProgress(format!(
                "a connection to {} is already in progress",
                platform.name
            ))),
            Entry::Vacant(entry) => {
                entry.insert(());
                Ok(ConnectingGuard { flows: &self.connecting, key })
            }
        }
    }
}

/// Clears the per-platform "connecting" marker on drop.
struct ConnectingGuard<'a> {
    flows: &'a DashMap<String, ()>,
    key: String,
}

impl Drop for ConnectingGuard<'_> {
    fn drop(&mut self) {
        self.flows.remove(&self.key);
    }
}
