//! Application context - dependency injection container

use std::sync::Arc;

use creatorlink_core::{
    Confirmation, ConnectFlow, ConnectionService, ConnectionStore, OAuthInitiator, PollerConfig,
    PopupDriver, StatusPoller,
};
use creatorlink_domain::{Config, Result};
use creatorlink_infra::{AccessTokenProvider, BackendClient, BrowserProcessLauncher};
use tracing::info;

/// Application context - holds all services and dependencies
pub struct AppContext {
    pub config: Config,
    pub backend: Arc<BackendClient>,
    pub store: Arc<ConnectionStore>,
    pub connections: ConnectionService,
    pub connect_flow: ConnectFlow,
}

impl AppContext {
    /// Wire the backend client, the cached store and the OAuth machinery.
    ///
    /// # Errors
    /// Returns a configuration error when the backend URL is invalid.
    pub fn new(
        config: Config,
        auth: Arc<dyn AccessTokenProvider>,
        confirmation: Arc<dyn Confirmation>,
    ) -> Result<Self> {
        let backend = Arc::new(BackendClient::from_config(&config.backend, auth)?);
        let store = Arc::new(ConnectionStore::new());

        let connections = ConnectionService::new(
            backend.clone(),
            backend.clone(),
            Arc::clone(&store),
            confirmation,
        );

        let initiator = OAuthInitiator::new(backend.clone(), backend.clone(), Arc::clone(&store))
            .with_redirect_url(config.oauth.redirect_url.clone());
        let launcher = Arc::new(BrowserProcessLauncher::new(config.oauth.popup.browser_command.clone()));
        let popup = PopupDriver::new(launcher, config.oauth.popup.size());
        let poller = StatusPoller::new(backend.clone(), backend.clone(), PollerConfig::from(&config.oauth));
        let connect_flow = ConnectFlow::new(initiator, popup, poller, Arc::clone(&store));

        info!(
            backend = %config.backend.base_url,
            poll_interval_seconds = config.oauth.poll_interval_seconds,
            max_poll_attempts = config.oauth.max_poll_attempts,
            "application context ready"
        );

        Ok(Self { config, backend, store, connections, connect_flow })
    }

    /// Fill the store from the backend. Every connection command starts here.
    pub async fn load(&self) -> Result<usize> {
        self.connections.load().await
    }
}
