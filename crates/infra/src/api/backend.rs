//! Backend adapter for the core ports
//!
//! Maps each port method onto one REST call. Path segments taken from user
//! input (connection IDs, platform names) are percent-encoded.

use std::sync::Arc;

use async_trait::async_trait;
use creatorlink_core::{ConnectionsBackend, OAuthBackend, PlatformCatalog};
use creatorlink_domain::{
    BackendConfig, CreatorLinkError, InitiateConnectionRequest, OAuthInitiation, OAuthStatus,
    Platform, PlatformStatus, Result, SocialConnection,
};
use serde::Serialize;
use tracing::{debug, instrument};
use urlencoding::encode;

use super::auth::{AccessTokenProvider, StaticTokenProvider};
use super::client::{ApiClient, ApiClientConfig};
use super::errors::ApiError;

const CONNECTIONS: &str = "/social-connections";
const PLATFORMS: &str = "/platforms";

#[derive(Serialize)]
struct AutomationToggle {
    enabled: bool,
}

/// REST implementation of [`ConnectionsBackend`], [`OAuthBackend`] and
/// [`PlatformCatalog`].
#[derive(Clone)]
pub struct BackendClient {
    api: ApiClient,
}

impl BackendClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Build a client from configuration and a token source.
    pub fn from_config(
        config: &BackendConfig,
        auth: Arc<dyn AccessTokenProvider>,
    ) -> Result<Self> {
        let api = ApiClient::new(ApiClientConfig::from(config), auth)?;
        Ok(Self::new(api))
    }

    /// Copy of this client acting with the caller's token.
    pub fn with_token(&self, token: impl Into<String>) -> Self {
        Self { api: self.api.with_auth(Arc::new(StaticTokenProvider::new(token))) }
    }

    fn connection_path(id: &str) -> String {
        format!("{CONNECTIONS}/{}", encode(id))
    }
}

#[async_trait]
impl ConnectionsBackend for BackendClient {
    #[instrument(skip(self))]
    async fn list_connections(&self) -> Result<Vec<SocialConnection>> {
        let connections: Vec<SocialConnection> = self.api.get(CONNECTIONS).await?;
        debug!(count = connections.len(), "connections listed");
        Ok(connections)
    }

    #[instrument(skip(self))]
    async fn get_connection(&self, id: &str) -> Result<SocialConnection> {
        Ok(self.api.get(&Self::connection_path(id)).await?)
    }

    #[instrument(skip(self))]
    async fn refresh_connection(&self, id: &str) -> Result<()> {
        let path = format!("{}/refresh", Self::connection_path(id));
        let _: serde_json::Value = self.api.post_empty(&path).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn set_automation(&self, id: &str, enabled: bool) -> Result<()> {
        let path = format!("{}/automation", Self::connection_path(id));
        let _: serde_json::Value = self.api.patch(&path, &AutomationToggle { enabled }).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_connection(&self, id: &str) -> Result<()> {
        Ok(self.api.delete(&Self::connection_path(id)).await?)
    }
}

#[async_trait]
impl OAuthBackend for BackendClient {
    #[instrument(skip(self, request), fields(platform_id = %request.platform_id))]
    async fn initiate(&self, request: InitiateConnectionRequest) -> Result<OAuthInitiation> {
        let path = format!("{CONNECTIONS}/oauth/initiate");
        Ok(self.api.post(&path, &request).await?)
    }

    #[instrument(skip(self, state))]
    async fn status(&self, state: &str, platform: &str) -> Result<OAuthStatus> {
        let path = format!("{CONNECTIONS}/oauth/status");
        Ok(self.api.get_with_query(&path, &[("state", state), ("platform", platform)]).await?)
    }
}

#[async_trait]
impl PlatformCatalog for BackendClient {
    #[instrument(skip(self))]
    async fn list_platforms(&self, status: Option<PlatformStatus>) -> Result<Vec<Platform>> {
        let query: Vec<(&str, &str)> =
            status.map(|status| ("status", status.as_wire())).into_iter().collect();
        Ok(self.api.get_with_query(PLATFORMS, &query).await?)
    }

    #[instrument(skip(self))]
    async fn find_platform_by_name(&self, name: &str) -> Result<Option<Platform>> {
        let path = format!("{PLATFORMS}/by-name/{}", encode(name));
        match self.api.get::<Platform>(&path).await {
            Ok(platform) => Ok(Some(platform)),
            Err(ApiError::NotFound(_)) => Ok(None),
            Err(err) => Err(CreatorLinkError::from(err)),
        }
    }
}
