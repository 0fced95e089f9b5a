//! OAuth initiation
//!
//! Validates the platform and the user's account limit, then asks the backend
//! for an authorization URL and state token. A failed attempt is surfaced
//! immediately; there is no retry at this layer.

use std::sync::Arc;

use creatorlink_domain::{
    CreatorLinkError, InitiateConnectionRequest, OAuthInitiation, Platform, Result,
};
use tracing::{info, instrument, warn};

use super::ports::OAuthBackend;
use crate::connections::ConnectionStore;
use crate::platforms::ports::PlatformCatalog;
use crate::platforms::resolver;

/// Starts server-managed OAuth flows
pub struct OAuthInitiator {
    catalog: Arc<dyn PlatformCatalog>,
    oauth: Arc<dyn OAuthBackend>,
    store: Arc<ConnectionStore>,
    redirect_url: Option<String>,
}

impl OAuthInitiator {
    pub fn new(
        catalog: Arc<dyn PlatformCatalog>,
        oauth: Arc<dyn OAuthBackend>,
        store: Arc<ConnectionStore>,
    ) -> Self {
        Self { catalog, oauth, store, redirect_url: None }
    }

    /// URL the backend should send the browser to after authorization.
    pub fn with_redirect_url(mut self, redirect_url: Option<String>) -> Self {
        self.redirect_url = redirect_url;
        self
    }

    /// Reject the request when the cached catalog does not know the platform
    /// or the user already linked the maximum number of accounts.
    ///
    /// Performs no network call.
    pub fn check_limit(&self, platform_name: &str) -> Result<Platform> {
        let platform = self.store.platform_by_name(platform_name).ok_or_else(|| {
            CreatorLinkError::PlatformNotConfigured(format!(
                "{platform_name} is not configured for this workspace"
            ))
        })?;

        if !self.store.can_connect(&platform) {
            return Err(CreatorLinkError::ConnectionLimitReached(format!(
                "{} allows at most {} connected account(s)",
                platform.name, platform.max_accounts_allowed
            )));
        }

        Ok(platform)
    }

    /// Request an authorization URL for `platform_name`.
    #[instrument(skip(self, extra_scopes))]
    pub async fn initiate(
        &self,
        platform_name: &str,
        extra_scopes: &[String],
    ) -> Result<(Platform, OAuthInitiation)> {
        self.check_limit(platform_name)?;

        let platform =
            self.catalog.find_platform_by_name(platform_name).await?.ok_or_else(|| {
                CreatorLinkError::PlatformNotConfigured(format!(
                    "{platform_name} is not configured on the backend"
                ))
            })?;

        if !platform.is_active() {
            return Err(CreatorLinkError::PlatformInactive(format!(
                "{} is currently inactive",
                platform.name
            )));
        }

        if let Some(config) = resolver::resolve(&platform.slug) {
            if config.connection_type != platform.connection_type {
                warn!(
                    platform = %platform.name,
                    expected = %config.connection_type,
                    actual = %platform.connection_type,
                    "backend connection type differs from the platform configuration"
                );
            }
        }

        let request = InitiateConnectionRequest {
            platform_id: platform.initiation_id().to_string(),
            additional_scopes: additional_scopes(&platform, extra_scopes),
            redirect_url: self.redirect_url.clone(),
        };

        let initiation = self.oauth.initiate(request).await?;
        info!(platform = %platform.name, "OAuth flow initiated");
        Ok((platform, initiation))
    }
}

/// Extra scopes not already covered by the platform's required permissions.
fn additional_scopes(platform: &Platform, extra_scopes: &[String]) -> Option<Vec<String>> {
    let required: Vec<String> = resolver::requested_scopes(&platform.slug, &[])
        .into_iter()
        .chain(platform.required_permissions.iter().cloned())
        .collect();

    let extras: Vec<String> = resolver::requested_scopes(&platform.slug, extra_scopes)
        .into_iter()
        .filter(|scope| !required.contains(scope))
        .collect();

    (!extras.is_empty()).then_some(extras)
}

#[cfg(test)]
mod tests {
    use creatorlink_domain::{ConnectionType, PlatformStatus};

    use super::*;

    fn platform(required: &[&str]) -> Platform {
        Platform {
            id: "plt_tt".into(),
            name: "TikTok".into(),
            slug: "tiktok".into(),
            max_accounts_allowed: 2,
            required_permissions: required.iter().map(|s| (*s).to_string()).collect(),
            connection_type: ConnectionType::Oauth2,
            status: PlatformStatus::Active,
            work_platform_id: None,
        }
    }

    #[test]
    fn additional_scopes_drop_required_permissions() {
        let extras = vec!["video.list".to_string(), "video.upload".to_string()];
        assert_eq!(
            additional_scopes(&platform(&["comment.list"]), &extras),
            Some(vec!["video.upload".to_string()])
        );

        let covered = vec!["comment.list".to_string()];
        assert_eq!(additional_scopes(&platform(&["comment.list"]), &covered), None);
        assert_eq!(additional_scopes(&platform(&[]), &[]), None);
    }
}
