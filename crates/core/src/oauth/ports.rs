//! Port interfaces for the OAuth flow

use async_trait::async_trait;
use creatorlink_domain::{
    InitiateConnectionRequest, OAuthInitiation, OAuthStatus, PopupSize, Result,
};

/// Backend endpoints driving a server-managed OAuth flow
#[async_trait]
pub trait OAuthBackend: Send + Sync {
    /// Request an authorization URL and opaque state token
    async fn initiate(&self, request: InitiateConnectionRequest) -> Result<OAuthInitiation>;

    /// Query the status of the flow identified by `state`
    async fn status(&self, state: &str, platform: &str) -> Result<OAuthStatus>;
}

/// A window showing the provider's authorization page.
///
/// Its content is cross-origin, so the only observable signal is whether the
/// user closed it.
pub trait AuthWindow: Send + Sync {
    fn is_closed(&self) -> bool;

    /// Close the window. Closing an already closed window is a no-op.
    fn close(&self);
}

/// Opens authorization windows.
pub trait PopupLauncher: Send + Sync {
    /// Open `url` in a new window of the given size.
    ///
    /// Implementations return `CreatorLinkError::PopupBlocked` when no window
    /// could be created.
    fn open(&self, url: &str, size: PopupSize) -> Result<Box<dyn AuthWindow>>;
}
