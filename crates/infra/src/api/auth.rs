//! Access tokens for backend requests

use async_trait::async_trait;

use super::errors::ApiError;

/// Environment variable holding the user's backend access token.
pub const ACCESS_TOKEN_ENV: &str = "CREATORLINK_ACCESS_TOKEN";

/// Trait for providing access tokens
///
/// This trait allows dependency injection and testing with mock providers.
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    /// Get a valid access token
    async fn access_token(&self) -> Result<String, ApiError>;
}

/// Provider handing out a token obtained elsewhere (environment, an incoming
/// request's `Authorization` header).
#[derive(Clone)]
pub struct StaticTokenProvider {
    token: String,
}

impl StaticTokenProvider {
    pub fn new(token: impl Into<String>) -> Self {
        Self { token: token.into() }
    }

    /// Read the token from [`ACCESS_TOKEN_ENV`].
    pub fn from_env() -> Result<Self, ApiError> {
        let token = std::env::var(ACCESS_TOKEN_ENV).map_err(|_| {
            ApiError::Auth(format!("{ACCESS_TOKEN_ENV} is not set; sign in to obtain a token"))
        })?;
        Ok(Self::new(token))
    }
}

impl std::fmt::Debug for StaticTokenProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticTokenProvider").field("token", &"<redacted>").finish()
    }
}

#[async_trait]
impl AccessTokenProvider for StaticTokenProvider {
    async fn access_token(&self) -> Result<String, ApiError> {
        let token = self.token.trim();
        if token.is_empty() {
            return Err(ApiError::Auth("access token is empty".into()));
        }
        Ok(token.to_string())
    }
}
