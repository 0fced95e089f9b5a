//! API client with authentication and status mapping
//!
//! Builds backend URLs, attaches the bearer token and turns non-success
//! responses into [`ApiError`]s. Retries of idempotent reads happen in the
//! underlying [`HttpClient`].

use std::sync::Arc;
use std::time::Duration;

use creatorlink_domain::constants::{
    DEFAULT_BACKEND_MAX_ATTEMPTS, DEFAULT_BACKEND_TIMEOUT_SECS, DEFAULT_BACKEND_URL,
};
use creatorlink_domain::{BackendConfig, CreatorLinkError};
use reqwest::{Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, instrument};

use super::auth::AccessTokenProvider;
use super::errors::ApiError;
use crate::http::HttpClient;

/// Configuration for API client
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Base URL for API (e.g., "https://api.creatorlink.app/api/v1")
    pub base_url: String,
    /// Timeout for a single request, retries included
    pub timeout: Duration,
    /// Attempts for idempotent reads
    pub max_attempts: usize,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BACKEND_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_BACKEND_TIMEOUT_SECS),
            max_attempts: DEFAULT_BACKEND_MAX_ATTEMPTS,
        }
    }
}

impl From<&BackendConfig> for ApiClientConfig {
    fn from(config: &BackendConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            timeout: Duration::from_secs(config.timeout_seconds),
            max_attempts: config.max_attempts,
        }
    }
}

/// Authenticated JSON client for the backend
#[derive(Clone)]
pub struct ApiClient {
    http_client: Arc<HttpClient>,
    auth: Arc<dyn AccessTokenProvider>,
    config: ApiClientConfig,
}

impl ApiClient {
    /// Create a new API client
    ///
    /// # Errors
    ///
    /// Returns error if the base URL is invalid or the HttpClient cannot be
    /// created
    pub fn new(
        config: ApiClientConfig,
        auth: Arc<dyn AccessTokenProvider>,
    ) -> Result<Self, ApiError> {
        url::Url::parse(&config.base_url)
            .map_err(|e| ApiError::Config(format!("invalid base URL {}: {}", config.base_url, e)))?;

        let http_client = HttpClient::builder()
            .timeout(config.timeout)
            .max_attempts(config.max_attempts)
            .user_agent(concat!("creatorlink/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Config(format!("Failed to build HttpClient: {}", e)))?;

        Ok(Self { http_client: Arc::new(http_client), auth, config })
    }

    /// Same connection pool, different credentials.
    pub fn with_auth(&self, auth: Arc<dyn AccessTokenProvider>) -> Self {
        Self { http_client: self.http_client.clone(), auth, config: self.config.clone() }
    }

    /// Execute a GET request
    #[instrument(skip(self), fields(path = %path))]
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.get_with_query(path, &[]).await
    }

    /// Execute a GET request with query parameters
    #[instrument(skip(self, query), fields(path = %path))]
    pub async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let response = self.execute(Method::GET, path, query, None).await?;
        Self::decode(response).await
    }

    /// Execute a POST request with a JSON body
    #[instrument(skip(self, body), fields(path = %path))]
    pub async fn post<T: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<R, ApiError> {
        let body = Self::encode(body)?;
        let response = self.execute(Method::POST, path, &[], Some(body)).await?;
        Self::decode(response).await
    }

    /// Execute a POST request without a body
    #[instrument(skip(self), fields(path = %path))]
    pub async fn post_empty<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        let response = self.execute(Method::POST, path, &[], None).await?;
        Self::decode(response).await
    }

    /// Execute a PATCH request with a JSON body
    #[instrument(skip(self, body), fields(path = %path))]
    pub async fn patch<T: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<R, ApiError> {
        let body = Self::encode(body)?;
        let response = self.execute(Method::PATCH, path, &[], Some(body)).await?;
        Self::decode(response).await
    }

    /// Execute a DELETE request, ignoring any response body
    #[instrument(skip(self), fields(path = %path))]
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.execute(Method::DELETE, path, &[], None).await?;
        Ok(())
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<serde_json::Value>,
    ) -> Result<Response, ApiError> {
        let url = self.url(path);
        let token = self.auth.access_token().await?;

        debug!(%method, url = %url, "backend request");

        let mut request = self
            .http_client
            .request(method, &url)
            .bearer_auth(token)
            .header("Accept", "application/json");
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        let timeout = self.config.timeout;
        let response = match tokio::time::timeout(timeout, self.http_client.send(request)).await {
            Ok(Ok(response)) => response,
            Ok(Err(err)) => return Err(Self::map_domain_error(err)),
            Err(_) => return Err(ApiError::Timeout(timeout)),
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Self::map_status_error(status, &url, &body));
        }

        Ok(response)
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path.trim_start_matches('/'))
    }

    fn encode<T: Serialize>(body: &T) -> Result<serde_json::Value, ApiError> {
        serde_json::to_value(body)
            .map_err(|e| ApiError::Client(format!("Failed to serialize body: {}", e)))
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::Network(format!("Failed to read response: {}", e)))?;

        // 204/205 and empty bodies deserialize from null so `()` works.
        if status == StatusCode::NO_CONTENT
            || status == StatusCode::RESET_CONTENT
            || text.trim().is_empty()
        {
            return serde_json::from_value(serde_json::Value::Null).map_err(|_| {
                ApiError::Client(format!(
                    "Empty response ({}), but a body was expected",
                    status.as_u16()
                ))
            });
        }

        serde_json::from_str(&text)
            .map_err(|e| ApiError::Server(format!("Failed to parse response: {}", e)))
    }

    fn map_status_error(status: StatusCode, url: &str, body: &str) -> ApiError {
        let detail = error_detail(body);
        let message = if detail.is_empty() {
            format!("{} returned status {}", url, status)
        } else {
            format!("{} returned status {}: {}", url, status, detail)
        };

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            ApiError::Auth(message)
        } else if status == StatusCode::NOT_FOUND {
            ApiError::NotFound(message)
        } else if status == StatusCode::TOO_MANY_REQUESTS {
            ApiError::RateLimit(message)
        } else if status.is_server_error() {
            ApiError::Server(message)
        } else if status.is_client_error() {
            ApiError::Client(message)
        } else {
            ApiError::Network(message)
        }
    }

    fn map_domain_error(err: CreatorLinkError) -> ApiError {
        ApiError::from(err)
    }
}

/// Prefer the backend's `message`/`error` field over the raw body.
fn error_detail(body: &str) -> String {
    let trimmed = body.trim();
    serde_json::from_str::<serde_json::Value>(trimmed)
        .ok()
        .and_then(|value| {
            ["message", "error"]
                .iter()
                .find_map(|key| value.get(*key).and_then(|v| v.as_str()).map(str::to_string))
        })
        .unwrap_or_else(|| trimmed.to_string())
}
