use std::time::Duration;

use creatorlink_domain::constants::{DEFAULT_BACKEND_MAX_ATTEMPTS, DEFAULT_BACKEND_TIMEOUT_SECS};
use creatorlink_domain::CreatorLinkError;
use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Response};
use tracing::{debug, warn};

use crate::errors::InfraError;

/// HTTP client with timeout support and retries for idempotent reads.
///
/// Only `GET` requests are retried. Mutating requests are sent exactly once so
/// a slow backend cannot apply the same change twice.
#[derive(Clone)]
pub struct HttpClient {
    client: ReqwestClient,
    max_attempts: usize,
    base_backoff: Duration,
}

impl HttpClient {
    /// Start building a new HTTP client.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Create a request builder using the underlying reqwest client.
    pub fn request<U>(&self, method: Method, url: U) -> RequestBuilder
    where
        U: reqwest::IntoUrl,
    {
        self.client.request(method, url)
    }

    /// Execute the provided request builder, retrying reads on 5xx and
    /// connection failures.
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response, CreatorLinkError> {
        let mut attempts = self.max_attempts.max(1);
        let mut attempt = 0;

        loop {
            attempt += 1;
            let request = builder
                .try_clone()
                .ok_or_else(|| {
                    CreatorLinkError::Internal(
                        "request body cannot be cloned; buffer the body to enable retries".into(),
                    )
                })?
                .build()
                .map_err(infra_error)?;

            if attempt == 1 && !is_retryable_method(request.method()) {
                attempts = 1;
            }
            let method = request.method().clone();
            let url = request.url().clone();
            debug!(attempt, %method, %url, "sending HTTP request");

            match self.client.execute(request).await {
                Ok(response) if response.status().is_server_error() && attempt < attempts => {
                    warn!(attempt, %method, %url, status = %response.status(), "server error, retrying read");
                }
                Ok(response) => {
                    debug!(attempt, %method, %url, status = %response.status(), "received HTTP response");
                    return Ok(response);
                }
                Err(err) if attempt < attempts && should_retry_error(&err) => {
                    warn!(attempt, %method, %url, error = %err, "request failed, retrying read");
                }
                Err(err) => {
                    debug!(attempt, %method, %url, error = %err, "HTTP request failed");
                    return Err(infra_error(err));
                }
            }

            self.sleep_with_backoff(attempt).await;
        }
    }

    fn backoff_delay(&self, retry_number: usize) -> Duration {
        let shift = retry_number.saturating_sub(1).min(8) as u32;
        let multiplier = 1u32 << shift;
        self.base_backoff.saturating_mul(multiplier)
    }

    async fn sleep_with_backoff(&self, retry_number: usize) {
        let delay = self.backoff_delay(retry_number);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
    max_attempts: usize,
    base_backoff: Duration,
    user_agent: Option<String>,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_BACKEND_TIMEOUT_SECS),
            max_attempts: DEFAULT_BACKEND_MAX_ATTEMPTS,
            base_backoff: Duration::from_millis(200),
            user_agent: None,
        }
    }
}

impl HttpClientBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Configure the total number of attempts for reads (initial try + retries).
    pub fn max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    pub fn base_backoff(mut self, backoff: Duration) -> Self {
        self.base_backoff = backoff;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    pub fn build(self) -> Result<HttpClient, CreatorLinkError> {
        let mut builder = ReqwestClient::builder().timeout(self.timeout).no_proxy();

        if let Some(agent) = self.user_agent {
            builder = builder.user_agent(agent);
        }

        let client = builder.build().map_err(infra_error)?;

        Ok(HttpClient {
            client,
            max_attempts: self.max_attempts.max(1),
            base_backoff: self.base_backoff,
        })
    }
}

fn infra_error(err: reqwest::Error) -> CreatorLinkError {
    CreatorLinkError::from(InfraError::from(err))
}

fn is_retryable_method(method: &Method) -> bool {
    *method == Method::GET
}

fn should_retry_error(err: &reqwest::Error) -> bool {
    err.is_timeout() || err.is_connect() || err.is_request()
}
