//! `/api/v0/platforms` passthrough
//!
//! Forwards the caller's bearer token to the backend catalog and wraps the
//! result in the `{ success, data, total }` envelope the dashboard expects.

use std::str::FromStr;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use creatorlink_core::PlatformCatalog;
use creatorlink_domain::{Platform, PlatformStatus};
use creatorlink_infra::BackendClient;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub const PLATFORMS_ROUTE: &str = "/api/v0/platforms";

const NO_CACHE: &str = "no-store, no-cache, must-revalidate";

/// Produces a catalog acting on behalf of the request's token.
pub trait CatalogFactory: Send + Sync {
    fn for_token(&self, token: &str) -> Arc<dyn PlatformCatalog>;
}

impl CatalogFactory for BackendClient {
    fn for_token(&self, token: &str) -> Arc<dyn PlatformCatalog> {
        Arc::new(self.with_token(token))
    }
}

#[derive(Clone)]
pub struct PlatformsState {
    catalogs: Arc<dyn CatalogFactory>,
}

#[derive(Debug, Deserialize)]
struct PlatformsQuery {
    status: Option<String>,
}

#[derive(Debug, Serialize)]
struct Envelope {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Vec<Platform>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    total: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl Envelope {
    fn ok(platforms: Vec<Platform>) -> Self {
        let total = platforms.len();
        Self { success: true, data: Some(platforms), total: Some(total), error: None }
    }

    fn error(message: impl Into<String>) -> Self {
        Self { success: false, data: None, total: None, error: Some(message.into()) }
    }
}

pub fn router(catalogs: Arc<dyn CatalogFactory>) -> Router {
    Router::new()
        .route(
            PLATFORMS_ROUTE,
            get(list_platforms)
                .post(method_not_allowed)
                .put(method_not_allowed)
                .delete(method_not_allowed),
        )
        .with_state(PlatformsState { catalogs })
}

async fn list_platforms(
    State(state): State<PlatformsState>,
    headers: HeaderMap,
    Query(query): Query<PlatformsQuery>,
) -> Response {
    let Some(token) = bearer_token(&headers) else {
        return failure(StatusCode::UNAUTHORIZED, "Missing or invalid Authorization header");
    };

    let status = match query.status.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        None => None,
        Some(raw) => match PlatformStatus::from_str(raw) {
            Ok(status) => Some(status),
            Err(message) => return failure(StatusCode::BAD_REQUEST, message),
        },
    };

    match state.catalogs.for_token(token).list_platforms(status).await {
        Ok(platforms) => {
            debug!(count = platforms.len(), ?status, "platform catalog served");
            (
                StatusCode::OK,
                [(header::CACHE_CONTROL, NO_CACHE), (header::PRAGMA, "no-cache")],
                Json(Envelope::ok(platforms)),
            )
                .into_response()
        }
        Err(err) => {
            warn!(error = %err, "platform catalog request failed");
            failure(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
    }
}

async fn method_not_allowed() -> Response {
    failure(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
}

fn failure(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(Envelope::error(message))).into_response()
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    (!token.is_empty()).then_some(token)
}
