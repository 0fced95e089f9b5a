//! Integration tests for the `/api/v0/platforms` router
//!
//! Requests go through `tower::ServiceExt::oneshot`; the catalog is an
//! in-memory factory that records the token each request carried.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use creatorlink_core::PlatformCatalog;
use creatorlink_domain::{ConnectionType, CreatorLinkError, Platform, PlatformStatus, Result};
use creatorlink_lib::routes::{self, CatalogFactory};
use serde_json::Value;
use tower::ServiceExt;

#[derive(Default)]
struct RecordingCatalogs {
    tokens: Mutex<Vec<String>>,
    filters: Arc<Mutex<Vec<Option<PlatformStatus>>>>,
    fail: bool,
}

struct Catalog {
    filters: Arc<Mutex<Vec<Option<PlatformStatus>>>>,
    fail: bool,
}

#[async_trait]
impl PlatformCatalog for Catalog {
    async fn list_platforms(&self, status: Option<PlatformStatus>) -> Result<Vec<Platform>> {
        self.filters.lock().unwrap().push(status);
        if self.fail {
            return Err(CreatorLinkError::Network("backend unavailable".into()));
        }
        Ok(vec![platform("plt_ig", "Instagram"), platform("plt_tt", "TikTok")])
    }

    async fn find_platform_by_name(&self, _name: &str) -> Result<Option<Platform>> {
        Ok(None)
    }
}

impl CatalogFactory for RecordingCatalogs {
    fn for_token(&self, token: &str) -> Arc<dyn PlatformCatalog> {
        self.tokens.lock().unwrap().push(token.to_string());
        Arc::new(Catalog { filters: Arc::clone(&self.filters), fail: self.fail })
    }
}

fn platform(id: &str, name: &str) -> Platform {
    Platform {
        id: id.into(),
        name: name.into(),
        slug: name.to_lowercase(),
        max_accounts_allowed: 1,
        required_permissions: vec![],
        connection_type: ConnectionType::Oauth2,
        status: PlatformStatus::Active,
        work_platform_id: None,
    }
}

fn app(catalogs: &Arc<RecordingCatalogs>) -> Router {
    routes::router(Arc::clone(catalogs) as Arc<dyn CatalogFactory>)
}

fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(Method::GET).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn returns_envelope_with_no_cache_headers() {
    let catalogs = Arc::new(RecordingCatalogs::default());

    let response = app(&catalogs).oneshot(get("/api/v0/platforms", Some("user-token"))).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CACHE_CONTROL],
        "no-store, no-cache, must-revalidate"
    );
    assert_eq!(response.headers()[header::PRAGMA], "no-cache");

    let body = json_body(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["total"], 2);
    assert_eq!(body["data"][0]["name"], "Instagram");
    assert_eq!(body["data"][1]["maxAccountsAllowed"], 1);

    assert_eq!(*catalogs.tokens.lock().unwrap(), vec!["user-token".to_string()]);
    assert_eq!(*catalogs.filters.lock().unwrap(), vec![None]);
}

#[tokio::test]
async fn forwards_status_filter() {
    let catalogs = Arc::new(RecordingCatalogs::default());

    let response =
        app(&catalogs).oneshot(get("/api/v0/platforms?status=INACTIVE", Some("t"))).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(*catalogs.filters.lock().unwrap(), vec![Some(PlatformStatus::Inactive)]);
}

#[tokio::test]
async fn rejects_unknown_status_filter() {
    let catalogs = Arc::new(RecordingCatalogs::default());

    let response =
        app(&catalogs).oneshot(get("/api/v0/platforms?status=archived", Some("t"))).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["success"], false);
    assert!(catalogs.filters.lock().unwrap().is_empty());
}

#[tokio::test]
async fn missing_token_is_unauthorized() {
    let catalogs = Arc::new(RecordingCatalogs::default());

    let response = app(&catalogs).oneshot(get("/api/v0/platforms", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = json_body(response).await;
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("Authorization"));
    assert!(catalogs.tokens.lock().unwrap().is_empty());
}

#[tokio::test]
async fn non_bearer_scheme_is_unauthorized() {
    let catalogs = Arc::new(RecordingCatalogs::default());
    let request = Request::builder()
        .uri("/api/v0/platforms")
        .header(header::AUTHORIZATION, "Basic dXNlcjpwYXNz")
        .body(Body::empty())
        .unwrap();

    let response = app(&catalogs).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn catalog_failure_is_internal_error() {
    let catalogs = Arc::new(RecordingCatalogs { fail: true, ..Default::default() });

    let response = app(&catalogs).oneshot(get("/api/v0/platforms", Some("t"))).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await;
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("backend unavailable"));
}

#[tokio::test]
async fn mutating_methods_are_not_allowed() {
    for method in [Method::POST, Method::PUT, Method::DELETE] {
        let catalogs = Arc::new(RecordingCatalogs::default());
        let request = Request::builder()
            .method(method.clone())
            .uri("/api/v0/platforms")
            .header(header::AUTHORIZATION, "Bearer t")
            .body(Body::empty())
            .unwrap();

        let response = app(&catalogs).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED, "{method}");
        let body = json_body(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Method not allowed");
        assert!(catalogs.tokens.lock().unwrap().is_empty());
    }
}
