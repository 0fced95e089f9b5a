//! HTTP routes served by `creatorlink serve`

pub mod platforms;

use std::sync::Arc;

use axum::Router;

pub use platforms::{CatalogFactory, PlatformsState};

/// Router with every in-repo route mounted.
pub fn router(catalogs: Arc<dyn CatalogFactory>) -> Router {
    Router::new().merge(platforms::router(catalogs))
}
