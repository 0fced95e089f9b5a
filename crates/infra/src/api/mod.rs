//! CreatorLink backend REST client
//!
//! Typed access to the social-connection and platform endpoints of the
//! backend. All requests carry a bearer token supplied by an
//! [`AccessTokenProvider`].
//!
//! # Architecture
//!
//! - Uses the shared [`HttpClient`](crate::http::HttpClient) (no direct reqwest
//!   calls)
//! - [`ApiClient`] owns URL building, auth headers and status mapping
//! - [`BackendClient`] implements the core ports on top of it

pub mod auth;
pub mod backend;
pub mod client;
pub mod errors;

pub use auth::{AccessTokenProvider, StaticTokenProvider, ACCESS_TOKEN_ENV};
pub use backend::BackendClient;
pub use client::{ApiClient, ApiClientConfig};
pub use errors::ApiError;
