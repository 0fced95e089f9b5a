//! # CreatorLink Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - The shared HTTP client with retry for idempotent reads
//! - The backend REST client implementing the core ports
//! - The browser-process authorization window
//! - Configuration loading from the environment or files
//!
//! ## Architecture
//! - Implements traits defined in `creatorlink-core`
//! - Contains all "impure" code (I/O, processes, network)

pub mod api;
pub mod config;
pub mod errors;
pub mod http;
pub mod platform;

// Re-export commonly used items
pub use api::{AccessTokenProvider, ApiClient, ApiClientConfig, ApiError, BackendClient, StaticTokenProvider};
pub use errors::InfraError;
pub use http::{HttpClient, HttpClientBuilder};
pub use platform::BrowserProcessLauncher;
