//! # CreatorLink Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Port/adapter interfaces (traits) for the backend and the authorization
//!   window
//! - The cached connection store and lifecycle operations
//! - OAuth initiation, popup supervision and status polling
//!
//! ## Architecture Principles
//! - Only depends on `creatorlink-domain`
//! - No HTTP or platform code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod connections;
pub mod oauth;
pub mod platforms;

// Re-export specific items to avoid ambiguity
pub use connections::ports::{Confirmation, ConnectionsBackend};
pub use connections::{ConnectionService, ConnectionStore, InFlightGuard};
pub use oauth::ports::{AuthWindow, OAuthBackend, PopupLauncher};
pub use oauth::{
    ConnectFlow, OAuthInitiator, OAuthSession, PollerConfig, PopupDriver, PopupHandle,
    StatusPoller,
};
pub use platforms::ports::PlatformCatalog;
pub use platforms::resolver::{self as platform_config, PlatformConfig};
