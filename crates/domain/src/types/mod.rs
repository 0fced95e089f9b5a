//! Domain types and models

pub mod connection;
pub mod oauth;
pub mod platform;

pub use connection::{AutomationSettings, ConnectionOperation, SocialConnection};
pub use oauth::{
    InitiateConnectionRequest, OAuthInitiation, OAuthOutcome, OAuthStatus, OAuthStatusKind,
    PopupSize,
};
pub use platform::{ConnectionType, Platform, PlatformStatus};
