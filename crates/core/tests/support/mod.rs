//! Shared test helpers for `creatorlink-core` integration tests.
//!
//! In-memory stand-ins for the backend and the authorization window so the
//! flow tests can script exactly what each poll returns.

#![allow(dead_code)]

pub mod backend;
pub mod popup;

use chrono::Utc;
use creatorlink_domain::{ConnectionType, Platform, PlatformStatus, SocialConnection};

pub fn platform(id: &str, name: &str, max_accounts: u32) -> Platform {
    Platform {
        id: id.to_string(),
        name: name.to_string(),
        slug: name.to_lowercase(),
        max_accounts_allowed: max_accounts,
        required_permissions: Vec::new(),
        connection_type: ConnectionType::Oauth2,
        status: PlatformStatus::Active,
        work_platform_id: Some(format!("wp-{id}")),
    }
}

pub fn connection(id: &str, platform_id: &str) -> SocialConnection {
    SocialConnection {
        id: id.to_string(),
        platform_id: platform_id.to_string(),
        platform_username: format!("{id}-handle"),
        display_name: Some(format!("Creator {id}")),
        is_active: true,
        expires_at: None,
        last_oauth_check_at: None,
        automation_error_count: 0,
        automation: None,
        created_at: Utc::now(),
    }
}
