//! Platform catalog types
//!
//! Platforms are static catalog entries managed by administrators on the
//! backend. The client never mutates them.

use serde::{Deserialize, Serialize};

/// How an account on a platform is linked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConnectionType {
    /// Facebook Login for Business (Instagram professional accounts, Pages).
    FacebookGraph,
    /// Google OAuth 2.0 with offline access.
    GoogleOauth,
    /// Plain authorization-code OAuth 2.0.
    Oauth2,
    /// Authorization-code OAuth 2.0 with PKCE.
    Oauth2Pkce,
}

crate::impl_domain_status_conversions!(ConnectionType {
    FacebookGraph => "facebook_graph",
    GoogleOauth => "google_oauth",
    Oauth2 => "oauth2",
    Oauth2Pkce => "oauth2_pkce",
});

/// Administrative status of a platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlatformStatus {
    #[default]
    Active,
    Inactive,
}

crate::impl_domain_status_conversions!(PlatformStatus {
    Active => "active",
    Inactive => "inactive",
});

impl PlatformStatus {
    /// Representation used on the wire and in query strings.
    pub fn as_wire(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Inactive => "INACTIVE",
        }
    }
}

/// A social platform accounts can be linked to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Platform {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub max_accounts_allowed: u32,
    #[serde(default)]
    pub required_permissions: Vec<String>,
    pub connection_type: ConnectionType,
    #[serde(default)]
    pub status: PlatformStatus,
    /// Identifier of the platform inside the backend's work-platform registry.
    /// Falls back to `id` when the backend does not distinguish the two.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_platform_id: Option<String>,
}

impl Platform {
    pub fn is_active(&self) -> bool {
        self.status == PlatformStatus::Active
    }

    /// Identifier sent when initiating an OAuth flow.
    pub fn initiation_id(&self) -> &str {
        self.work_platform_id.as_deref().unwrap_or(&self.id)
    }

    /// Whether `name` refers to this platform (matches name or slug).
    pub fn matches_name(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name) || self.slug.eq_ignore_ascii_case(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_backend_payload() {
        let json = r#"{
            "id": "plt_ig",
            "name": "Instagram",
            "slug": "instagram",
            "maxAccountsAllowed": 3,
            "requiredPermissions": ["instagram_basic"],
            "connectionType": "FACEBOOK_GRAPH",
            "status": "INACTIVE",
            "workPlatformId": "wp-9"
        }"#;

        let platform: Platform = serde_json::from_str(json).unwrap();
        assert_eq!(platform.max_accounts_allowed, 3);
        assert_eq!(platform.connection_type, ConnectionType::FacebookGraph);
        assert!(!platform.is_active());
        assert_eq!(platform.initiation_id(), "wp-9");
        assert!(platform.matches_name("INSTAGRAM"));
    }

    #[test]
    fn status_defaults_to_active_and_id_is_fallback() {
        let json = r#"{
            "id": "plt_tt",
            "name": "TikTok",
            "slug": "tiktok",
            "maxAccountsAllowed": 1,
            "connectionType": "OAUTH2"
        }"#;

        let platform: Platform = serde_json::from_str(json).unwrap();
        assert!(platform.is_active());
        assert!(platform.required_permissions.is_empty());
        assert_eq!(platform.initiation_id(), "plt_tt");
        assert_eq!(PlatformStatus::Inactive.as_wire(), "INACTIVE");
    }
}
