//! Social connection types
//!
//! A social connection is a linked account on a platform. The backend owns
//! the record; the client keeps a cached copy that it only mutates after the
//! backend confirmed a change.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::AUTOMATION_ERROR_THRESHOLD;

/// Automation settings attached to a connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutomationSettings {
    pub enabled: bool,
    #[serde(default)]
    pub last_use_at: Option<DateTime<Utc>>,
}

/// Linked social account as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialConnection {
    pub id: String,
    pub platform_id: String,
    pub platform_username: String,
    #[serde(default)]
    pub display_name: Option<String>,
    pub is_active: bool,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(default, rename = "lastOAuthCheckAt")]
    pub last_oauth_check_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub automation_error_count: u32,
    #[serde(default)]
    pub automation: Option<AutomationSettings>,
    pub created_at: DateTime<Utc>,
}

impl SocialConnection {
    pub fn automation_enabled(&self) -> bool {
        self.automation.as_ref().is_some_and(|a| a.enabled)
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires| expires <= now)
    }

    /// Active connections that need the user to reconnect or check automation.
    pub fn needs_attention(&self, now: DateTime<Utc>) -> bool {
        self.is_active
            && (self.is_expired(now) || self.automation_error_count >= AUTOMATION_ERROR_THRESHOLD)
    }

    /// Record a confirmed token refresh.
    pub fn mark_refreshed(&mut self, at: DateTime<Utc>) {
        self.last_oauth_check_at = Some(at);
        self.is_active = true;
    }

    /// Record a confirmed automation toggle.
    pub fn set_automation(&mut self, enabled: bool) {
        match self.automation.as_mut() {
            Some(settings) => settings.enabled = enabled,
            None => self.automation = Some(AutomationSettings { enabled, last_use_at: None }),
        }
    }

    /// Label used in prompts and log lines.
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.platform_username)
    }
}

/// Lifecycle operation that can be in flight for a single connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionOperation {
    Refresh,
    ToggleAutomation,
    Disconnect,
}

crate::impl_domain_status_conversions!(ConnectionOperation {
    Refresh => "refresh",
    ToggleAutomation => "toggle_automation",
    Disconnect => "disconnect",
});

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn connection() -> SocialConnection {
        SocialConnection {
            id: "conn-1".into(),
            platform_id: "plt_ig".into(),
            platform_username: "maker".into(),
            display_name: None,
            is_active: true,
            expires_at: None,
            last_oauth_check_at: None,
            automation_error_count: 0,
            automation: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn deserializes_oauth_check_field_name() {
        let json = r#"{
            "id": "c1",
            "platformId": "p1",
            "platformUsername": "user",
            "isActive": false,
            "lastOAuthCheckAt": "2024-05-01T10:00:00Z",
            "automation": { "enabled": true },
            "createdAt": "2024-04-01T10:00:00Z"
        }"#;

        let conn: SocialConnection = serde_json::from_str(json).unwrap();
        assert!(conn.last_oauth_check_at.is_some());
        assert!(conn.automation_enabled());
        assert_eq!(conn.automation_error_count, 0);
        assert_eq!(conn.label(), "user");
    }

    #[test]
    fn set_automation_creates_settings_when_missing() {
        let mut conn = connection();
        assert!(!conn.automation_enabled());
        conn.set_automation(true);
        assert!(conn.automation_enabled());
        conn.set_automation(false);
        assert!(!conn.automation_enabled());
    }

    #[test]
    fn needs_attention_when_expired_or_failing() {
        let now = Utc::now();
        let mut conn = connection();
        assert!(!conn.needs_attention(now));

        conn.expires_at = Some(now - Duration::minutes(1));
        assert!(conn.needs_attention(now));

        conn.expires_at = None;
        conn.automation_error_count = AUTOMATION_ERROR_THRESHOLD;
        assert!(conn.needs_attention(now));

        conn.is_active = false;
        assert!(!conn.needs_attention(now));
    }

    #[test]
    fn mark_refreshed_reactivates() {
        let mut conn = connection();
        conn.is_active = false;
        let at = Utc::now();
        conn.mark_refreshed(at);
        assert!(conn.is_active);
        assert_eq!(conn.last_oauth_check_at, Some(at));
    }
}
