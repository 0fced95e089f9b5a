//! Static platform configuration
//!
//! Maps a platform name to the OAuth permissions the backend must request and
//! the way accounts on that platform are linked. This is a pure lookup table;
//! the backend catalog remains the source of truth for limits and status.

use creatorlink_domain::ConnectionType;

/// Permissions and connection type for one platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformConfig {
    pub name: &'static str,
    pub required_permissions: &'static [&'static str],
    pub connection_type: ConnectionType,
}

const PLATFORMS: &[PlatformConfig] = &[
    PlatformConfig {
        name: "instagram",
        required_permissions: &[
            "instagram_basic",
            "instagram_manage_insights",
            "instagram_content_publish",
            "pages_show_list",
            "pages_read_engagement",
            "business_management",
        ],
        connection_type: ConnectionType::FacebookGraph,
    },
    PlatformConfig {
        name: "facebook",
        required_permissions: &[
            "pages_show_list",
            "pages_read_engagement",
            "pages_manage_posts",
            "read_insights",
        ],
        connection_type: ConnectionType::FacebookGraph,
    },
    PlatformConfig {
        name: "tiktok",
        required_permissions: &["user.info.basic", "user.info.stats", "video.list"],
        connection_type: ConnectionType::Oauth2,
    },
    PlatformConfig {
        name: "youtube",
        required_permissions: &[
            "https://www.googleapis.com/auth/youtube.readonly",
            "https://www.googleapis.com/auth/yt-analytics.readonly",
        ],
        connection_type: ConnectionType::GoogleOauth,
    },
    PlatformConfig {
        name: "twitter",
        required_permissions: &["tweet.read", "users.read", "offline.access"],
        connection_type: ConnectionType::Oauth2Pkce,
    },
    PlatformConfig {
        name: "linkedin",
        required_permissions: &["openid", "profile", "w_member_social"],
        connection_type: ConnectionType::Oauth2,
    },
];

fn canonical_name(name: &str) -> String {
    let lower = name.trim().to_ascii_lowercase();
    match lower.as_str() {
        "x" => "twitter".to_string(),
        _ => lower,
    }
}

/// Resolve the configuration for a platform name (case-insensitive).
pub fn resolve(name: &str) -> Option<&'static PlatformConfig> {
    let name = canonical_name(name);
    PLATFORMS.iter().find(|config| config.name == name)
}

/// Required permissions followed by any extra scopes, without duplicates.
///
/// Unknown platforms contribute no required permissions.
pub fn requested_scopes(name: &str, additional: &[String]) -> Vec<String> {
    let mut scopes: Vec<String> = resolve(name)
        .map(|config| config.required_permissions.iter().map(|s| (*s).to_string()).collect())
        .unwrap_or_default();

    for scope in additional {
        let scope = scope.trim();
        if !scope.is_empty() && !scopes.iter().any(|existing| existing == scope) {
            scopes.push(scope.to_string());
        }
    }

    scopes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_case_insensitively_with_alias() {
        assert_eq!(resolve("Instagram").map(|c| c.name), Some("instagram"));
        assert_eq!(resolve("X").map(|c| c.name), Some("twitter"));
        assert_eq!(
            resolve("youtube").map(|c| c.connection_type),
            Some(ConnectionType::GoogleOauth)
        );
        assert!(resolve("myspace").is_none());
    }

    #[test]
    fn requested_scopes_merges_without_duplicates() {
        let extra = vec!["video.list".to_string(), "video.upload".to_string(), " ".to_string()];
        let scopes = requested_scopes("tiktok", &extra);
        assert_eq!(
            scopes,
            vec!["user.info.basic", "user.info.stats", "video.list", "video.upload"]
        );
    }

    #[test]
    fn unknown_platform_keeps_only_extras() {
        let scopes = requested_scopes("mastodon", &["read".to_string()]);
        assert_eq!(scopes, vec!["read"]);
    }
}
