//! In-progress OAuth session

use creatorlink_domain::OAuthInitiation;
use uuid::Uuid;

use super::popup::PopupHandle;

/// State of one OAuth flow between initiation and its terminal outcome.
///
/// Dropping the session closes the authorization window.
pub struct OAuthSession {
    pub id: Uuid,
    /// Opaque token correlating status polls with the flow.
    pub state: String,
    pub platform: String,
    pub authorization_url: String,
    pub popup: PopupHandle,
}

impl OAuthSession {
    pub fn new(initiation: OAuthInitiation, popup: PopupHandle) -> Self {
        Self {
            id: Uuid::now_v7(),
            state: initiation.state,
            platform: initiation.platform,
            authorization_url: initiation.authorization_url,
            popup,
        }
    }
}
