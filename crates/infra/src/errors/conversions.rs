//! Conversions from external infrastructure errors into domain errors.

use creatorlink_domain::CreatorLinkError;
use reqwest::Error as HttpError;
use serde_json::Error as JsonError;
use url::ParseError as UrlError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub CreatorLinkError);

impl From<InfraError> for CreatorLinkError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<CreatorLinkError> for InfraError {
    fn from(value: CreatorLinkError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoCreatorLinkError {
    fn into_creatorlink(self) -> CreatorLinkError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → CreatorLinkError */
/* -------------------------------------------------------------------------- */

impl IntoCreatorLinkError for HttpError {
    fn into_creatorlink(self) -> CreatorLinkError {
        if self.is_timeout() {
            return CreatorLinkError::Network("HTTP request timed out".into());
        }

        if self.is_connect() {
            return CreatorLinkError::Network("HTTP connection failure".into());
        }

        if self.is_decode() {
            return CreatorLinkError::Internal(format!("invalid backend response: {self}"));
        }

        if let Some(status) = self.status() {
            let code = status.as_u16();
            let message =
                format!("HTTP {} {}", code, status.canonical_reason().unwrap_or("unknown status"));

            return match code {
                401 | 403 => CreatorLinkError::Auth(message),
                404 => CreatorLinkError::NotFound(message),
                400..=499 if code != 429 => CreatorLinkError::InvalidInput(message),
                _ => CreatorLinkError::Network(message),
            };
        }

        CreatorLinkError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_creatorlink())
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json::Error → CreatorLinkError */
/* -------------------------------------------------------------------------- */

impl IntoCreatorLinkError for JsonError {
    fn into_creatorlink(self) -> CreatorLinkError {
        CreatorLinkError::Internal(format!(
            "malformed JSON at line {} column {}: {self}",
            self.line(),
            self.column()
        ))
    }
}

impl From<JsonError> for InfraError {
    fn from(value: JsonError) -> Self {
        InfraError(value.into_creatorlink())
    }
}

/* -------------------------------------------------------------------------- */
/* url::ParseError → CreatorLinkError */
/* -------------------------------------------------------------------------- */

impl IntoCreatorLinkError for UrlError {
    fn into_creatorlink(self) -> CreatorLinkError {
        CreatorLinkError::Config(format!("invalid backend URL: {self}"))
    }
}

impl From<UrlError> for InfraError {
    fn from(value: UrlError) -> Self {
        InfraError(value.into_creatorlink())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
