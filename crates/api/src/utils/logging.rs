use std::time::Duration;

use creatorlink_domain::CreatorLinkError;
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Selects the JSON formatter when set to `json`.
pub const LOG_FORMAT_ENV: &str = "CREATORLINK_LOG_FORMAT";

/// Install the global tracing subscriber.
///
/// Filtering follows `RUST_LOG` (default `info`). Output goes to stderr so
/// command results on stdout stay machine readable.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var(LOG_FORMAT_ENV).is_ok_and(|format| format.eq_ignore_ascii_case("json"));

    let registry = tracing_subscriber::registry().with(filter);
    let result = if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(true).with_writer(std::io::stderr))
            .try_init()
    };

    if let Err(err) = result {
        warn!(error = %err, "tracing subscriber already installed");
    }
}

/// Log the outcome of a command execution with structured fields.
///
/// # Parameters
/// * `command` - Logical command identifier (e.g. `"connections::refresh"`).
/// * `elapsed` - Duration the command execution took.
/// * `error` - The failure, if the command did not succeed.
///
/// Callers must avoid forwarding sensitive values in `command`.
#[inline]
pub fn log_command_execution(command: &str, elapsed: Duration, error: Option<&CreatorLinkError>) {
    let duration_ms = elapsed.as_millis() as u64;

    match error {
        None => info!(command, duration_ms, "command_execution_success"),
        Some(err) => warn!(
            command,
            duration_ms,
            error_type = error_label(err),
            error = %err,
            "command_execution_failure"
        ),
    }
}

/// Convert a `CreatorLinkError` into a stable label suitable for logging.
#[inline]
pub fn error_label(error: &CreatorLinkError) -> &'static str {
    match error {
        CreatorLinkError::Config(_) => "config",
        CreatorLinkError::Network(_) => "network",
        CreatorLinkError::Auth(_) => "auth",
        CreatorLinkError::NotFound(_) => "not_found",
        CreatorLinkError::InvalidInput(_) => "invalid_input",
        CreatorLinkError::Internal(_) => "internal",
        CreatorLinkError::PlatformNotConfigured(_) => "platform_not_configured",
        CreatorLinkError::PlatformInactive(_) => "platform_inactive",
        CreatorLinkError::ConnectionLimitReached(_) => "connection_limit_reached",
        CreatorLinkError::ConnectionInProgress(_) => "connection_in_progress",
        CreatorLinkError::OperationInProgress(_) => "operation_in_progress",
        CreatorLinkError::PopupBlocked(_) => "popup_blocked",
        CreatorLinkError::Cancelled(_) => "cancelled",
    }
}
