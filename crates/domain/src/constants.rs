//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

// OAuth polling
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;
pub const DEFAULT_MAX_POLL_ATTEMPTS: u32 = 60;

// Authorization window
pub const DEFAULT_POPUP_WIDTH: u32 = 600;
pub const DEFAULT_POPUP_HEIGHT: u32 = 700;

// Backend client
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:3001/api/v1";
pub const DEFAULT_BACKEND_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_BACKEND_MAX_ATTEMPTS: usize = 3;

// Local server
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:4100";

/// Automation failures at or above this count flag a connection for attention.
pub const AUTOMATION_ERROR_THRESHOLD: u32 = 3;

/// Message used when the backend reports a failed flow without details.
pub const GENERIC_OAUTH_FAILURE: &str = "OAuth authorization failed";
