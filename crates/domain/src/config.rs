//! Configuration structures
//!
//! Loaded by `creatorlink-infra::config` from the environment or a JSON/TOML
//! file. Every section has defaults so partial files are accepted.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_BACKEND_MAX_ATTEMPTS, DEFAULT_BACKEND_TIMEOUT_SECS, DEFAULT_BACKEND_URL,
    DEFAULT_BIND_ADDRESS, DEFAULT_MAX_POLL_ATTEMPTS, DEFAULT_POLL_INTERVAL_SECS,
    DEFAULT_POPUP_HEIGHT, DEFAULT_POPUP_WIDTH,
};
use crate::types::PopupSize;

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub oauth: OAuthFlowConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

/// Connection settings for the external backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendConfig {
    pub base_url: String,
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    /// Attempts for idempotent reads. Mutating calls are always sent once.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BACKEND_URL.to_string(),
            timeout_seconds: DEFAULT_BACKEND_TIMEOUT_SECS,
            max_attempts: DEFAULT_BACKEND_MAX_ATTEMPTS,
        }
    }
}

/// OAuth polling and authorization window settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OAuthFlowConfig {
    #[serde(default = "default_poll_interval")]
    pub poll_interval_seconds: u64,
    #[serde(default = "default_max_poll_attempts")]
    pub max_poll_attempts: u32,
    #[serde(default)]
    pub redirect_url: Option<String>,
    #[serde(default)]
    pub popup: PopupConfig,
}

impl Default for OAuthFlowConfig {
    fn default() -> Self {
        Self {
            poll_interval_seconds: DEFAULT_POLL_INTERVAL_SECS,
            max_poll_attempts: DEFAULT_MAX_POLL_ATTEMPTS,
            redirect_url: None,
            popup: PopupConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopupConfig {
    #[serde(default = "default_popup_width")]
    pub width: u32,
    #[serde(default = "default_popup_height")]
    pub height: u32,
    /// Browser executable; probed from the usual Chromium names when unset.
    #[serde(default)]
    pub browser_command: Option<String>,
}

impl PopupConfig {
    pub fn size(&self) -> PopupSize {
        PopupSize { width: self.width, height: self.height }
    }
}

impl Default for PopupConfig {
    fn default() -> Self {
        Self { width: DEFAULT_POPUP_WIDTH, height: DEFAULT_POPUP_HEIGHT, browser_command: None }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { bind_address: DEFAULT_BIND_ADDRESS.to_string() }
    }
}

fn default_timeout() -> u64 {
    DEFAULT_BACKEND_TIMEOUT_SECS
}

fn default_max_attempts() -> usize {
    DEFAULT_BACKEND_MAX_ATTEMPTS
}

fn default_poll_interval() -> u64 {
    DEFAULT_POLL_INTERVAL_SECS
}

fn default_max_poll_attempts() -> u32 {
    DEFAULT_MAX_POLL_ATTEMPTS
}

fn default_popup_width() -> u32 {
    DEFAULT_POPUP_WIDTH
}

fn default_popup_height() -> u32 {
    DEFAULT_POPUP_HEIGHT
}

fn default_bind_address() -> String {
    DEFAULT_BIND_ADDRESS.to_string()
}
