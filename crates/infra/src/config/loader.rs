//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If `CREATORLINK_BACKEND_URL` is not set, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `CREATORLINK_BACKEND_URL`: Backend base URL (required for env loading)
//! - `CREATORLINK_BACKEND_TIMEOUT`: Request timeout in seconds
//! - `CREATORLINK_BACKEND_MAX_ATTEMPTS`: Attempts for idempotent reads
//! - `CREATORLINK_POLL_INTERVAL`: OAuth status poll interval in seconds
//! - `CREATORLINK_MAX_POLL_ATTEMPTS`: Polls before a flow times out
//! - `CREATORLINK_REDIRECT_URL`: Post-authorization redirect URL
//! - `CREATORLINK_BROWSER`: Browser used for the authorization window
//! - `CREATORLINK_POPUP_WIDTH` / `CREATORLINK_POPUP_HEIGHT`: Window size
//! - `CREATORLINK_BIND_ADDRESS`: Listen address for `serve`
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.json` or `./config.toml` (current working directory)
//! 2. `./creatorlink.json` or `./creatorlink.toml` (current working directory)
//! 3. `../config.json` or `../config.toml` (parent directory)
//! 4. `../../config.json` or `../../config.toml` (grandparent directory)
//! 5. Relative to executable location

use std::path::{Path, PathBuf};
use std::str::FromStr;

use creatorlink_domain::{
    BackendConfig, Config, CreatorLinkError, OAuthFlowConfig, PopupConfig, Result, ServerConfig,
};

/// Required for environment loading; when unset `load` reads a file instead.
pub const BACKEND_URL_ENV: &str = "CREATORLINK_BACKEND_URL";

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If the backend URL is
/// missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `CreatorLinkError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
/// - Required fields are missing
pub fn load() -> Result<Config> {
    // File fallback only when the backend URL is absent.
    if env_optional(BACKEND_URL_ENV).is_none() {
        tracing::debug!("{BACKEND_URL_ENV} not set, trying config file");
        return load_from_file(None);
    }

    let config = load_from_env()?;
    tracing::info!("Configuration loaded from environment variables");
    Ok(config)
}

/// Load configuration from environment variables
///
/// `CREATORLINK_BACKEND_URL` must be present; every other variable falls
/// back to its default.
///
/// # Errors
/// Returns `CreatorLinkError::Config` if the backend URL is missing or a
/// variable has an invalid value.
pub fn load_from_env() -> Result<Config> {
    let defaults = Config::default();

    let backend = BackendConfig {
        base_url: env_var(BACKEND_URL_ENV)?,
        timeout_seconds: env_parse("CREATORLINK_BACKEND_TIMEOUT", defaults.backend.timeout_seconds)?,
        max_attempts: env_parse("CREATORLINK_BACKEND_MAX_ATTEMPTS", defaults.backend.max_attempts)?,
    };

    let oauth = OAuthFlowConfig {
        poll_interval_seconds: env_parse(
            "CREATORLINK_POLL_INTERVAL",
            defaults.oauth.poll_interval_seconds,
        )?,
        max_poll_attempts: env_parse(
            "CREATORLINK_MAX_POLL_ATTEMPTS",
            defaults.oauth.max_poll_attempts,
        )?,
        redirect_url: env_optional("CREATORLINK_REDIRECT_URL"),
        popup: PopupConfig {
            width: env_parse("CREATORLINK_POPUP_WIDTH", defaults.oauth.popup.width)?,
            height: env_parse("CREATORLINK_POPUP_HEIGHT", defaults.oauth.popup.height)?,
            browser_command: env_optional("CREATORLINK_BROWSER"),
        },
    };

    let server = ServerConfig {
        bind_address: env_optional("CREATORLINK_BIND_ADDRESS")
            .unwrap_or(defaults.server.bind_address),
    };

    validate(Config { backend, oauth, server })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `CreatorLinkError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(CreatorLinkError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            CreatorLinkError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| CreatorLinkError::Config(format!("Failed to read config file: {}", e)))?;

    validate(parse_config(&contents, &config_path)?)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| CreatorLinkError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| CreatorLinkError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(CreatorLinkError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Reject values that would make the client unusable.
fn validate(config: Config) -> Result<Config> {
    url::Url::parse(&config.backend.base_url).map_err(|e| {
        CreatorLinkError::Config(format!("Invalid backend URL {}: {}", config.backend.base_url, e))
    })?;

    if config.backend.timeout_seconds == 0 {
        return Err(CreatorLinkError::Config("Backend timeout must be at least 1 second".into()));
    }
    if config.oauth.poll_interval_seconds == 0 {
        return Err(CreatorLinkError::Config("Poll interval must be at least 1 second".into()));
    }
    if config.oauth.max_poll_attempts == 0 {
        return Err(CreatorLinkError::Config("Max poll attempts must be at least 1".into()));
    }
    if config.oauth.popup.width == 0 || config.oauth.popup.height == 0 {
        return Err(CreatorLinkError::Config(format!(
            "Popup size must be non-zero, got {}x{}",
            config.oauth.popup.width, config.oauth.popup.height
        )));
    }

    Ok(config)
}

/// Probe multiple paths for configuration files
///
/// Searches for config files in the following locations (in order):
/// 1. Current working directory (`./config.{json,toml}`,
///    `./creatorlink.{json,toml}`)
/// 2. Parent directories (up to 2 levels)
/// 3. Relative to executable location
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(candidates_in(&cwd));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(candidates_in(exe_dir));
        }
    }

    // Return first existing candidate
    candidates.into_iter().find(|path| path.exists())
}

fn candidates_in(dir: &Path) -> Vec<PathBuf> {
    vec![
        dir.join("config.json"),
        dir.join("config.toml"),
        dir.join("creatorlink.json"),
        dir.join("creatorlink.toml"),
        dir.join("../config.json"),
        dir.join("../config.toml"),
        dir.join("../../config.json"),
        dir.join("../../config.toml"),
    ]
}

/// Get required environment variable
///
/// # Errors
/// Returns `CreatorLinkError::Config` if the variable is not set.
fn env_var(key: &str) -> Result<String> {
    env_optional(key).ok_or_else(|| {
        CreatorLinkError::Config(format!("Missing required environment variable: {}", key))
    })
}

/// Non-empty environment variable, if set.
fn env_optional(key: &str) -> Option<String> {
    std::env::var(key).ok().map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

/// Parse an optional environment variable, using `default` when unset.
fn env_parse<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env_optional(key) {
        None => Ok(default),
        Some(raw) => raw
            .parse::<T>()
            .map_err(|e| CreatorLinkError::Config(format!("Invalid value for {}: {}", key, e))),
    }
}
