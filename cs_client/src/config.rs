//! Client configuration management.
//!
//! Consolidates all environment variable reads and provides validated configuration.

use std::path::PathBuf;
use std::time::Duration;

/// Backend base URL used when nothing else is configured
pub const DEFAULT_API_URL: &str = "http://localhost:3000/api";
/// Local storage file used when nothing else is configured
pub const DEFAULT_STORAGE_PATH: &str = ".car_store/storage.json";

/// Complete client configuration loaded from environment variables
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Backend base URL, including the `/api` prefix
    pub api_url: String,
    /// File backing the client's durable key-value storage
    pub storage_path: PathBuf,
    /// Per-request timeout; `None` waits indefinitely
    pub request_timeout: Option<Duration>,
    /// How often the favorites badge is refreshed in the background
    pub favorites_refresh: Duration,
    /// Log file for the TUI, which owns the terminal
    pub log_file: PathBuf,
}

impl ClientConfig {
    /// Load configuration from environment variables
    ///
    /// # Arguments
    ///
    /// * `api_url_override` - Optional backend URL override (from CLI args)
    /// * `storage_override` - Optional storage path override (from CLI args)
    ///
    /// # Errors
    ///
    /// Returns error if a numeric variable is set but unparseable
    pub fn from_env(
        api_url_override: Option<String>,
        storage_override: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        Self::from_lookup(
            |key| std::env::var(key).ok(),
            api_url_override,
            storage_override,
        )
    }

    /// Same as [`from_env`](Self::from_env) with variables read from `lookup`
    pub fn from_lookup<F>(
        lookup: F,
        api_url_override: Option<String>,
        storage_override: Option<PathBuf>,
    ) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = api_url_override
            .or_else(|| lookup("CS_API_URL"))
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let storage_path = storage_override
            .or_else(|| lookup("CS_STORAGE_PATH").map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STORAGE_PATH));

        // Zero disables the timeout
        let timeout_secs: u64 = parse_env_or(&lookup, "CS_REQUEST_TIMEOUT_SECS", 0)?;
        let request_timeout = (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs));

        let refresh_secs: u64 = parse_env_or(&lookup, "CS_FAVORITES_REFRESH_SECS", 30)?;

        let log_file = lookup("CS_LOG_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("cs_client.log"));

        Ok(ClientConfig {
            api_url,
            storage_path,
            request_timeout,
            favorites_refresh: Duration::from_secs(refresh_secs),
            log_file,
        })
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            return Err(ConfigError::Invalid {
                var: "CS_API_URL".to_string(),
                reason: format!("Must be an http(s) URL, got {}", self.api_url),
            });
        }

        if self.favorites_refresh.is_zero() {
            return Err(ConfigError::Invalid {
                var: "CS_FAVORITES_REFRESH_SECS".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        if self.storage_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid {
                var: "CS_STORAGE_PATH".to_string(),
                reason: "Must not be empty".to_string(),
            });
        }

        Ok(())
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

/// Helper to parse a variable with default fallback when unset
fn parse_env_or<T, F>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => {
            raw.trim().parse().map_err(|_| ConfigError::Invalid {
                var: key.to_string(),
                reason: format!("Not a number: {raw}"),
            })
        }
        _ => Ok(default),
    }
}
