//! Application configuration loading from environment variables.
//!
//! Configuration is read from the environment at startup (after `.env` is
//! loaded by `main`), so the console can be pointed at a different moderation
//! backend per deployment without rebuilding.
//!
//! # Environment Variables
//!
//! ## Required Variables
//! - `MODERATION_API_URL`: Base URL of the moderation REST backend
//! - `MEDIA_BASE_URL`: Prefix applied to relative media paths in reports
//!
//! ## Optional Variables
//! - `RUST_LOG`: Logging level (default: "info,moderation_console=debug,tower_http=debug")
//! - `MODERATION_API_TOKEN`: Bearer token forwarded to the backend
//! - `REQUEST_TIMEOUT_SECONDS`: Backend request timeout (default: 15)
//! - `REPORTS_PAGE_SIZE`: Reports per page (default: 10)
//! - `HOST`: Server bind address (default: "0.0.0.0")
//! - `PORT`: Server port (default: 3000)

use crate::domain::report::category::DEFAULT_PAGE_SIZE;
use serde::Deserialize;

/// Console configuration loaded from environment.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Base URL of the moderation backend (e.g., `https://api.example.com/admin`)
    pub moderation_api_url: String,

    /// Bearer token sent with every backend request
    pub moderation_api_token: Option<String>,

    /// Prefix for relative media paths (e.g., `https://cdn.example.com`)
    pub media_base_url: String,

    /// Backend request timeout in seconds
    pub request_timeout_seconds: u64,

    /// Reports per page in the moderation tables
    pub reports_page_size: u32,

    /// Server bind address
    pub host: String,

    /// Server port
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or a value cannot
    /// be parsed to the expected type.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Self {
            moderation_api_url: required(&lookup, "MODERATION_API_URL")?,
            moderation_api_token: lookup("MODERATION_API_TOKEN").filter(|t| !t.trim().is_empty()),
            media_base_url: required(&lookup, "MEDIA_BASE_URL")?,
            request_timeout_seconds: or_default(&lookup, "REQUEST_TIMEOUT_SECONDS", 15)?,
            reports_page_size: or_default(&lookup, "REPORTS_PAGE_SIZE", DEFAULT_PAGE_SIZE)?,
            host: or_default(&lookup, "HOST", "0.0.0.0".to_string())?,
            port: or_default(&lookup, "PORT", 3000)?,
        };

        if config.reports_page_size == 0 {
            anyhow::bail!("REPORTS_PAGE_SIZE must be at least 1");
        }
        Ok(config)
    }
}

/// Load a required variable.
///
/// # Errors
///
/// Returns an error if the variable is not set.
fn required<F>(lookup: &F, key: &str) -> anyhow::Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).ok_or_else(|| anyhow::anyhow!("Missing required environment variable: {}", key))
}

/// Load a variable with a default value.
///
/// # Errors
///
/// Returns an error if the variable is set but cannot be parsed.
fn or_default<F, T>(lookup: &F, key: &str, default: T) -> anyhow::Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(val) => val
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", key, e)),
        None => Ok(default),
    }
}
