//! App configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `BLUEFRUIT_API_BASE_URL` - Base URL of the remote REST API
//!   (e.g., `https://bluefruitnutrition-production.up.railway.app/api`)
//!
//! ## Optional
//! - `BLUEFRUIT_DATA_DIR` - Directory for device-local storage
//!   (default: `./data`)
//! - `BLUEFRUIT_REQUEST_TIMEOUT_SECS` - Bound on every API request
//!   (default: 20)
//! - `BLUEFRUIT_CART_SCOPE` - `device` or `user`; controls whether the cart
//!   survives logout (default: `device`, matching historical behavior)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Default API request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 20;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Who the device-local cart belongs to.
///
/// The cart has always been stored under a device-level key, so it survives
/// logout. Whether that is the desired product behavior is an open question;
/// this flag makes the choice explicit instead of hardcoding it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CartScope {
    /// Cart belongs to the device and survives logout.
    #[default]
    Device,
    /// Cart belongs to the signed-in user and is cleared on logout.
    User,
}

impl std::str::FromStr for CartScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "device" => Ok(Self::Device),
            "user" => Ok(Self::User),
            _ => Err(format!("invalid cart scope: {s} (expected device|user)")),
        }
    }
}

/// App core configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the remote REST API, always with a trailing slash.
    pub api_base_url: Url,
    /// Directory holding the device-local store file.
    pub data_dir: PathBuf,
    /// Bound on every API request; a hung order submission becomes a
    /// failed one instead of blocking forever.
    pub request_timeout: Duration,
    /// Whether the cart survives logout.
    pub cart_scope: CartScope,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_base_url = parse_base_url(
            "BLUEFRUIT_API_BASE_URL",
            &get_required_env("BLUEFRUIT_API_BASE_URL")?,
        )?;

        let data_dir = PathBuf::from(get_env_or_default("BLUEFRUIT_DATA_DIR", "./data"));

        let timeout_secs = get_env_or_default(
            "BLUEFRUIT_REQUEST_TIMEOUT_SECS",
            &DEFAULT_TIMEOUT_SECS.to_string(),
        )
        .parse::<u64>()
        .map_err(|e| {
            ConfigError::InvalidEnvVar("BLUEFRUIT_REQUEST_TIMEOUT_SECS".to_string(), e.to_string())
        })?;

        let cart_scope = get_env_or_default("BLUEFRUIT_CART_SCOPE", "device")
            .parse::<CartScope>()
            .map_err(|e| ConfigError::InvalidEnvVar("BLUEFRUIT_CART_SCOPE".to_string(), e))?;

        Ok(Self {
            api_base_url,
            data_dir,
            request_timeout: Duration::from_secs(timeout_secs),
            cart_scope,
        })
    }
}

/// Parse a base URL, normalizing it to end with a slash so endpoint joins
/// keep the full path.
fn parse_base_url(key: &str, value: &str) -> Result<Url, ConfigError> {
    let normalized = if value.ends_with('/') {
        value.to_owned()
    } else {
        format!("{value}/")
    };

    Url::parse(&normalized).map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
