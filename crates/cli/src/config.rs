//! CLI configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `SHOP_DATA_FILE` - File backing the key-value store (default: `.corner-shop/storage.json`)
//! - `SHOP_CATALOG_URL` - Product catalog base URL (default: `https://fakestoreapi.com`)
//! - `SHOP_CATALOG_TIMEOUT_SECS` - Catalog request timeout (default: 10)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

const DEFAULT_DATA_FILE: &str = ".corner-shop/storage.json";
const DEFAULT_CATALOG_URL: &str = "https://fakestoreapi.com";
const DEFAULT_CATALOG_TIMEOUT_SECS: &str = "10";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// CLI configuration.
#[derive(Debug, Clone)]
pub struct ShopConfig {
    /// Storage file location
    pub data_file: PathBuf,
    /// Catalog base URL
    pub catalog_url: Url,
    /// Catalog request timeout
    pub catalog_timeout: Duration,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<SecretString>,
    /// Sentry environment (e.g., "development")
    pub sentry_environment: Option<String>,
}

impl ShopConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unusable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let data_file = PathBuf::from(get_env_or_default("SHOP_DATA_FILE", DEFAULT_DATA_FILE));
        let catalog_url = parse_catalog_url(&get_env_or_default(
            "SHOP_CATALOG_URL",
            DEFAULT_CATALOG_URL,
        ))?;
        let catalog_timeout = parse_timeout(&get_env_or_default(
            "SHOP_CATALOG_TIMEOUT_SECS",
            DEFAULT_CATALOG_TIMEOUT_SECS,
        ))?;
        let sentry_dsn = get_optional_env("SENTRY_DSN").map(SecretString::from);
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");

        Ok(Self {
            data_file,
            catalog_url,
            catalog_timeout,
            sentry_dsn,
            sentry_environment,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional, non-blank environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Parse the catalog base URL; only http(s) is accepted.
fn parse_catalog_url(value: &str) -> Result<Url, ConfigError> {
    let invalid = |msg: String| ConfigError::InvalidEnvVar("SHOP_CATALOG_URL".to_string(), msg);

    let url = Url::parse(value.trim()).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    Ok(url)
}

/// Parse a whole number of seconds, at least one.
fn parse_timeout(value: &str) -> Result<Duration, ConfigError> {
    let invalid =
        |msg: String| ConfigError::InvalidEnvVar("SHOP_CATALOG_TIMEOUT_SECS".to_string(), msg);

    let secs = value
        .trim()
        .parse::<u64>()
        .map_err(|e| invalid(e.to_string()))?;
    if secs == 0 {
        return Err(invalid("must be at least 1".to_string()));
    }
    Ok(Duration::from_secs(secs))
}
