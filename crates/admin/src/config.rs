//! Configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `ACCESS_TOKEN` - Admin API access token (HIGH PRIVILEGE)
//! - `SHOPIFY_SHOP` - shop name (e.g. `apricot-studios` for
//!   `apricot-studios.myshopify.com`)
//!
//! ## Optional
//! - `SHOPIFY_API_VERSION` - Admin API version (default: 2024-07)
//! - `SHOPIFY_URL_PREFIX` - public CDN prefix used in description HTML
//! - `DUMMY_PRODUCT_ID` - sidecar product that hosts description images
//! - `MEDIA_POLL_INTERVAL_SECS` - media processing poll tick (default: 5)
//! - `MEDIA_POLL_TIMEOUT_SECS` - media processing budget (default: 600)

use std::env;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;

const DEFAULT_API_VERSION: &str = "2024-07";
const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;
const DEFAULT_POLL_TIMEOUT_SECS: u64 = 600;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Admin API client configuration.
///
/// Implements `Debug` manually to redact the HIGH PRIVILEGE token.
#[derive(Clone)]
pub struct Config {
    /// Shop name (the `<shop>` in `<shop>.myshopify.com`)
    pub shop: String,
    /// Admin API access token
    pub access_token: SecretString,
    /// Admin API version segment of the endpoint URL
    pub api_version: String,
    /// Endpoint override (tests, proxies); defaults to
    /// `https://<shop>.myshopify.com`
    pub api_base: Option<String>,
    /// Public CDN prefix for description-image URLs
    pub url_prefix: Option<String>,
    /// Sidecar product that receives description images
    pub dummy_product_id: Option<String>,
    /// Poll tick while waiting for media processing
    pub poll_interval: Duration,
    /// Total budget while waiting for media processing
    pub poll_timeout: Duration,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("shop", &self.shop)
            .field("access_token", &"[REDACTED]")
            .field("api_version", &self.api_version)
            .field("api_base", &self.api_base)
            .field("url_prefix", &self.url_prefix)
            .field("dummy_product_id", &self.dummy_product_id)
            .field("poll_interval", &self.poll_interval)
            .field("poll_timeout", &self.poll_timeout)
            .finish()
    }
}

impl Config {
    /// Minimal configuration with library defaults for everything else.
    #[must_use]
    pub fn new(shop: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            shop: shop.into(),
            access_token: SecretString::from(access_token.into()),
            api_version: DEFAULT_API_VERSION.to_string(),
            api_base: None,
            url_prefix: None,
            dummy_product_id: None,
            poll_interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
            poll_timeout: Duration::from_secs(DEFAULT_POLL_TIMEOUT_SECS),
        }
    }

    /// Load configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a required variable is missing or a
    /// numeric variable does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let shop = require_env("SHOPIFY_SHOP")?;
        let access_token = require_env("ACCESS_TOKEN")?;

        let api_version =
            env::var("SHOPIFY_API_VERSION").unwrap_or_else(|_| DEFAULT_API_VERSION.to_string());
        let poll_interval = optional_secs("MEDIA_POLL_INTERVAL_SECS", DEFAULT_POLL_INTERVAL_SECS)?;
        let poll_timeout = optional_secs("MEDIA_POLL_TIMEOUT_SECS", DEFAULT_POLL_TIMEOUT_SECS)?;

        Ok(Self {
            shop,
            access_token: SecretString::from(access_token),
            api_version,
            api_base: None,
            url_prefix: env::var("SHOPIFY_URL_PREFIX").ok(),
            dummy_product_id: env::var("DUMMY_PRODUCT_ID").ok(),
            poll_interval,
            poll_timeout,
        })
    }
}

fn require_env(name: &str) -> Result<String, ConfigError> {
    env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}

fn optional_secs(name: &str, default: u64) -> Result<Duration, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|e| ConfigError::InvalidEnvVar(name.to_string(), e.to_string())),
        Err(_) => Ok(Duration::from_secs(default)),
    }
}
