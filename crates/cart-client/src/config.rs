//! # Store Configuration
//!
//! Connection settings for a headless store. The base address points at
//! the storefront host; endpoint discovery resolves the REST index
//! underneath it.

use cart_core::{StoreError, StoreResult};
use std::env;
use std::time::Duration;

/// REST namespace of the cart/checkout surface
pub const STORE_API_NAMESPACE: &str = "wc/store/v1";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Store connection configuration
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Base address of the store site (e.g. "https://shop.example.com")
    pub base_url: String,

    /// REST namespace mounted under the discovered index
    pub namespace: String,

    /// Transport timeout applied to every exchange
    pub timeout: Duration,
}

impl StoreConfig {
    pub fn new(base_url: impl Into<String>) -> StoreResult<Self> {
        let base_url: String = base_url.into();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(StoreError::Configuration(
                "store base URL must start with http:// or https://".to_string(),
            ));
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            namespace: STORE_API_NAMESPACE.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        })
    }

    /// Load configuration from environment variables.
    ///
    /// Required env vars:
    /// - `STORE_BASE_URL`
    ///
    /// Optional:
    /// - `STORE_API_TIMEOUT_SECS`
    pub fn from_env() -> StoreResult<Self> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let base_url = env::var("STORE_BASE_URL")
            .map_err(|_| StoreError::Configuration("STORE_BASE_URL not set".to_string()))?;
        let mut config = Self::new(base_url)?;

        if let Ok(raw) = env::var("STORE_API_TIMEOUT_SECS") {
            let secs = raw.parse().map_err(|_| {
                StoreError::Configuration("STORE_API_TIMEOUT_SECS must be an integer".to_string())
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// Builder: override the REST namespace
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Builder: override the transport timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Address of the REST root index used for discovery
    pub(crate) fn root_index_url(&self) -> String {
        format!("{}/wp-json/", self.base_url)
    }

    /// Root address of the configured namespace
    pub(crate) fn namespace_url(&self) -> String {
        format!("{}/wp-json/{}", self.base_url, self.namespace)
    }
}
