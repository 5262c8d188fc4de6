//! # Endpoint Discovery
//!
//! Resolves a store's base address into the set of cart/checkout
//! endpoints. Discovery runs once per session; the resolved handle is
//! cached by the session and reused for all later address building.

use crate::config::StoreConfig;
use cart_core::{StoreError, StoreResult};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

/// Advertised REST index at `{base}/wp-json/`
#[derive(Debug, Deserialize)]
struct RootIndex {
    #[serde(default)]
    namespaces: Vec<String>,
}

/// Address builder for the store's cart/checkout surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreApi {
    root: String,
}

impl StoreApi {
    /// Resolve the base address into a usable endpoint handle.
    ///
    /// Fetches the REST root index and checks that the configured
    /// namespace is advertised. Every failure here is fatal to session
    /// startup; there is no automatic retry.
    #[instrument(skip(client, config), fields(base_url = %config.base_url))]
    pub async fn discover(client: &Client, config: &StoreConfig) -> StoreResult<Self> {
        let index_url = config.root_index_url();
        let response = client
            .get(&index_url)
            .send()
            .await
            .map_err(|e| StoreError::Discovery(format!("root index unreachable: {e}")))?;

        let index: RootIndex = response
            .json()
            .await
            .map_err(|e| StoreError::Discovery(format!("invalid root index: {e}")))?;

        if !index.namespaces.iter().any(|ns| ns == &config.namespace) {
            return Err(StoreError::Discovery(format!(
                "store does not expose the {} namespace",
                config.namespace
            )));
        }

        debug!(namespace = %config.namespace, "store API discovered");
        Ok(Self {
            root: config.namespace_url(),
        })
    }

    /// Build a handle directly from a namespace root, skipping discovery
    pub fn from_root(root: impl Into<String>) -> Self {
        let root: String = root.into();
        Self {
            root: root.trim_end_matches('/').to_string(),
        }
    }

    /// Cart root: the full cart read
    pub fn cart(&self) -> String {
        format!("{}/cart", self.root)
    }

    /// Add-item endpoint
    pub fn add_item(&self) -> String {
        format!("{}/cart/add-item", self.root)
    }

    /// Items collection (bulk delete)
    pub fn items(&self) -> String {
        format!("{}/cart/items", self.root)
    }

    /// Single item by its cart key
    pub fn item(&self, key: &str) -> String {
        format!("{}/cart/items/{}", self.root, key)
    }

    /// Checkout endpoint
    pub fn checkout(&self) -> String {
        format!("{}/checkout", self.root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_address_building() {
        let api = StoreApi::from_root("https://shop.example.com/wp-json/wc/store/v1/");

        assert_eq!(
            api.cart(),
            "https://shop.example.com/wp-json/wc/store/v1/cart"
        );
        assert_eq!(
            api.add_item(),
            "https://shop.example.com/wp-json/wc/store/v1/cart/add-item"
        );
        assert_eq!(
            api.items(),
            "https://shop.example.com/wp-json/wc/store/v1/cart/items"
        );
        assert_eq!(
            api.item("a1b2c3"),
            "https://shop.example.com/wp-json/wc/store/v1/cart/items/a1b2c3"
        );
        assert_eq!(
            api.checkout(),
            "https://shop.example.com/wp-json/wc/store/v1/checkout"
        );
    }

    #[tokio::test]
    async fn test_discover_resolves_namespace_root() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/wp-json/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "namespaces": ["wp/v2", "wc/store/v1"]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let config = StoreConfig::new(server.uri()).unwrap();
        let client = Client::new();
        let api = StoreApi::discover(&client, &config).await.unwrap();

        assert_eq!(api.cart(), format!("{}/wp-json/wc/store/v1/cart", server.uri()));
    }

    #[tokio::test]
    async fn test_discover_rejects_missing_namespace() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/wp-json/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "namespaces": ["wp/v2"]
            })))
            .mount(&server)
            .await;

        let config = StoreConfig::new(server.uri()).unwrap();
        let client = Client::new();
        let result = StoreApi::discover(&client, &config).await;

        assert!(matches!(result, Err(StoreError::Discovery(_))));
    }
}
