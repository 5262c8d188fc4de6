//! # API Gateway
//!
//! Performs authenticated exchanges with the store, threading session
//! credentials through request and response headers.
//!
//! The gateway is the only component that reads or writes credentials:
//! every response is inspected for fresh `cart-token`/`nonce` headers,
//! which unconditionally replace the current values and are written
//! through to the session store.

use crate::config::StoreConfig;
use crate::endpoints::StoreApi;
use cart_core::{SessionCredentials, SessionStore, StoreError, StoreResult, StoredSession};
use chrono::{DateTime, Utc};
use reqwest::header::{HeaderMap, CONTENT_TYPE};
use reqwest::{Client, Method};
use serde_json::Value;
use tracing::{debug, instrument, warn};

/// Request header carrying the cart token
pub const HEADER_CART_TOKEN: &str = "Cart-Token";
/// Request header carrying the anti-forgery nonce
pub const HEADER_NONCE: &str = "Nonce";

/// Authenticated HTTP gateway to one store
pub struct ApiGateway {
    client: Client,
    config: StoreConfig,
    credentials: SessionCredentials,
    expires_at: Option<DateTime<Utc>>,
    store: Box<dyn SessionStore>,
}

impl ApiGateway {
    /// Build a gateway, resuming the persisted session when it is still
    /// inside its expiry window and starting fresh otherwise.
    pub async fn resume(config: StoreConfig, store: Box<dyn SessionStore>) -> StoreResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        let stored = store.load().await;
        let now = Utc::now();
        let session = if stored.is_expired(now) {
            if stored.token.is_some() {
                debug!("stored cart session expired, starting fresh");
            }
            StoredSession::fresh(now)
        } else {
            stored
        };

        Ok(Self {
            client,
            config,
            credentials: session.credentials(),
            expires_at: session.expires_at,
            store,
        })
    }

    /// Resolve the endpoint handle for this gateway's store
    pub async fn discover(&self) -> StoreResult<StoreApi> {
        StoreApi::discover(&self.client, &self.config).await
    }

    /// Current session credentials (gateway-owned, read-only to callers)
    pub fn credentials(&self) -> &SessionCredentials {
        &self.credentials
    }

    /// One authenticated exchange with the store.
    ///
    /// Returns the parsed JSON body, or `None` when the body is empty or
    /// not JSON; operations that require a shaped body handle `None` at
    /// their decoding seam. Non-2xx statuses are not failures here; the
    /// store encodes errors in the body.
    #[instrument(skip(self, body), fields(method = %method, url = %url))]
    pub(crate) async fn request(
        &mut self,
        method: Method,
        url: String,
        body: Option<Value>,
    ) -> StoreResult<Option<Value>> {
        let mut request = self
            .client
            .request(method, &url)
            .header(CONTENT_TYPE, "application/json");
        if let Some(token) = &self.credentials.token {
            request = request.header(HEADER_CART_TOKEN, token);
        }
        if let Some(nonce) = &self.credentials.nonce {
            request = request.header(HEADER_NONCE, nonce);
        }
        if let Some(body) = &body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        let status = response.status();
        self.capture_credentials(response.headers().clone()).await;

        let text = response
            .text()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        if !status.is_success() {
            debug!(%status, "store answered with a non-success status");
        }

        Ok(serde_json::from_str(&text).ok())
    }

    /// Adopt fresh credentials from response headers (last-write-wins per
    /// header; an absent header keeps the previous value) and write the
    /// session through to storage.
    async fn capture_credentials(&mut self, headers: HeaderMap) {
        let token = header_value(&headers, "cart-token");
        let nonce = header_value(&headers, "nonce");
        if token.is_none() && nonce.is_none() {
            return;
        }

        if let Some(token) = token {
            self.credentials.token = Some(token);
        }
        if let Some(nonce) = nonce {
            self.credentials.nonce = Some(nonce);
        }
        self.persist().await;
    }

    /// Write the current session (credentials plus expiry) to storage
    pub(crate) async fn persist(&self) {
        self.store
            .save(&StoredSession {
                token: self.credentials.token.clone(),
                nonce: self.credentials.nonce.clone(),
                expires_at: self.expires_at,
            })
            .await;
    }
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    let value = headers.get(name)?;
    match value.to_str() {
        Ok(value) => Some(value.to_string()),
        Err(_) => {
            warn!(header = name, "ignoring non-UTF-8 response header");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cart_core::MemoryStore;
    use chrono::Duration;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn gateway(server: &MockServer, store: MemoryStore) -> ApiGateway {
        let config = StoreConfig::new(server.uri()).unwrap();
        ApiGateway::resume(config, Box::new(store)).await.unwrap()
    }

    #[tokio::test]
    async fn test_credentials_captured_and_sent_on_next_request() {
        let server = MockServer::start().await;
        let store = MemoryStore::new();

        Mock::given(method("GET"))
            .and(path("/first"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("Cart-Token", "tok-1")
                    .insert_header("Nonce", "n-1")
                    .set_body_json(json!({})),
            )
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/second"))
            .and(header("Cart-Token", "tok-1"))
            .and(header("Nonce", "n-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(2)
            .mount(&server)
            .await;

        let mut gateway = gateway(&server, store.clone()).await;
        assert!(gateway.credentials().is_empty());

        gateway
            .request(Method::GET, format!("{}/first", server.uri()), None)
            .await
            .unwrap();
        assert_eq!(gateway.credentials().token.as_deref(), Some("tok-1"));
        assert_eq!(store.snapshot().token.as_deref(), Some("tok-1"));
        assert_eq!(store.snapshot().nonce.as_deref(), Some("n-1"));

        // No headers on this response: previous values are retained.
        gateway
            .request(Method::GET, format!("{}/second", server.uri()), None)
            .await
            .unwrap();
        gateway
            .request(Method::GET, format!("{}/second", server.uri()), None)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_unparseable_body_resolves_to_none() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/empty"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/shaped"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
            .mount(&server)
            .await;

        let mut gateway = gateway(&server, MemoryStore::new()).await;

        let empty = gateway
            .request(Method::GET, format!("{}/empty", server.uri()), None)
            .await
            .unwrap();
        assert!(empty.is_none());

        let shaped = gateway
            .request(Method::GET, format!("{}/shaped", server.uri()), None)
            .await
            .unwrap();
        assert_eq!(shaped, Some(json!({"ok": true})));
    }

    #[tokio::test]
    async fn test_non_success_status_is_not_a_transport_failure() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "code": "rest_no_route",
                "message": "No route"
            })))
            .mount(&server)
            .await;

        let mut gateway = gateway(&server, MemoryStore::new()).await;
        let body = gateway
            .request(Method::GET, format!("{}/missing", server.uri()), None)
            .await
            .unwrap();

        assert_eq!(body.and_then(|v| v.get("code").cloned()), Some(json!("rest_no_route")));
    }

    #[tokio::test]
    async fn test_resume_discards_expired_session() {
        let server = MockServer::start().await;
        let expired = StoredSession {
            token: Some("stale".to_string()),
            nonce: Some("stale-n".to_string()),
            expires_at: Some(Utc::now() - Duration::hours(1)),
        };

        let gateway = gateway(&server, MemoryStore::with_session(expired)).await;
        assert!(gateway.credentials().is_empty());
    }

    #[tokio::test]
    async fn test_resume_keeps_unexpired_session() {
        let server = MockServer::start().await;
        let live = StoredSession {
            token: Some("tok-live".to_string()),
            nonce: Some("n-live".to_string()),
            expires_at: Some(Utc::now() + Duration::hours(1)),
        };

        let gateway = gateway(&server, MemoryStore::with_session(live)).await;
        assert_eq!(gateway.credentials().token.as_deref(), Some("tok-live"));
        assert_eq!(gateway.credentials().nonce.as_deref(), Some("n-live"));
    }
}
