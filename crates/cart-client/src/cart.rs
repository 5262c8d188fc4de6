//! # Cart Session
//!
//! The authoritative client-side mirror of server cart state. Every
//! mutation round-trips through the store and is followed by a full cart
//! re-read, so `items` always reflects server-confirmed truth rather than
//! an optimistic local projection.
//!
//! The `loading` flag is advisory: it lets a UI disable controls while a
//! round-trip is in flight, but it is not a lock. A `CartSession` is
//! driven through `&mut self`, so overlapping operations on one handle
//! are unrepresentable; see [`crate::shared::SharedCartSession`] for the
//! opt-in queue across cloned handles.

use crate::config::StoreConfig;
use crate::decode;
use crate::endpoints::StoreApi;
use crate::gateway::ApiGateway;
use cart_core::{
    AddItemRequest, CheckoutRequest, CurrencyCode, LineItem, Money, SessionCredentials,
    SessionStore, StoreError, StoreResult,
};
use reqwest::Method;
use serde_json::{json, Value};
use tracing::{debug, info, instrument};

/// One shopping cart tied to an anonymous store session
pub struct CartSession {
    gateway: ApiGateway,
    api: Option<StoreApi>,
    items: Vec<LineItem>,
    loading: bool,
}

impl CartSession {
    /// Create a session against a store, resuming prior credentials from
    /// the given store when they are still inside their expiry window.
    pub async fn resume(config: StoreConfig, store: Box<dyn SessionStore>) -> StoreResult<Self> {
        let gateway = ApiGateway::resume(config, store).await?;
        Ok(Self {
            gateway,
            api: None,
            items: Vec::new(),
            loading: false,
        })
    }

    /// Initialize the session: discover endpoints and perform the first
    /// cart read.
    ///
    /// Idempotent: once initialized, later calls return the cached
    /// endpoint handle without any network traffic. A failed first fetch
    /// leaves the session uninitialized so the next call retries from
    /// scratch.
    #[instrument(skip(self))]
    pub async fn init(&mut self) -> StoreResult<StoreApi> {
        self.ensure_api().await
    }

    async fn ensure_api(&mut self) -> StoreResult<StoreApi> {
        if let Some(api) = &self.api {
            return Ok(api.clone());
        }
        self.loading = true;
        let result = self.bootstrap().await;
        self.loading = false;
        result
    }

    async fn bootstrap(&mut self) -> StoreResult<StoreApi> {
        let api = self.gateway.discover().await?;
        let body = self.gateway.request(Method::GET, api.cart(), None).await?;
        self.items = decode::cart(body)?;
        // First fetch done: persist the session record, expiry included.
        self.gateway.persist().await;
        self.api = Some(api.clone());
        info!(items = self.items.len(), "cart session initialized");
        Ok(api)
    }

    /// Whether `init` has completed successfully
    pub fn is_initialized(&self) -> bool {
        self.api.is_some()
    }

    /// Advisory busy flag for UI layers; not a lock
    pub fn loading(&self) -> bool {
        self.loading
    }

    /// Current line-item snapshot
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// First line item with the given key
    pub fn item(&self, key: &str) -> Option<&LineItem> {
        self.items.iter().find(|item| item.key == key)
    }

    /// Number of units across all lines
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Cart currency: the currency of the first line, `None` when empty
    pub fn currency(&self) -> Option<&CurrencyCode> {
        self.items.first().map(LineItem::currency)
    }

    /// Sum of line subtotals; `None` on an empty cart
    pub fn subtotal(&self) -> Option<Money> {
        self.fold_amounts(|item| item.subtotal.amount)
    }

    /// Sum of line taxes; `None` on an empty cart
    pub fn tax(&self) -> Option<Money> {
        self.fold_amounts(|item| item.tax.amount)
    }

    /// Sum of line totals; `None` on an empty cart
    pub fn total(&self) -> Option<Money> {
        self.fold_amounts(|item| item.total.amount)
    }

    fn fold_amounts(&self, amount: impl Fn(&LineItem) -> i64) -> Option<Money> {
        let currency = self.currency()?.clone();
        let sum: i64 = self.items.iter().map(|item| amount(item)).sum();
        Some(Money::from_minor(sum, currency))
    }

    /// Session credentials as currently held by the gateway
    pub fn credentials(&self) -> &SessionCredentials {
        self.gateway.credentials()
    }

    /// Add a product to the cart, then re-read the cart
    #[instrument(skip(self, request), fields(product_id = request.id))]
    pub async fn add(&mut self, request: AddItemRequest) -> StoreResult<()> {
        let api = self.ensure_api().await?;
        self.loading = true;
        let result = self.add_inner(&api, request).await;
        self.loading = false;
        result
    }

    async fn add_inner(&mut self, api: &StoreApi, request: AddItemRequest) -> StoreResult<()> {
        let body = encode_body(&request)?;
        let response = self
            .gateway
            .request(Method::POST, api.add_item(), Some(body))
            .await?;
        decode::acknowledge(response)?;
        self.refresh_inner(api).await
    }

    /// Remove every line from the cart, then re-read it
    #[instrument(skip(self))]
    pub async fn clear(&mut self) -> StoreResult<()> {
        let api = self.ensure_api().await?;
        self.loading = true;
        let result = self.clear_inner(&api).await;
        self.loading = false;
        result
    }

    async fn clear_inner(&mut self, api: &StoreApi) -> StoreResult<()> {
        let response = self
            .gateway
            .request(Method::DELETE, api.items(), None)
            .await?;
        decode::acknowledge(response)?;
        self.refresh_inner(api).await
    }

    /// Re-read the cart and replace the snapshot wholesale
    #[instrument(skip(self))]
    pub async fn refresh(&mut self) -> StoreResult<()> {
        let api = self.ensure_api().await?;
        self.loading = true;
        let result = self.refresh_inner(&api).await;
        self.loading = false;
        result
    }

    async fn refresh_inner(&mut self, api: &StoreApi) -> StoreResult<()> {
        let body = self.gateway.request(Method::GET, api.cart(), None).await?;
        self.items = decode::cart(body)?;
        debug!(items = self.items.len(), "cart snapshot replaced");
        Ok(())
    }

    /// Submit checkout and return the payment redirect address.
    ///
    /// The snapshot is left untouched: a successful checkout only means
    /// the store accepted the order, not that payment completed. Observe
    /// the post-checkout cart with [`CartSession::refresh`].
    #[instrument(skip(self, request))]
    pub async fn checkout(&mut self, request: CheckoutRequest) -> StoreResult<String> {
        let api = self.ensure_api().await?;
        self.loading = true;
        let result = self.checkout_inner(&api, request).await;
        self.loading = false;
        result
    }

    async fn checkout_inner(
        &mut self,
        api: &StoreApi,
        request: CheckoutRequest,
    ) -> StoreResult<String> {
        let body = encode_body(&request)?;
        let response = self
            .gateway
            .request(Method::POST, api.checkout(), Some(body))
            .await?;
        decode::checkout(response)
    }

    /// Raise a line's quantity by one, then re-read the cart
    #[instrument(skip(self))]
    pub async fn increase(&mut self, key: &str) -> StoreResult<()> {
        let api = self.ensure_api().await?;
        self.loading = true;
        let result = self.increase_inner(&api, key).await;
        self.loading = false;
        result
    }

    async fn increase_inner(&mut self, api: &StoreApi, key: &str) -> StoreResult<()> {
        let quantity = self.quantity_of(key)?;
        self.set_quantity(api, key, quantity + 1).await
    }

    /// Lower a line's quantity by one, removing the line entirely instead
    /// of ever sending a zero or negative quantity
    #[instrument(skip(self))]
    pub async fn decrease(&mut self, key: &str) -> StoreResult<()> {
        let api = self.ensure_api().await?;
        self.loading = true;
        let result = self.decrease_inner(&api, key).await;
        self.loading = false;
        result
    }

    async fn decrease_inner(&mut self, api: &StoreApi, key: &str) -> StoreResult<()> {
        let quantity = self.quantity_of(key)?;
        if quantity <= 1 {
            self.remove_inner(api, key).await
        } else {
            self.set_quantity(api, key, quantity - 1).await
        }
    }

    /// Delete a line from the cart, then re-read it
    #[instrument(skip(self))]
    pub async fn remove(&mut self, key: &str) -> StoreResult<()> {
        let api = self.ensure_api().await?;
        self.loading = true;
        let result = self.remove_inner(&api, key).await;
        self.loading = false;
        result
    }

    async fn remove_inner(&mut self, api: &StoreApi, key: &str) -> StoreResult<()> {
        let response = self
            .gateway
            .request(Method::DELETE, api.item(key), None)
            .await?;
        decode::acknowledge(response)?;
        self.refresh_inner(api).await
    }

    async fn set_quantity(&mut self, api: &StoreApi, key: &str, quantity: u32) -> StoreResult<()> {
        let response = self
            .gateway
            .request(
                Method::PATCH,
                api.item(key),
                Some(json!({ "quantity": quantity })),
            )
            .await?;
        decode::acknowledge(response)?;
        self.refresh_inner(api).await
    }

    fn quantity_of(&self, key: &str) -> StoreResult<u32> {
        self.item(key)
            .map(|item| item.quantity)
            .ok_or_else(|| StoreError::UnknownItem {
                key: key.to_string(),
            })
    }
}

fn encode_body<T: serde::Serialize>(request: &T) -> StoreResult<Value> {
    serde_json::to_value(request)
        .map_err(|e| StoreError::Transport(format!("failed to encode request body: {e}")))
}
