//! # Shared Cart Session
//!
//! Opt-in single-flight wrapper around [`CartSession`].
//!
//! A `CartSession` taken by `&mut self` cannot be driven concurrently
//! through one handle; cloned `SharedCartSession` handles serialize their
//! operations through one async mutex instead, so two callers issuing
//! `add` at the same moment queue rather than race. This hardens the
//! advisory `loading` model without changing it: the plain session keeps
//! its behavior, this wrapper adds the queue.

use crate::cart::CartSession;
use crate::endpoints::StoreApi;
use cart_core::{AddItemRequest, CheckoutRequest, CurrencyCode, LineItem, Money, StoreResult};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Clonable handle to one cart session; operations serialize per cart
#[derive(Clone)]
pub struct SharedCartSession {
    inner: Arc<Mutex<CartSession>>,
}

impl SharedCartSession {
    pub fn new(session: CartSession) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
        }
    }

    pub async fn init(&self) -> StoreResult<StoreApi> {
        self.inner.lock().await.init().await
    }

    pub async fn add(&self, request: AddItemRequest) -> StoreResult<()> {
        self.inner.lock().await.add(request).await
    }

    pub async fn clear(&self) -> StoreResult<()> {
        self.inner.lock().await.clear().await
    }

    pub async fn refresh(&self) -> StoreResult<()> {
        self.inner.lock().await.refresh().await
    }

    pub async fn checkout(&self, request: CheckoutRequest) -> StoreResult<String> {
        self.inner.lock().await.checkout(request).await
    }

    pub async fn increase(&self, key: &str) -> StoreResult<()> {
        self.inner.lock().await.increase(key).await
    }

    pub async fn decrease(&self, key: &str) -> StoreResult<()> {
        self.inner.lock().await.decrease(key).await
    }

    pub async fn remove(&self, key: &str) -> StoreResult<()> {
        self.inner.lock().await.remove(key).await
    }

    /// Cloned snapshot of the current line items
    pub async fn items(&self) -> Vec<LineItem> {
        self.inner.lock().await.items().to_vec()
    }

    pub async fn item(&self, key: &str) -> Option<LineItem> {
        self.inner.lock().await.item(key).cloned()
    }

    pub async fn loading(&self) -> bool {
        self.inner.lock().await.loading()
    }

    pub async fn currency(&self) -> Option<CurrencyCode> {
        self.inner.lock().await.currency().cloned()
    }

    pub async fn subtotal(&self) -> Option<Money> {
        self.inner.lock().await.subtotal()
    }

    pub async fn tax(&self) -> Option<Money> {
        self.inner.lock().await.tax()
    }

    pub async fn total(&self) -> Option<Money> {
        self.inner.lock().await.total()
    }
}
