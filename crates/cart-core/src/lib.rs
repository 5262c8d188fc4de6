//! # cart-core
//!
//! Core types and trait seams for the headless-cart client.
//!
//! This crate provides:
//! - `Money` and `CurrencyCode` for integer minor-unit amounts
//! - `LineItem` and `AddItemRequest` for cart entries
//! - `SessionCredentials` / `StoredSession` for cart session state
//! - `SessionStore` seam plus the `MemoryStore` reference implementation
//! - `CheckoutRequest` / `Address` for the checkout payload
//! - `StoreError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use cart_core::{AddItemRequest, MemoryStore, Money, CurrencyCode};
//!
//! let store = MemoryStore::new();
//! let request = AddItemRequest::new(7, 1);
//! let price = Money::from_minor(1250, CurrencyCode::from("USD"));
//! ```

pub mod checkout;
pub mod digest;
pub mod error;
pub mod item;
pub mod money;
pub mod session;
pub mod storage;

// Re-exports for convenience
pub use checkout::{Address, CheckoutRequest};
pub use digest::base64_hmac_sha256;
pub use error::{StoreError, StoreResult};
pub use item::{AddItemRequest, ImageRef, LineItem, VariationSelection};
pub use money::{CurrencyCode, Money};
pub use session::{SessionCredentials, StoredSession, SESSION_TTL_SECS};
pub use storage::{MemoryStore, SessionStore};
