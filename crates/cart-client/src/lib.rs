//! # cart-client
//!
//! Cart session and synchronization client for a headless store API.
//!
//! The client establishes an anonymous cart session against a remote
//! store, keeps it authenticated across requests via the
//! `Cart-Token`/`Nonce` header pair, and mirrors server-confirmed cart
//! state after every mutation: each write is followed by a full cart
//! re-read, never an optimistic local merge.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use cart_client::{CartSession, StoreConfig};
//! use cart_core::{AddItemRequest, MemoryStore};
//!
//! let config = StoreConfig::new("https://shop.example.com")?;
//! let mut cart = CartSession::resume(config, Box::new(MemoryStore::new())).await?;
//!
//! cart.init().await?;
//! cart.add(AddItemRequest::new(7, 1)).await?;
//!
//! for item in cart.items() {
//!     println!("{} × {} = {}", item.quantity, item.name, item.display_total());
//! }
//! ```
//!
//! ## Operations
//!
//! | Operation | Exchange | Snapshot afterwards |
//! |-----------|----------|---------------------|
//! | `init` | GET cart (once) | replaced |
//! | `add` | POST add-item | replaced via refresh |
//! | `clear` | DELETE items | replaced via refresh |
//! | `refresh` | GET cart | replaced |
//! | `checkout` | POST checkout | untouched |
//! | `increase`/`decrease` | PATCH item | replaced via refresh |
//! | `remove` | DELETE item | replaced via refresh |

pub mod cart;
pub mod config;
mod decode;
pub mod endpoints;
pub mod gateway;
pub mod shared;

// Re-exports
pub use cart::CartSession;
pub use config::{StoreConfig, STORE_API_NAMESPACE};
pub use endpoints::StoreApi;
pub use gateway::{ApiGateway, HEADER_CART_TOKEN, HEADER_NONCE};
pub use shared::SharedCartSession;
