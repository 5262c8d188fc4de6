//! # Line Item Types
//!
//! Cart line-item snapshots and the add-item request payload.

use crate::money::{CurrencyCode, Money};
use serde::{Deserialize, Serialize};

/// Product image attached to a line item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    #[serde(default)]
    pub id: u64,
    pub src: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

/// One product entry inside the cart.
///
/// A snapshot of server-confirmed state: instances are constructed only
/// from a full cart read and replaced wholesale on every refresh. A
/// snapshot held across a mutation is stale; re-query the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Product ID
    pub id: u64,

    /// Server-issued key, unique within the cart
    pub key: String,

    /// Display name (denormalized)
    pub name: String,

    /// Product images
    #[serde(default)]
    pub images: Vec<ImageRef>,

    /// Quantity in the cart
    pub quantity: u32,

    /// Currency symbol reported by the store, display only
    pub currency_symbol: String,

    /// Unit price
    pub unit_price: Money,

    /// Line subtotal before tax
    pub subtotal: Money,

    /// Line tax
    pub tax: Money,

    /// Line total including tax
    pub total: Money,
}

impl LineItem {
    /// Currency of this line
    pub fn currency(&self) -> &CurrencyCode {
        &self.unit_price.currency
    }

    /// Format the line total with the store-reported symbol
    pub fn display_total(&self) -> String {
        self.total.display(&self.currency_symbol)
    }
}

/// Payload for adding a product to the cart.
///
/// Merging quantities for a product already present is the server's job;
/// there is no client-side deduplication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddItemRequest {
    /// Product ID
    pub id: u64,

    /// Quantity to add
    pub quantity: u32,

    /// Selected attributes when adding a variable product
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variation: Option<Vec<VariationSelection>>,
}

/// One selected attribute of a variable product (e.g. "Size" / "M")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariationSelection {
    pub attribute: String,
    pub value: String,
}

impl AddItemRequest {
    pub fn new(id: u64, quantity: u32) -> Self {
        Self {
            id,
            quantity,
            variation: None,
        }
    }

    /// Builder: select a variation attribute
    pub fn with_variation(mut self, attribute: impl Into<String>, value: impl Into<String>) -> Self {
        self.variation
            .get_or_insert_with(Vec::new)
            .push(VariationSelection {
                attribute: attribute.into(),
                value: value.into(),
            });
        self
    }
}
