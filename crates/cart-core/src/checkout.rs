//! # Checkout Payloads
//!
//! Typed request body for the checkout endpoint. The store turns this into
//! an order and answers with a payment redirect.

use serde::{Deserialize, Serialize};

/// Postal address for billing or shipping
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub first_name: String,
    pub last_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    pub address_1: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_2: Option<String>,

    pub city: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    pub postcode: String,

    /// ISO 3166-1 alpha-2 country code
    pub country: String,
}

/// Body of the checkout POST
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutRequest {
    pub billing_address: Address,

    /// Defaults to the billing address server-side when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_address: Option<Address>,

    /// Payment gateway identifier understood by the store (e.g. "stripe")
    pub payment_method: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_note: Option<String>,
}

impl CheckoutRequest {
    pub fn new(billing_address: Address, payment_method: impl Into<String>) -> Self {
        Self {
            billing_address,
            shipping_address: None,
            payment_method: payment_method.into(),
            customer_note: None,
        }
    }

    /// Builder: ship somewhere other than the billing address
    pub fn with_shipping(mut self, address: Address) -> Self {
        self.shipping_address = Some(address);
        self
    }

    /// Builder: attach a note for the merchant
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.customer_note = Some(note.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn billing() -> Address {
        Address {
            first_name: "Ada".to_string(),
            last_name: "Byrne".to_string(),
            email: Some("ada@example.com".to_string()),
            address_1: "1 Quay St".to_string(),
            city: "Galway".to_string(),
            postcode: "H91".to_string(),
            country: "IE".to_string(),
            ..Address::default()
        }
    }

    #[test]
    fn test_builder() {
        let request = CheckoutRequest::new(billing(), "stripe").with_note("ring the bell");

        assert_eq!(request.payment_method, "stripe");
        assert_eq!(request.customer_note.as_deref(), Some("ring the bell"));
        assert!(request.shipping_address.is_none());
    }

    #[test]
    fn test_optional_fields_are_omitted() {
        let json = serde_json::to_value(CheckoutRequest::new(billing(), "stripe")).unwrap();

        assert!(json.get("shipping_address").is_none());
        assert!(json.get("customer_note").is_none());
        assert_eq!(json["billing_address"]["city"], "Galway");
    }
}
