//! # Response Decoding
//!
//! Every wire-shape assumption about the store API lives in this module:
//! one decoding function per endpoint, so a server contract change fails
//! loudly here instead of silently at field-access sites.
//!
//! Monetary amounts arrive as strings of minor units ("1250" is 12.50 in
//! a two-decimal currency) and are parsed to integers; anything else is a
//! malformed response.

use cart_core::{CurrencyCode, ImageRef, LineItem, Money, StoreError, StoreResult};
use serde::Deserialize;
use serde_json::Value;

/// Decode a full cart read into the line-item snapshot.
///
/// An empty or missing items array is an empty cart, not an error.
pub(crate) fn cart(body: Option<Value>) -> StoreResult<Vec<LineItem>> {
    let value = require_body("cart", body)?;
    fail_on_error_envelope(&value)?;
    let document: CartDocument = parse("cart", value)?;
    document.items.into_iter().map(line_item).collect()
}

/// Decode a checkout response into the payment redirect address
pub(crate) fn checkout(body: Option<Value>) -> StoreResult<String> {
    let value = require_body("checkout", body)?;
    fail_on_error_envelope(&value)?;
    let document: CheckoutDocument = parse("checkout", value)?;
    Ok(document.payment_result.redirect_url)
}

/// Accept a bodyless or unshaped acknowledgement, but surface error
/// envelopes the store tucks into otherwise-ordinary responses.
pub(crate) fn acknowledge(body: Option<Value>) -> StoreResult<()> {
    match body {
        Some(value) => fail_on_error_envelope(&value),
        None => Ok(()),
    }
}

fn require_body(endpoint: &'static str, body: Option<Value>) -> StoreResult<Value> {
    body.ok_or_else(|| StoreError::MalformedResponse {
        endpoint,
        message: "response body was empty or not JSON".to_string(),
    })
}

/// The store reports failures as `{code, message}` envelopes in the body,
/// not via HTTP status.
fn fail_on_error_envelope(value: &Value) -> StoreResult<()> {
    let code = value.get("code").and_then(Value::as_str);
    let message = value.get("message").and_then(Value::as_str);
    if let (Some(code), Some(message)) = (code, message) {
        return Err(StoreError::Api {
            code: code.to_string(),
            message: message.to_string(),
        });
    }
    Ok(())
}

fn parse<T: serde::de::DeserializeOwned>(endpoint: &'static str, value: Value) -> StoreResult<T> {
    serde_json::from_value(value).map_err(|e| StoreError::MalformedResponse {
        endpoint,
        message: e.to_string(),
    })
}

fn line_item(document: ItemDocument) -> StoreResult<LineItem> {
    let currency = CurrencyCode::new(document.totals.currency_code.as_str());

    Ok(LineItem {
        id: document.id,
        key: document.key,
        name: document.name,
        images: document.images.into_iter().map(image).collect(),
        quantity: document.quantity,
        currency_symbol: document.totals.currency_symbol,
        unit_price: money(parse_minor("prices.price", &document.prices.price)?, &currency),
        subtotal: money(
            parse_minor("totals.line_subtotal", &document.totals.line_subtotal)?,
            &currency,
        ),
        tax: money(
            parse_minor("totals.line_total_tax", &document.totals.line_total_tax)?,
            &currency,
        ),
        total: money(
            parse_minor("totals.line_total", &document.totals.line_total)?,
            &currency,
        ),
    })
}

fn money(amount: i64, currency: &CurrencyCode) -> Money {
    Money::from_minor(amount, currency.clone())
}

fn parse_minor(field: &str, raw: &str) -> StoreResult<i64> {
    raw.parse().map_err(|_| StoreError::MalformedResponse {
        endpoint: "cart",
        message: format!("{field} is not an integer minor amount: {raw:?}"),
    })
}

fn image(document: ImageDocument) -> ImageRef {
    ImageRef {
        id: document.id,
        src: document.src,
        thumbnail: document.thumbnail,
        alt: document.alt,
    }
}

// =============================================================================
// Store API wire documents
// =============================================================================

#[derive(Debug, Deserialize)]
struct CartDocument {
    #[serde(default)]
    items: Vec<ItemDocument>,
}

#[derive(Debug, Deserialize)]
struct ItemDocument {
    id: u64,
    key: String,
    name: String,
    #[serde(default)]
    images: Vec<ImageDocument>,
    quantity: u32,
    prices: ItemPrices,
    totals: ItemTotals,
}

#[derive(Debug, Deserialize)]
struct ItemPrices {
    price: String,
}

#[derive(Debug, Deserialize)]
struct ItemTotals {
    currency_code: String,
    currency_symbol: String,
    line_subtotal: String,
    line_total: String,
    line_total_tax: String,
}

#[derive(Debug, Deserialize)]
struct ImageDocument {
    #[serde(default)]
    id: u64,
    src: String,
    #[serde(default)]
    thumbnail: Option<String>,
    #[serde(default)]
    alt: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CheckoutDocument {
    payment_result: PaymentResultDocument,
}

#[derive(Debug, Deserialize)]
struct PaymentResultDocument {
    redirect_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item_json() -> Value {
        json!({
            "id": 42,
            "key": "a1b2c3",
            "name": "Tide Jacket",
            "images": [{"id": 9, "src": "https://cdn.example.com/jacket.jpg", "alt": "front"}],
            "quantity": 2,
            "prices": {"price": "4950"},
            "totals": {
                "currency_code": "USD",
                "currency_symbol": "$",
                "line_subtotal": "9900",
                "line_total": "10890",
                "line_total_tax": "990"
            }
        })
    }

    #[test]
    fn test_cart_decodes_items() {
        let items = cart(Some(json!({"items": [item_json()]}))).unwrap();

        assert_eq!(items.len(), 1);
        let item = &items[0];
        assert_eq!(item.key, "a1b2c3");
        assert_eq!(item.quantity, 2);
        assert_eq!(item.unit_price.amount, 4950);
        assert_eq!(item.subtotal.amount, 9900);
        assert_eq!(item.tax.amount, 990);
        assert_eq!(item.total.amount, 10890);
        assert_eq!(item.currency().as_str(), "USD");
        assert_eq!(item.images[0].src, "https://cdn.example.com/jacket.jpg");
    }

    #[test]
    fn test_cart_tolerates_missing_items_array() {
        assert!(cart(Some(json!({}))).unwrap().is_empty());
        assert!(cart(Some(json!({"items": []}))).unwrap().is_empty());
    }

    #[test]
    fn test_cart_requires_a_body() {
        let result = cart(None);
        assert!(matches!(
            result,
            Err(StoreError::MalformedResponse { endpoint: "cart", .. })
        ));
    }

    #[test]
    fn test_error_envelope_surfaces_as_api_error() {
        let result = cart(Some(json!({
            "code": "cart_invalid_product",
            "message": "Product does not exist",
            "data": {"status": 400}
        })));

        match result {
            Err(StoreError::Api { code, .. }) => assert_eq!(code, "cart_invalid_product"),
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn test_non_integer_minor_amount_fails_loudly() {
        let mut item = item_json();
        item["totals"]["line_subtotal"] = json!("99.00");

        let result = cart(Some(json!({"items": [item]})));
        assert!(matches!(result, Err(StoreError::MalformedResponse { .. })));
    }

    #[test]
    fn test_checkout_extracts_redirect() {
        let redirect = checkout(Some(json!({
            "payment_result": {
                "payment_status": "success",
                "redirect_url": "https://pay.example.com/r/123"
            }
        })))
        .unwrap();

        assert_eq!(redirect, "https://pay.example.com/r/123");
    }

    #[test]
    fn test_acknowledge_tolerates_any_non_envelope_body() {
        assert!(acknowledge(None).is_ok());
        assert!(acknowledge(Some(json!([]))).is_ok());
        assert!(acknowledge(Some(json!({"items": []}))).is_ok());
        assert!(acknowledge(Some(json!({
            "code": "cart_item_missing",
            "message": "No such item"
        })))
        .is_err());
    }
}
