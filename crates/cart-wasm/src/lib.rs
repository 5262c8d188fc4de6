//! # cart-wasm
//!
//! WebAssembly display bindings for headless-cart storefronts.
//!
//! Line snapshots cross the JS boundary as plain objects; formatting uses
//! the store-reported currency symbol and integer minor units only.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { WasmCartLine, cart_total_minor } from 'headless-cart-wasm';
//!
//! await init();
//!
//! const line = new WasmCartLine("a1b2c3", "Tide Jacket", 2, 4950, 9900, 10890, "$");
//! console.log(line.format_total()); // "$108.90"
//! ```
//!
//! ## Building
//!
//! ```bash
//! wasm-pack build --target web
//! ```

use cart_core::LineItem;
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

/// Line-item snapshot for the JS boundary
#[derive(Debug, Clone, Serialize, Deserialize)]
#[wasm_bindgen]
pub struct WasmCartLine {
    key: String,
    name: String,
    quantity: u32,
    unit_price_minor: i64,
    subtotal_minor: i64,
    total_minor: i64,
    currency_symbol: String,
}

#[wasm_bindgen]
impl WasmCartLine {
    #[wasm_bindgen(constructor)]
    pub fn new(
        key: String,
        name: String,
        quantity: u32,
        unit_price_minor: i64,
        subtotal_minor: i64,
        total_minor: i64,
        currency_symbol: String,
    ) -> Self {
        Self {
            key,
            name,
            quantity,
            unit_price_minor,
            subtotal_minor,
            total_minor,
            currency_symbol,
        }
    }

    #[wasm_bindgen(getter)]
    pub fn key(&self) -> String {
        self.key.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn name(&self) -> String {
        self.name.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    #[wasm_bindgen(getter)]
    pub fn unit_price_minor(&self) -> i64 {
        self.unit_price_minor
    }

    #[wasm_bindgen(getter)]
    pub fn subtotal_minor(&self) -> i64 {
        self.subtotal_minor
    }

    #[wasm_bindgen(getter)]
    pub fn total_minor(&self) -> i64 {
        self.total_minor
    }

    #[wasm_bindgen(getter)]
    pub fn currency_symbol(&self) -> String {
        self.currency_symbol.clone()
    }

    /// Format the unit price for display
    #[wasm_bindgen]
    pub fn format_unit_price(&self) -> String {
        format_minor(self.unit_price_minor, &self.currency_symbol)
    }

    /// Format the line total for display
    #[wasm_bindgen]
    pub fn format_total(&self) -> String {
        format_minor(self.total_minor, &self.currency_symbol)
    }
}

impl From<&LineItem> for WasmCartLine {
    fn from(item: &LineItem) -> Self {
        Self {
            key: item.key.clone(),
            name: item.name.clone(),
            quantity: item.quantity,
            unit_price_minor: item.unit_price.amount,
            subtotal_minor: item.subtotal.amount,
            total_minor: item.total.amount,
            currency_symbol: item.currency_symbol.clone(),
        }
    }
}

/// Sum the line totals of a JS array of cart lines, in minor units
#[wasm_bindgen]
pub fn cart_total_minor(lines: JsValue) -> Result<i64, JsValue> {
    let lines: Vec<WasmCartLine> = serde_wasm_bindgen::from_value(lines)
        .map_err(|e| JsValue::from_str(&format!("invalid cart lines: {e}")))?;

    Ok(lines.iter().map(|line| line.total_minor).sum())
}

/// Format a minor-unit amount with a currency symbol
#[wasm_bindgen]
pub fn format_minor(amount: i64, symbol: &str) -> String {
    format!("{}{}.{:02}", symbol, amount / 100, (amount % 100).abs())
}

/// Cart item keys are short server-issued slugs
#[wasm_bindgen]
pub fn validate_item_key(key: &str) -> bool {
    !key.is_empty() && key.len() <= 64 && key.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Log to the browser console
#[wasm_bindgen]
pub fn log(message: &str) {
    web_sys::console::log_1(&JsValue::from_str(message));
}

/// Get library version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
