//! # Money Types
//!
//! Integer minor-unit amounts paired with an ISO 4217 currency code.
//! All protocol arithmetic happens on integers; formatting for display is
//! the only place a decimal point appears, and it is string formatting,
//! not floating point.

use serde::{Deserialize, Serialize};

/// ISO 4217 currency code as reported by the store (e.g. "USD").
///
/// The store decides which currencies exist, so this is a newtype over the
/// raw code rather than a closed enum.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CurrencyCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

/// A monetary amount in the smallest currency unit (cents for USD)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    /// Amount in minor units
    pub amount: i64,
    /// Currency
    pub currency: CurrencyCode,
}

impl Money {
    /// Create from a minor-unit amount
    pub fn from_minor(amount: i64, currency: CurrencyCode) -> Self {
        Self { amount, currency }
    }

    pub fn zero(currency: CurrencyCode) -> Self {
        Self {
            amount: 0,
            currency,
        }
    }

    /// Add another amount of the same currency; `None` on a currency
    /// mismatch instead of silently mixing units.
    pub fn checked_add(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        Some(Money {
            amount: self.amount + other.amount,
            currency: self.currency.clone(),
        })
    }

    /// Format for display with a store-reported symbol (e.g. "$12.50").
    ///
    /// Presentation only; assumes a two-decimal currency.
    pub fn display(&self, symbol: &str) -> String {
        format!("{}{}.{:02}", symbol, self.amount / 100, (self.amount % 100).abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_code_normalized() {
        assert_eq!(CurrencyCode::from("usd").as_str(), "USD");
        assert_eq!(CurrencyCode::new("EUR").to_string(), "EUR");
    }

    #[test]
    fn test_display() {
        let price = Money::from_minor(1250, CurrencyCode::from("USD"));
        assert_eq!(price.display("$"), "$12.50");

        let whole = Money::from_minor(900, CurrencyCode::from("EUR"));
        assert_eq!(whole.display("€"), "€9.00");
    }

    #[test]
    fn test_checked_add() {
        let a = Money::from_minor(1000, CurrencyCode::from("USD"));
        let b = Money::from_minor(250, CurrencyCode::from("USD"));
        let c = Money::from_minor(250, CurrencyCode::from("EUR"));

        assert_eq!(a.checked_add(&b).map(|m| m.amount), Some(1250));
        assert!(a.checked_add(&c).is_none());
    }
}
