//! # Store Client Errors
//!
//! Typed error handling for the headless cart client.
//! All fallible operations return `Result<T, StoreError>`.

use thiserror::Error;

/// Core error type for all cart/store operations
#[derive(Debug, Error)]
pub enum StoreError {
    /// Configuration errors (missing env vars, invalid base address)
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Endpoint discovery failed; fatal to session startup
    #[error("endpoint discovery failed: {0}")]
    Discovery(String),

    /// Network/HTTP error while talking to the store
    #[error("transport error: {0}")]
    Transport(String),

    /// Response body missing or not matching the expected shape
    #[error("malformed {endpoint} response: {message}")]
    MalformedResponse {
        endpoint: &'static str,
        message: String,
    },

    /// Error envelope returned by the store in the response body.
    /// The store reports most failures this way, not via HTTP status.
    #[error("store error [{code}]: {message}")]
    Api { code: String, message: String },

    /// No line item with the given key in the current snapshot
    #[error("no line item with key {key}")]
    UnknownItem { key: String },
}

impl StoreError {
    /// Returns true if retrying the same operation later could succeed.
    /// The client itself never retries; this is for callers.
    pub fn is_transient(&self) -> bool {
        matches!(self, StoreError::Transport(_))
    }
}

/// Result type alias for cart/store operations
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_errors() {
        assert!(StoreError::Transport("connection reset".into()).is_transient());
        assert!(!StoreError::Discovery("no index".into()).is_transient());
        assert!(!StoreError::UnknownItem { key: "x".into() }.is_transient());
    }

    #[test]
    fn test_display() {
        let err = StoreError::Api {
            code: "cart_invalid_product".into(),
            message: "Product does not exist".into(),
        };
        assert_eq!(
            err.to_string(),
            "store error [cart_invalid_product]: Product does not exist"
        );
    }
}
