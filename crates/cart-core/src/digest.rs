//! # Signed Callback Digests
//!
//! Base64-encoded HMAC-SHA256 digests, used by storefront integrations to
//! verify signed callbacks coming back from the store.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Compute the base64 HMAC-SHA256 digest of `message` under `key`.
pub fn base64_hmac_sha256(message: &str, key: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(key.as_bytes()).expect("HMAC can take key of any size");
    mac.update(message.as_bytes());
    STANDARD.encode(mac.finalize().into_bytes())
}
