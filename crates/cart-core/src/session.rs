//! # Session Credentials
//!
//! Proof of an anonymous, server-recognized cart session. The store hands
//! out a cart token and an anti-forgery nonce via response headers; the
//! gateway mirrors them here and writes them through to persistent
//! storage after every response carrying fresh values.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// How long a persisted cart session stays resumable, in seconds
pub const SESSION_TTL_SECS: i64 = 3600 * 48;

/// Header credentials attached to every store request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionCredentials {
    /// Cart token identifying the anonymous session
    pub token: Option<String>,

    /// Anti-forgery nonce required alongside the token on mutations
    pub nonce: Option<String>,
}

impl SessionCredentials {
    /// True when the server has not yet issued any credentials
    pub fn is_empty(&self) -> bool {
        self.token.is_none() && self.nonce.is_none()
    }
}

/// The persisted form of a cart session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSession {
    pub token: Option<String>,
    pub nonce: Option<String>,

    /// When this session stops being resumable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl StoredSession {
    /// A brand-new anonymous session with a full expiry window
    pub fn fresh(now: DateTime<Utc>) -> Self {
        Self {
            token: None,
            nonce: None,
            expires_at: Some(now + Duration::seconds(SESSION_TTL_SECS)),
        }
    }

    /// A session with no expiry on record is treated as expired.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        match self.expires_at {
            Some(expires_at) => now > expires_at,
            None => true,
        }
    }

    /// The live header credentials carried by this record
    pub fn credentials(&self) -> SessionCredentials {
        SessionCredentials {
            token: self.token.clone(),
            nonce: self.nonce.clone(),
        }
    }
}
