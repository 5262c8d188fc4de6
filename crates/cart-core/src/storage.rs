//! # Session Storage
//!
//! Persistence seam for cart sessions. The gateway writes the current
//! session through this trait after every response carrying fresh
//! credentials; a session reads it back at construction to resume.
//!
//! Implementations can be backed by anything key/value shaped (browser
//! storage, a file, a database row). [`MemoryStore`] is the in-process
//! reference implementation.

use crate::session::StoredSession;
use async_trait::async_trait;
use std::sync::{Arc, Mutex, PoisonError};

/// Where cart sessions are persisted between runs
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Load the stored session, or a default record when nothing is stored
    async fn load(&self) -> StoredSession;

    /// Replace the stored session
    async fn save(&self, session: &StoredSession);
}

/// In-memory store. Clones share the same underlying record, which makes
/// gateway write-through observable from the outside.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<StoredSession>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: StoredSession) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
        }
    }

    /// Current stored record
    pub fn snapshot(&self) -> StoredSession {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn load(&self) -> StoredSession {
        self.snapshot()
    }

    async fn save(&self, session: &StoredSession) {
        *self.inner.lock().unwrap_or_else(PoisonError::into_inner) = session.clone();
    }
}
