//! Session store abstraction for cookiegate.
//!
//! Provides the [`SessionStore`] trait: the one operation the
//! authenticator needs from whatever key-value service holds session
//! records (Redis, Memcached, a database table, ...).
//!
//! Connection management, pooling, clustering, and timeouts belong to the
//! implementation. The authenticator calls [`SessionStore::get`] exactly
//! once per request and never retries.
//!
//! # Feature Flags
//!
//! - `memory` (default) — [`MemoryStore`], an in-process store for tests,
//!   demos, and single-node deployments

mod error;
#[cfg(feature = "memory")]
mod memory;

pub use error::StoreError;
#[cfg(feature = "memory")]
pub use memory::MemoryStore;

use std::future::Future;
use std::sync::Arc;

/// Default prefix prepended to a session ID to form the store key.
pub const DEFAULT_SESSION_ID_PREFIX: &str = "sess:";

/// Read access to session records by key.
///
/// # Trait bounds
///
/// - `Send + Sync` → one store handle is shared by every in-flight
///   request, possibly on different worker threads.
/// - `'static` → the handle lives as long as the process, not a request.
///
/// # Example
///
/// ```rust
/// use std::collections::HashMap;
/// use cookiegate_store::{SessionStore, StoreError};
///
/// struct Fixed(HashMap<String, Vec<u8>>);
///
/// impl SessionStore for Fixed {
///     async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
///         Ok(self.0.get(key).cloned())
///     }
/// }
/// ```
pub trait SessionStore: Send + Sync + 'static {
    /// Fetches the raw record stored under `key`.
    ///
    /// # Returns
    /// - `Ok(Some(bytes))` — the record
    /// - `Ok(None)` — no such key (a clean miss)
    /// - `Err(StoreError)` — the store could not answer
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<Vec<u8>>, StoreError>> + Send;
}

impl<S: SessionStore> SessionStore for Arc<S> {
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<Vec<u8>>, StoreError>> + Send {
        (**self).get(key)
    }
}

/// Builds the store key for a session ID.
pub fn session_key(prefix: &str, session_id: &str) -> String {
    format!("{prefix}{session_id}")
}
