//! The [`KvStore`] trait and store error type.
//!
//! A [`KvStore`] implementation handles one storage backend. The daemon
//! receives its store as an injected `Arc<dyn KvStore>` so the core stays
//! testable without a live server.

use async_trait::async_trait;
use thiserror::Error;

/// Errors from store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("store returned error: {0}")]
    Server(String),

    #[error("protocol error: {0}")]
    Protocol(String),

    #[error("invalid store endpoint: {0}")]
    Endpoint(String),
}

/// A remote (or in-memory) string-keyed mapping service.
///
/// All consistency guarantees (last-write-wins on `set`, visibility of
/// concurrent writes) are delegated to the backend; no method defines a
/// timeout or retry at this layer.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Unconditional upsert.
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Fetch a value, `None` if absent.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Delete a key. No-op if absent.
    async fn delete(&self, key: &str) -> Result<(), StoreError>;

    /// List keys matching a glob pattern (e.g. `group:*`). Order is
    /// backend-defined and not guaranteed stable.
    async fn keys(&self, pattern: &str) -> Result<Vec<String>, StoreError>;
}
