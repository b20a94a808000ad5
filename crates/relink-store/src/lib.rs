//! Key-value store seam for relink.
//!
//! The daemon talks to its store exclusively through the [`KvStore`]
//! trait. [`RedisStore`] is the production implementation (RESP2 over
//! TCP); [`MemoryStore`] backs tests.

pub mod kv;
pub mod memory;
pub mod redis;
pub mod resp;

pub use kv::{KvStore, StoreError};
pub use memory::MemoryStore;
pub use redis::RedisStore;
