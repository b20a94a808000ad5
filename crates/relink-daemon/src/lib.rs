//! relink daemon: Telegram-driven redirect registry.
//!
//! Admins map short group identifiers to target URLs; anyone resolves
//! them back. Mappings live in Redis under `group:<id>` keys.
//!
//! # Architecture
//!
//! - [`registry::RedirectRegistry`]: semantic layer over the key-value
//!   store — namespacing, overwrite/delete semantics, list display policy.
//! - [`commands`]: command parsing, authorization, and dispatch.
//! - [`service`]: wiring — store, registry, router, Telegram poller, and
//!   the sequential dispatch loop.

pub mod commands;
pub mod registry;
pub mod service;
