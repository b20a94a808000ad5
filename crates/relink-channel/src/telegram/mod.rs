//! Telegram Bot API transport.
//!
//! Long-polling for inbound messages, direct HTTP calls for outbound
//! replies.

pub mod api;
pub mod poller;
pub mod types;
