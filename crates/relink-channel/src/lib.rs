//! Telegram Bot API transport for relink.
//!
//! [`telegram::TelegramApi`] makes the raw HTTP calls; [`telegram::poller`]
//! long-polls for updates and forwards each inbound text message as an
//! [`InboundMessage`] through an mpsc channel.

pub mod channel;
pub mod telegram;

pub use channel::{ChannelError, InboundMessage};
pub use telegram::api::TelegramApi;
