//! Transport-facing types: errors and the inbound message shape.

use thiserror::Error;

/// Errors from channel operations.
#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    Api(String),

    #[error("channel shut down")]
    Shutdown,
}

/// An inbound text message from the transport.
///
/// The poller forwards every text message regardless of origin chat;
/// authorization happens in the command router.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    /// Identifier of the chat the message came from (also the reply target).
    pub chat_id: i64,
    /// Raw message text, command marker included.
    pub text: String,
}
