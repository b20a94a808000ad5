//! Long-polling loop for Telegram Bot API `getUpdates`.
//!
//! Forwards every inbound text message as an [`InboundMessage`] through
//! an mpsc channel. Messages from any chat are forwarded; authorization
//! is the command router's concern, not the transport's.

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

use crate::channel::InboundMessage;

use super::api::TelegramApi;

/// Run the long-polling loop until the cancellation token fires.
///
/// The offset is advanced past every received update so the API
/// considers it acknowledged. Transport failures back off exponentially
/// (1s doubling, capped at 60s) and never terminate the loop.
pub async fn poll_loop(
    api: Arc<TelegramApi>,
    poll_timeout: u64,
    message_tx: mpsc::Sender<InboundMessage>,
    mut cancel: watch::Receiver<bool>,
) {
    let mut offset: Option<i64> = None;
    let mut backoff_secs = 1u64;

    info!("Telegram poller started");

    loop {
        if *cancel.borrow() {
            info!("Telegram poller shutting down");
            return;
        }

        let updates = tokio::select! {
            result = api.get_updates(offset, poll_timeout) => result,
            _ = cancel.changed() => {
                info!("Telegram poller cancelled");
                return;
            }
        };

        match updates {
            Ok(updates) => {
                backoff_secs = 1; // Reset backoff on success

                for update in updates {
                    // Advance offset to acknowledge this update
                    offset = Some(update.update_id + 1);

                    let Some(msg) = update.message else { continue };
                    let Some(text) = msg.text else {
                        debug!(chat_id = msg.chat.id, "ignoring non-text message");
                        continue;
                    };

                    let inbound = InboundMessage {
                        chat_id: msg.chat.id,
                        text,
                    };
                    if message_tx.send(inbound).await.is_err() {
                        warn!("message channel closed, stopping poller");
                        return;
                    }
                }
            }
            Err(e) => {
                warn!(error = %e, backoff_secs, "getUpdates failed, backing off");
                tokio::time::sleep(std::time::Duration::from_secs(backoff_secs)).await;
                backoff_secs = (backoff_secs * 2).min(60);
            }
        }
    }
}
