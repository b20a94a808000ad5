//! Daemon wiring and the dispatch loop.
//!
//! Builds the store, registry, router, and Telegram client from the
//! loaded [`Config`], spawns the long-poller, then processes inbound
//! commands one at a time: each command completes and its reply is sent
//! before the next is taken. All cross-command consistency is the
//! store's concern.

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tracing::{info, warn};

use relink_channel::telegram::poller;
use relink_channel::TelegramApi;
use relink_store::RedisStore;
use relink_types::Config;

use crate::commands::CommandRouter;
use crate::registry::RedirectRegistry;

/// Telegram legacy Markdown parse mode, matching the markup used in the
/// reply texts.
const PARSE_MODE: &str = "Markdown";

/// Run the daemon until ctrl-c.
pub async fn run(config: Config) -> anyhow::Result<()> {
    let store = Arc::new(RedisStore::from_url(&config.redis_url)?);
    let registry = RedirectRegistry::new(store, config.public_base_url.clone());
    let router = CommandRouter::new(registry, config.admin_chat_id.clone());
    let api = Arc::new(TelegramApi::new(&config.bot_token));

    let (message_tx, mut message_rx) = mpsc::channel(64);
    let (cancel_tx, cancel_rx) = watch::channel(false);

    let poller_api = Arc::clone(&api);
    let poll_timeout = config.poll_timeout_secs;
    tokio::spawn(async move {
        poller::poll_loop(poller_api, poll_timeout, message_tx, cancel_rx).await;
    });

    info!("relink daemon running");

    loop {
        tokio::select! {
            inbound = message_rx.recv() => {
                let Some(inbound) = inbound else {
                    warn!("poller channel closed, stopping");
                    break;
                };
                if let Some(reply) = router.dispatch(inbound.chat_id, &inbound.text).await {
                    if let Err(e) = api
                        .send_message(inbound.chat_id, &reply, Some(PARSE_MODE))
                        .await
                    {
                        warn!(error = %e, chat_id = inbound.chat_id, "failed to send reply");
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("shutdown signal received");
                let _ = cancel_tx.send(true);
                break;
            }
        }
    }

    Ok(())
}
