//! Raw HTTP calls to the Telegram Bot API.
//!
//! Wraps reqwest for `sendMessage` and `getUpdates`. All methods return
//! typed responses; non-`ok` API envelopes become [`ChannelError::Api`].

use reqwest::Client;
use serde_json::json;
use tracing::{debug, warn};

use crate::channel::ChannelError;

use super::types::{ApiResponse, SentMessage, Update};

/// Low-level Telegram Bot API client.
pub struct TelegramApi {
    client: Client,
    base_url: String,
}

impl TelegramApi {
    /// Create a new API client for the given bot token.
    pub fn new(bot_token: &str) -> Self {
        Self::with_base_url(bot_token, "https://api.telegram.org")
    }

    /// Create a new API client with a custom base URL (for testing).
    pub fn with_base_url(bot_token: &str, base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: format!("{}/bot{}", base_url.trim_end_matches('/'), bot_token),
        }
    }

    /// Send a text message to a chat.
    ///
    /// Returns the sent message's ID on success.
    pub async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        parse_mode: Option<&str>,
    ) -> Result<i64, ChannelError> {
        let mut body = json!({
            "chat_id": chat_id,
            "text": text,
        });

        if let Some(mode) = parse_mode {
            body["parse_mode"] = json!(mode);
        }

        debug!("sendMessage to chat_id={chat_id}");

        let resp = self
            .client
            .post(format!("{}/sendMessage", self.base_url))
            .json(&body)
            .send()
            .await?;

        let api_resp: ApiResponse<SentMessage> = resp.json().await?;
        if !api_resp.ok {
            let desc = api_resp.description.unwrap_or_default();
            warn!("sendMessage failed: {desc}");
            return Err(ChannelError::Api(desc));
        }

        Ok(api_resp.result.map(|m| m.message_id).unwrap_or(0))
    }

    /// Long-poll for new updates.
    ///
    /// `offset` should be set to `last_update_id + 1` to acknowledge
    /// previously received updates.
    pub async fn get_updates(
        &self,
        offset: Option<i64>,
        timeout: u64,
    ) -> Result<Vec<Update>, ChannelError> {
        let mut body = json!({
            "timeout": timeout,
            "allowed_updates": ["message"],
        });

        if let Some(off) = offset {
            body["offset"] = json!(off);
        }

        let resp = self
            .client
            .post(format!("{}/getUpdates", self.base_url))
            .json(&body)
            .send()
            .await?;

        let api_resp: ApiResponse<Vec<Update>> = resp.json().await?;
        if !api_resp.ok {
            let desc = api_resp.description.unwrap_or_default();
            warn!("getUpdates failed: {desc}");
            return Err(ChannelError::Api(desc));
        }

        Ok(api_resp.result.unwrap_or_default())
    }
}
