//! Process configuration for the relink daemon.
//!
//! [`Config`] is read once from the environment at startup and held
//! read-only for the process lifetime. Missing required values are fatal
//! before any command handling begins.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Default public base URL used to render redirect links when
/// `PUBLIC_BASE_URL` is unset. Never dereferenced by this system.
pub const DEFAULT_BASE_URL: &str = "https://your-domain.vercel.app";

/// Default `getUpdates` long-poll timeout in seconds.
pub const DEFAULT_POLL_TIMEOUT_SECS: u64 = 30;

/// Top-level configuration for a relink daemon instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Redis endpoint, e.g. `redis://:secret@localhost:6379/0`.
    pub redis_url: String,
    /// Telegram Bot API token.
    pub bot_token: String,
    /// Chat identifier allowed to mutate mappings. `None` means every
    /// caller is authorized.
    pub admin_chat_id: Option<String>,
    /// Base URL for rendered redirect links (`<base>/group/<id>`).
    pub public_base_url: String,
    /// Long-poll timeout passed to `getUpdates`.
    pub poll_timeout_secs: u64,
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// `REDIS_URL` and `TELEGRAM_BOT_TOKEN` are required; everything else
    /// has a default.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// The indirection keeps loading testable without mutating the real
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let redis_url = lookup("REDIS_URL").ok_or(ConfigError::Missing("REDIS_URL"))?;
        let bot_token =
            lookup("TELEGRAM_BOT_TOKEN").ok_or(ConfigError::Missing("TELEGRAM_BOT_TOKEN"))?;

        let admin_chat_id = lookup("ADMIN_CHAT_ID").filter(|v| !v.is_empty());
        let public_base_url =
            lookup("PUBLIC_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(Self {
            redis_url,
            bot_token,
            admin_chat_id,
            public_base_url,
            poll_timeout_secs: DEFAULT_POLL_TIMEOUT_SECS,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn load(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let map = vars(pairs);
        Config::from_lookup(|name| map.get(name).cloned())
    }

    #[test]
    fn loads_with_required_only() {
        let config = load(&[
            ("REDIS_URL", "redis://localhost:6379"),
            ("TELEGRAM_BOT_TOKEN", "123:abc"),
        ])
        .unwrap();

        assert_eq!(config.redis_url, "redis://localhost:6379");
        assert_eq!(config.bot_token, "123:abc");
        assert!(config.admin_chat_id.is_none());
        assert_eq!(config.public_base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn missing_redis_url_is_fatal() {
        let err = load(&[("TELEGRAM_BOT_TOKEN", "123:abc")]).unwrap_err();
        assert!(err.to_string().contains("REDIS_URL"));
    }

    #[test]
    fn missing_bot_token_is_fatal() {
        let err = load(&[("REDIS_URL", "redis://localhost:6379")]).unwrap_err();
        assert!(err.to_string().contains("TELEGRAM_BOT_TOKEN"));
    }

    #[test]
    fn optional_values_are_picked_up() {
        let config = load(&[
            ("REDIS_URL", "redis://localhost:6379"),
            ("TELEGRAM_BOT_TOKEN", "123:abc"),
            ("ADMIN_CHAT_ID", "777"),
            ("PUBLIC_BASE_URL", "https://links.example.com"),
        ])
        .unwrap();

        assert_eq!(config.admin_chat_id.as_deref(), Some("777"));
        assert_eq!(config.public_base_url, "https://links.example.com");
    }

    #[test]
    fn empty_admin_chat_id_means_open_authorization() {
        let config = load(&[
            ("REDIS_URL", "redis://localhost:6379"),
            ("TELEGRAM_BOT_TOKEN", "123:abc"),
            ("ADMIN_CHAT_ID", ""),
        ])
        .unwrap();

        assert!(config.admin_chat_id.is_none());
    }
}
