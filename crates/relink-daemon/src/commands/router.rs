//! Command router: authorization, argument validation, and handlers.
//!
//! Dispatch order for mutating commands is authorization first, then
//! argument-count validation, then the store operation. Store failures
//! from any handler are rendered inline as `Error: <e>` rather than
//! propagated, so a flaky store never kills the dispatch loop.

use tracing::debug;

use relink_store::StoreError;

use crate::registry::{render_listing, RedirectRegistry};

use super::{is_authorized, parse_command};

const HELP_TEXT: &str = "🤖 *Redirect Bot Commands:*\n\n\
    /set `<id>` `<url>` - Set redirect for /group/<id>\n\
    /get `<id>` - Get current target\n\
    /del `<id>` - Delete mapping\n\
    /list - List all active redirects\n\n\
    _Example: /set 1 https://chat.whatsapp.com/ABC123_";

const NOT_AUTHORIZED: &str = "Not authorized.";

/// Routes parsed commands to handlers and renders replies.
pub struct CommandRouter {
    registry: RedirectRegistry,
    admin_chat_id: Option<String>,
}

impl CommandRouter {
    pub fn new(registry: RedirectRegistry, admin_chat_id: Option<String>) -> Self {
        Self {
            registry,
            admin_chat_id,
        }
    }

    /// Handle one inbound message, returning the reply text.
    ///
    /// `None` means no reply is owed: non-command text and unknown
    /// commands are dropped silently.
    pub async fn dispatch(&self, chat_id: i64, text: &str) -> Option<String> {
        let cmd = parse_command(text)?;

        let reply = match cmd.name.as_str() {
            "start" => HELP_TEXT.to_string(),
            "set" => self.admin_only(chat_id, self.handle_set(&cmd.args)).await,
            "get" => render(self.handle_get(&cmd.args).await),
            "del" => self.admin_only(chat_id, self.handle_del(&cmd.args)).await,
            "list" => self.admin_only(chat_id, self.handle_list()).await,
            other => {
                debug!(command = other, chat_id, "ignoring unknown command");
                return None;
            }
        };

        Some(reply)
    }

    /// Run an admin-only handler, short-circuiting unauthorized callers
    /// before any argument validation or store access.
    async fn admin_only<F>(&self, chat_id: i64, handler: F) -> String
    where
        F: std::future::Future<Output = Result<String, StoreError>>,
    {
        if !is_authorized(self.admin_chat_id.as_deref(), chat_id) {
            return NOT_AUTHORIZED.to_string();
        }
        render(handler.await)
    }

    async fn handle_set(&self, args: &[String]) -> Result<String, StoreError> {
        if args.len() < 2 {
            return Ok("Usage: /set <id> <url>".to_string());
        }

        let id = &args[0];
        // Rejoin everything after the id; URLs that split on whitespace
        // come back with single spaces.
        let url = args[1..].join(" ");

        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Ok("URL must start with http:// or https://".to_string());
        }

        self.registry.set_mapping(id, &url).await?;
        Ok(format!(
            "✅ *Saved!*\n\n🔗 {}\n➡️ {}",
            self.registry.redirect_link(id),
            url
        ))
    }

    async fn handle_get(&self, args: &[String]) -> Result<String, StoreError> {
        if args.is_empty() {
            return Ok("Usage: /get <id>".to_string());
        }

        let id = &args[0];
        match self.registry.get_mapping(id).await? {
            Some(target) => Ok(format!(
                "📋 *Group {id}:*\n\n🔗 {}\n➡️ {target}",
                self.registry.redirect_link(id)
            )),
            None => Ok(format!("❌ No mapping found for group {id}.")),
        }
    }

    async fn handle_del(&self, args: &[String]) -> Result<String, StoreError> {
        if args.is_empty() {
            return Ok("Usage: /del <id>".to_string());
        }

        let id = &args[0];
        // No existence check: deleting a missing mapping still succeeds.
        self.registry.delete_mapping(id).await?;
        Ok(format!("✅ Deleted mapping for group {id}."))
    }

    async fn handle_list(&self) -> Result<String, StoreError> {
        let listing = self.registry.list_mappings().await?;
        if listing.total == 0 {
            return Ok("No redirects set yet.".to_string());
        }
        Ok(render_listing(&listing))
    }
}

fn render(result: Result<String, StoreError>) -> String {
    match result {
        Ok(reply) => reply,
        Err(e) => format!("Error: {e}"),
    }
}
