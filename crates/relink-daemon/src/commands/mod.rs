//! Command processing: parsing, authorization, and dispatch.
//!
//! - [`parse_command`]: inbound text → `(command name, argument tokens)`.
//! - [`is_authorized`]: the admin check, a pure function of the configured
//!   admin identity and the caller's chat id.
//! - [`router::CommandRouter`]: maps each command to its handler and
//!   renders the reply.

pub mod router;

pub use router::CommandRouter;

/// A parsed inbound command: lowercased name (marker and bot mention
/// stripped) and whitespace-split argument tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    pub name: String,
    pub args: Vec<String>,
}

/// Parse inbound message text into a command.
///
/// Returns `None` for anything that does not start with the `/` command
/// marker. Strips a `@botname` mention suffix (Telegram appends it in
/// group chats).
pub fn parse_command(text: &str) -> Option<ParsedCommand> {
    let text = text.trim();
    let marked = text.strip_prefix('/')?;

    let mut tokens = marked.split_whitespace();
    let raw_name = tokens.next()?;
    let name = raw_name.split('@').next().unwrap_or(raw_name).to_lowercase();
    if name.is_empty() {
        return None;
    }

    Some(ParsedCommand {
        name,
        args: tokens.map(String::from).collect(),
    })
}

/// Whether a caller may run an admin-only command.
///
/// True when no admin identity is configured (open authorization), or
/// when the caller's chat id matches it as a string.
pub fn is_authorized(admin_chat_id: Option<&str>, chat_id: i64) -> bool {
    match admin_chat_id {
        None => true,
        Some(admin) => admin == chat_id.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_bare_command() {
        let cmd = parse_command("/list").unwrap();
        assert_eq!(cmd.name, "list");
        assert!(cmd.args.is_empty());
    }

    #[test]
    fn parse_command_with_args() {
        let cmd = parse_command("/set 1 https://a.example").unwrap();
        assert_eq!(cmd.name, "set");
        assert_eq!(cmd.args, vec!["1", "https://a.example"]);
    }

    #[test]
    fn parse_strips_bot_mention() {
        let cmd = parse_command("/get@relink_bot 1").unwrap();
        assert_eq!(cmd.name, "get");
        assert_eq!(cmd.args, vec!["1"]);
    }

    #[test]
    fn parse_lowercases_name() {
        assert_eq!(parse_command("/LIST").unwrap().name, "list");
    }

    #[test]
    fn parse_collapses_whitespace() {
        let cmd = parse_command("  /set   1    https://a.example  ").unwrap();
        assert_eq!(cmd.args, vec!["1", "https://a.example"]);
    }

    #[test]
    fn plain_text_is_not_a_command() {
        assert!(parse_command("hello there").is_none());
        assert!(parse_command("").is_none());
        assert!(parse_command("/").is_none());
    }

    #[test]
    fn unconfigured_admin_authorizes_everyone() {
        assert!(is_authorized(None, 1));
        assert!(is_authorized(None, -42));
    }

    #[test]
    fn configured_admin_matches_by_string() {
        assert!(is_authorized(Some("777"), 777));
        assert!(!is_authorized(Some("777"), 778));
        assert!(is_authorized(Some("-100123"), -100123));
    }
}
