//! Prefix chat commands.
//!
//! Commands are plain messages starting with the configured prefix, for example
//! `!reset_count 41` or `!admin add @user`. Parsing is separate from execution so the
//! grammar can be tested without a gateway.

use serenity::utils::parse_user_mention;

use crate::error::command::CommandError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Show the counting status
    Count,
    /// Force the count to a value, bypassing validation
    ResetCount { count: u64 },
    AdminAdd { user_id: u64 },
    AdminRemove { user_id: u64 },
    AdminList,
    /// Show member and boost counts
    Stats,
    /// Refresh the statistics voice channels now
    Refresh,
}

impl Command {
    /// Whether only admins may run the command.
    pub fn requires_admin(&self) -> bool {
        !matches!(self, Command::Stats)
    }
}

/// Parses a message into a command.
///
/// # Arguments
/// - `prefix` - Configured command prefix
/// - `content` - Raw message content
///
/// # Returns
/// - `None` - Not a command, or a command this bot does not know
/// - `Some(Ok(Command))` - A well-formed command
/// - `Some(Err(CommandError))` - A known command with bad arguments
pub fn parse_command(prefix: &str, content: &str) -> Option<Result<Command, CommandError>> {
    let body = content.trim().strip_prefix(prefix)?;
    let mut words = body.split_whitespace();
    let name = words.next()?.to_lowercase();
    let args: Vec<&str> = words.collect();

    let command = match name.as_str() {
        "count" => Ok(Command::Count),
        "reset_count" => match args.first() {
            None => Ok(Command::ResetCount { count: 0 }),
            Some(raw) => raw
                .parse::<u64>()
                .map(|count| Command::ResetCount { count })
                .map_err(|_| CommandError::InvalidNumber(raw.to_string())),
        },
        "admin" => parse_admin(prefix, &args),
        "stats" => Ok(Command::Stats),
        "refresh" => Ok(Command::Refresh),
        _ => return None,
    };

    Some(command)
}

fn parse_admin(prefix: &str, args: &[&str]) -> Result<Command, CommandError> {
    let usage = || CommandError::Usage(format!("{}admin <add|rm|list> [@user]", prefix));

    match (args.first().copied(), args.get(1).copied()) {
        (Some("list"), _) => Ok(Command::AdminList),
        (Some("add"), Some(target)) => Ok(Command::AdminAdd {
            user_id: parse_user(target)?,
        }),
        (Some("rm" | "remove"), Some(target)) => Ok(Command::AdminRemove {
            user_id: parse_user(target)?,
        }),
        _ => Err(usage()),
    }
}

/// Accepts `<@id>`, `<@!id>`, or a bare user ID.
fn parse_user(raw: &str) -> Result<u64, CommandError> {
    if let Some(user_id) = parse_user_mention(raw) {
        return Ok(user_id.get());
    }

    raw.parse::<u64>()
        .ok()
        .filter(|id| *id != 0)
        .ok_or_else(|| CommandError::InvalidUser(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ignores_plain_messages() {
        assert_eq!(parse_command("!", "42"), None);
        assert_eq!(parse_command("!", "hello"), None);
        assert_eq!(parse_command("!", "!unknown"), None);
        assert_eq!(parse_command("!", "!"), None);
    }

    #[test]
    fn parses_reset_with_and_without_value() {
        assert_eq!(
            parse_command("!", "!reset_count"),
            Some(Ok(Command::ResetCount { count: 0 }))
        );
        assert_eq!(
            parse_command("!", "!reset_count 41"),
            Some(Ok(Command::ResetCount { count: 41 }))
        );
        assert_eq!(
            parse_command("!", "!reset_count minus"),
            Some(Err(CommandError::InvalidNumber("minus".to_string())))
        );
    }

    #[test]
    fn parses_admin_subcommands() {
        assert_eq!(
            parse_command("!", "!admin add <@123>"),
            Some(Ok(Command::AdminAdd { user_id: 123 }))
        );
        assert_eq!(
            parse_command("!", "!admin rm <@!456>"),
            Some(Ok(Command::AdminRemove { user_id: 456 }))
        );
        assert_eq!(
            parse_command("!", "!admin add 789"),
            Some(Ok(Command::AdminAdd { user_id: 789 }))
        );
        assert_eq!(
            parse_command("!", "!admin list"),
            Some(Ok(Command::AdminList))
        );
        assert!(matches!(
            parse_command("!", "!admin add"),
            Some(Err(CommandError::Usage(_)))
        ));
        assert!(matches!(
            parse_command("!", "!admin add someone"),
            Some(Err(CommandError::InvalidUser(_)))
        ));
    }

    #[test]
    fn honours_custom_prefix() {
        assert_eq!(parse_command("?", "?STATS"), Some(Ok(Command::Stats)));
        assert_eq!(parse_command("?", "!stats"), None);
    }

    #[test]
    fn only_stats_is_public() {
        assert!(!Command::Stats.requires_admin());
        assert!(Command::Refresh.requires_admin());
        assert!(Command::Count.requires_admin());
    }
}
