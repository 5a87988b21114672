//! Execution of prefix chat commands.

use dioxus_logger::tracing;
use serenity::all::{Context, GuildId, Member, Message, UserId};

use crate::{
    bot::command::{parse_command, Command},
    error::AppError,
    model::{
        admin::{BotAdmin, Requester},
        counting::CountingStatus,
    },
    service::admin::AdminService,
};

use super::Handler;

const NOT_AUTHORIZED: &str = "❌ You need to be a bot admin to use this command.";
const INTERNAL_FAILURE: &str = "❌ Something went wrong, please try again later.";

/// Runs a prefix command and replies in the same channel.
///
/// Messages that are not commands are ignored.
///
/// # Arguments
/// - `handler` - Event handler holding the services
/// - `ctx` - Discord context for cache and member lookups
/// - `message` - Message that may hold a command
pub async fn handle_command(handler: &Handler, ctx: &Context, message: &Message) {
    let Some(parsed) = parse_command(&handler.command_prefix, &message.content) else {
        return;
    };

    let reply = match parsed {
        Err(e) => e.to_string(),
        Ok(command) => match execute(handler, ctx, message, command).await {
            Ok(reply) => reply,
            Err(AppError::AuthErr(e)) => format!("❌ {}", e),
            Err(e) => {
                tracing::error!("Failed to run command {:?}: {}", command, e);
                INTERNAL_FAILURE.to_string()
            }
        },
    };

    if let Err(e) = message.channel_id.say(&handler.http, reply).await {
        tracing::warn!("Failed to reply to command in {}: {}", message.channel_id, e);
    }
}

async fn execute(
    handler: &Handler,
    ctx: &Context,
    message: &Message,
    command: Command,
) -> Result<String, AppError> {
    let requester = resolve_requester(handler, ctx, message).await;
    let admin_service = AdminService::new(&handler.db, handler.owner_user_id);

    if command.requires_admin() && !admin_service.is_authorized(&requester).await? {
        return Ok(NOT_AUTHORIZED.to_string());
    }

    let reply = match command {
        Command::Count => format_status(&handler.counting.status().await),
        Command::ResetCount { count } => {
            let previous = handler.counting.status().await.current_count;
            let status = handler.counting.force_reset(count).await;

            tracing::info!(
                "User {} reset the count from {} to {}",
                requester.user_id,
                previous,
                count
            );

            format!(
                "🔄 Count reset from {} to {}. The next number is {}.",
                previous, status.current_count, status.next_expected
            )
        }
        Command::AdminAdd { user_id } => {
            if admin_service.add(&requester, user_id).await? {
                format!("✅ <@{}> is now a bot admin.", user_id)
            } else {
                format!("ℹ️ <@{}> is already a bot admin.", user_id)
            }
        }
        Command::AdminRemove { user_id } => {
            if admin_service.remove(&requester, user_id).await? {
                format!("✅ <@{}> is no longer a bot admin.", user_id)
            } else {
                format!("ℹ️ <@{}> is not a bot admin.", user_id)
            }
        }
        Command::AdminList => format_admin_list(&admin_service.list().await?),
        Command::Stats => {
            let stats = handler.server_stats.fetch_stats().await?;
            format!(
                "📊 Server statistics\n👥 Total Members: {}\n🚀 Boosts: {}\nStatistics channels update every 4 minutes.",
                stats.member_count, stats.boost_count
            )
        }
        Command::Refresh => {
            let stats = handler.server_stats.refresh().await?;

            tracing::info!("User {} refreshed the statistics channels", requester.user_id);

            format!(
                "🔄 Statistics channels refreshed: {} members, {} boosts.",
                stats.member_count, stats.boost_count
            )
        }
    };

    Ok(reply)
}

/// Determines the guild-level rights of the message author.
///
/// Falls back to no guild rights when the member or guild cannot be resolved; the
/// owner and the admin list still apply.
async fn resolve_requester(handler: &Handler, ctx: &Context, message: &Message) -> Requester {
    let user_id = message.author.id;

    let member = match message.member(ctx).await {
        Ok(member) => Some(member),
        Err(e) => {
            tracing::debug!("Failed to resolve member {}: {}", user_id, e);
            None
        }
    };

    let (is_guild_owner, has_administrator) =
        guild_rights(ctx, GuildId::new(handler.guild_id), user_id, member.as_ref());

    Requester {
        user_id: user_id.get(),
        is_guild_owner,
        has_administrator,
    }
}

/// Reads ownership and the Administrator permission from the guild cache.
fn guild_rights(
    ctx: &Context,
    guild_id: GuildId,
    user_id: UserId,
    member: Option<&Member>,
) -> (bool, bool) {
    let Some(guild) = ctx.cache.guild(guild_id) else {
        return (false, false);
    };

    let is_owner = guild.owner_id == user_id;
    let is_administrator = member
        .map(|member| guild.member_permissions(member).administrator())
        .unwrap_or(false);

    (is_owner, is_administrator)
}

fn format_status(status: &CountingStatus) -> String {
    let last_contributor = status
        .last_contributor_id
        .map(|id| format!("<@{}>", id))
        .unwrap_or_else(|| "nobody yet".to_string());

    let mut reply = format!(
        "🔢 Current count: {}\n➡️ Next number: {}\n👤 Last counter: {}",
        status.current_count, status.next_expected, last_contributor
    );

    if !status.initialized {
        reply.push_str("\n⚠️ The count has not been recovered from history yet.");
    }

    reply
}

fn format_admin_list(admins: &[BotAdmin]) -> String {
    if admins.is_empty() {
        return "ℹ️ No bot admins have been added.".to_string();
    }

    let lines: Vec<String> = admins
        .iter()
        .map(|admin| {
            format!(
                "• <@{}> (added by <@{}> on {})",
                admin.discord_id,
                admin.added_by,
                admin.added_at.format("%Y-%m-%d")
            )
        })
        .collect();

    format!("👑 Bot admins:\n{}", lines.join("\n"))
}
