use dioxus_logger::tracing;
use serenity::all::{Context, Message, MessageType};

use crate::model::counting::CandidateSubmission;

use super::{command, Handler};

/// Handles messages posted in the guild.
///
/// Messages in the counting channel are evaluated by the counting engine and nothing
/// else; prefix commands are only recognised in other channels. System messages and
/// messages from bots or other guilds are ignored.
///
/// # Arguments
/// - `handler` - Event handler holding the services
/// - `ctx` - Discord context for cache and member lookups
/// - `message` - The posted message
pub async fn handle_message(handler: &Handler, ctx: Context, message: Message) {
    if message.author.bot {
        return;
    }

    if !matches!(message.kind, MessageType::Regular | MessageType::InlineReply) {
        return;
    }

    let Some(guild_id) = message.guild_id else {
        return;
    };
    if guild_id.get() != handler.guild_id {
        return;
    }

    if message.channel_id.get() == handler.counting.channel_id() {
        let submission = CandidateSubmission::from_message(&message);

        if let Err(e) = handler.counting.evaluate(&submission).await {
            tracing::error!(
                "Could not evaluate message {} from {}: {}",
                message.id,
                message.author.id,
                e
            );
        }

        return;
    }

    command::handle_command(handler, &ctx, &message).await;
}
