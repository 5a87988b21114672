use dioxus_logger::tracing;
use serenity::all::{ChannelId, GuildId, MessageId};

use super::Handler;

/// Forwards deletions in the counting channel to the counting engine.
///
/// Deleting anything but the current anchor is a no-op there, including the bot's
/// own deletions of rejected messages.
///
/// # Arguments
/// - `handler` - Event handler holding the services
/// - `channel_id` - Channel the messages were deleted from
/// - `message_ids` - Deleted messages
/// - `guild_id` - Guild of the channel, if any
pub async fn handle_message_delete(
    handler: &Handler,
    channel_id: ChannelId,
    message_ids: &[MessageId],
    guild_id: Option<GuildId>,
) {
    if guild_id.map(|id| id.get()) != Some(handler.guild_id) {
        return;
    }
    if channel_id.get() != handler.counting.channel_id() {
        return;
    }

    let ids: Vec<u64> = message_ids.iter().map(|id| id.get()).collect();

    match handler.counting.on_messages_deleted(&ids).await {
        Ok(Some(retraction)) => {
            tracing::info!(
                "Count {} retracted, restored to {}",
                retraction.retracted_count,
                retraction.restored.current_count
            );
        }
        Ok(None) => {}
        Err(e) => {
            tracing::error!("Failed to recover count after deletion: {}", e);
        }
    }
}
