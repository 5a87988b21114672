use sea_orm::DatabaseConnection;
use serenity::{
    all::{ChannelId, Context, EventHandler, GuildId, Message, MessageId, Ready},
    async_trait,
    http::Http,
};
use std::sync::Arc;

use crate::service::{counting::CountingService, server_stats::ServerStatsService};

pub mod command;
pub mod message;
pub mod message_delete;
pub mod ready;

/// Discord bot event handler
pub struct Handler {
    pub db: DatabaseConnection,
    /// Shared REST client used for replies
    pub http: Arc<Http>,
    pub counting: Arc<CountingService>,
    pub server_stats: Arc<ServerStatsService>,
    /// The only guild the bot serves
    pub guild_id: u64,
    pub command_prefix: String,
    /// Configured bot owner with full admin rights
    pub owner_user_id: Option<u64>,
}

#[async_trait]
impl EventHandler for Handler {
    /// Called when the bot is ready and connected to Discord
    async fn ready(&self, ctx: Context, ready: Ready) {
        ready::handle_ready(self, ctx, ready).await;
    }

    /// Called when a message is sent in a channel
    async fn message(&self, ctx: Context, message: Message) {
        message::handle_message(self, ctx, message).await;
    }

    /// Called when a single message is deleted
    async fn message_delete(
        &self,
        _ctx: Context,
        channel_id: ChannelId,
        deleted_message_id: MessageId,
        guild_id: Option<GuildId>,
    ) {
        message_delete::handle_message_delete(self, channel_id, &[deleted_message_id], guild_id)
            .await;
    }

    /// Called when messages are deleted in bulk, for example by a purge
    async fn message_delete_bulk(
        &self,
        _ctx: Context,
        channel_id: ChannelId,
        multiple_deleted_messages_ids: Vec<MessageId>,
        guild_id: Option<GuildId>,
    ) {
        message_delete::handle_message_delete(
            self,
            channel_id,
            &multiple_deleted_messages_ids,
            guild_id,
        )
        .await;
    }
}
