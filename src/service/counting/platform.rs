//! Collaborator seams of the counting engine.
//!
//! The engine talks to the chat platform and the display surface only through these
//! traits. The Discord adapters live in `bot::platform` and `bot::voice_label`; tests
//! use in-memory fakes.

use serenity::async_trait;

use crate::{error::platform::PlatformError, model::counting::HistoryMessage};

/// Chat-platform operations the counting engine depends on.
#[async_trait]
pub trait ChatPlatform: Send + Sync {
    /// Fetches up to `limit` of the channel's most recent messages, newest first.
    async fn fetch_history(
        &self,
        channel_id: u64,
        limit: u16,
    ) -> Result<Vec<HistoryMessage>, PlatformError>;

    /// Places the success marker on an accepted message.
    async fn mark_success(&self, channel_id: u64, message_id: u64) -> Result<(), PlatformError>;

    /// Removes a rejected message.
    async fn delete_message(&self, channel_id: u64, message_id: u64)
        -> Result<(), PlatformError>;

    /// Sends a notice only the user can see, expiring on its own.
    async fn notify_user_ephemeral(&self, user_id: u64, text: &str) -> Result<(), PlatformError>;

    /// Posts a public notice in the channel.
    async fn send_notice(&self, channel_id: u64, text: &str) -> Result<(), PlatformError>;
}

/// Display surface mirroring the current count.
///
/// Publishing the same value twice must be harmless.
#[async_trait]
pub trait StatsPublisher: Send + Sync {
    async fn publish(&self, count: u64) -> Result<(), PlatformError>;
}
