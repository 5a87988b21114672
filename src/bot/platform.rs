//! Discord implementation of the counting engine's chat platform.
//!
//! Every call is bounded by the configured platform timeout so a stalled request can
//! never hold the game lock indefinitely. Rejection notices are sent as direct
//! messages and deleted again after the notice lifetime, which is the closest Discord
//! offers to an ephemeral reply for a plain channel message.

use dioxus_logger::tracing;
use serenity::{
    all::{ChannelId, CreateMessage, GetMessages, MessageId, ReactionType, UserId},
    async_trait,
    http::Http,
};
use std::{future::Future, sync::Arc, time::Duration};

use crate::{
    error::platform::PlatformError,
    model::counting::{HistoryMessage, SUCCESS_MARKER},
    service::counting::platform::ChatPlatform,
};

/// Discord allows at most this many messages per history request.
const MAX_PAGE_SIZE: usize = 100;

pub struct DiscordChatPlatform {
    http: Arc<Http>,
    /// Deadline for each individual request
    timeout: Duration,
    /// How long a direct-message notice stays before it is deleted
    notice_ttl: Duration,
}

impl DiscordChatPlatform {
    /// Creates a new DiscordChatPlatform.
    ///
    /// # Arguments
    /// - `http` - Discord HTTP client
    /// - `timeout` - Deadline for each individual request
    /// - `notice_ttl` - Lifetime of direct-message notices
    ///
    /// # Returns
    /// - `DiscordChatPlatform` - New platform adapter
    pub fn new(http: Arc<Http>, timeout: Duration, notice_ttl: Duration) -> Self {
        Self {
            http,
            timeout,
            notice_ttl,
        }
    }

    async fn bounded<T, F>(&self, operation: &'static str, request: F) -> Result<T, PlatformError>
    where
        F: Future<Output = Result<T, serenity::Error>>,
    {
        match tokio::time::timeout(self.timeout, request).await {
            Ok(result) => Ok(result?),
            Err(_) => Err(PlatformError::Timeout {
                operation,
                after: self.timeout,
            }),
        }
    }
}

#[async_trait]
impl ChatPlatform for DiscordChatPlatform {
    /// Fetches history in pages of up to 100 messages, walking backwards from the newest.
    async fn fetch_history(
        &self,
        channel_id: u64,
        limit: u16,
    ) -> Result<Vec<HistoryMessage>, PlatformError> {
        let channel = ChannelId::new(channel_id);
        let limit = limit as usize;

        let mut history = Vec::with_capacity(limit);
        let mut before: Option<MessageId> = None;

        while history.len() < limit {
            let page_size = (limit - history.len()).min(MAX_PAGE_SIZE);

            let mut request = GetMessages::new().limit(page_size as u8);
            if let Some(before) = before {
                request = request.before(before);
            }

            let page = self
                .bounded("fetch_history", channel.messages(&self.http, request))
                .await?;

            let Some(oldest) = page.last() else {
                break;
            };
            before = Some(oldest.id);

            let exhausted = page.len() < page_size;
            history.extend(page.iter().map(HistoryMessage::from_message));

            if exhausted {
                break;
            }
        }

        tracing::debug!(
            "Fetched {} messages of history from channel {}",
            history.len(),
            channel_id
        );

        Ok(history)
    }

    async fn mark_success(&self, channel_id: u64, message_id: u64) -> Result<(), PlatformError> {
        let marker = ReactionType::Unicode(SUCCESS_MARKER.to_string());

        self.bounded(
            "mark_success",
            self.http.create_reaction(
                ChannelId::new(channel_id),
                MessageId::new(message_id),
                &marker,
            ),
        )
        .await
    }

    async fn delete_message(
        &self,
        channel_id: u64,
        message_id: u64,
    ) -> Result<(), PlatformError> {
        self.bounded(
            "delete_message",
            self.http.delete_message(
                ChannelId::new(channel_id),
                MessageId::new(message_id),
                None,
            ),
        )
        .await
    }

    async fn notify_user_ephemeral(&self, user_id: u64, text: &str) -> Result<(), PlatformError> {
        let dm = self
            .bounded(
                "notify_user_ephemeral",
                UserId::new(user_id).create_dm_channel(&self.http),
            )
            .await?;

        let sent = self
            .bounded(
                "notify_user_ephemeral",
                dm.send_message(&self.http, CreateMessage::new().content(text)),
            )
            .await?;

        let http = self.http.clone();
        let ttl = self.notice_ttl;
        tokio::spawn(async move {
            tokio::time::sleep(ttl).await;

            if let Err(e) = http.delete_message(sent.channel_id, sent.id, None).await {
                tracing::debug!("Failed to expire notice {} for user {}: {}", sent.id, user_id, e);
            }
        });

        Ok(())
    }

    async fn send_notice(&self, channel_id: u64, text: &str) -> Result<(), PlatformError> {
        self.bounded(
            "send_notice",
            ChannelId::new(channel_id).send_message(&self.http, CreateMessage::new().content(text)),
        )
        .await?;

        Ok(())
    }
}
