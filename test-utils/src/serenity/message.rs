//! Test factory for creating Serenity Message objects.

use chrono::{DateTime, TimeZone, Utc};
use serde_json::{json, Value};
use serenity::all::Message;

/// Builder for Serenity `Message` structs with reactions.
///
/// Defaults to a human-authored message in channel `1` posted at
/// 2025-01-01T00:00:00Z with no reactions.
pub struct TestMessageBuilder {
    message_id: u64,
    channel_id: u64,
    author_id: u64,
    author_is_bot: bool,
    content: String,
    timestamp: DateTime<Utc>,
    reactions: Vec<Value>,
}

impl TestMessageBuilder {
    pub fn new(message_id: u64, author_id: u64, content: &str) -> Self {
        Self {
            message_id,
            channel_id: 1,
            author_id,
            author_is_bot: false,
            content: content.to_string(),
            timestamp: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
            reactions: Vec::new(),
        }
    }

    pub fn channel_id(mut self, channel_id: u64) -> Self {
        self.channel_id = channel_id;
        self
    }

    pub fn bot_author(mut self, author_is_bot: bool) -> Self {
        self.author_is_bot = author_is_bot;
        self
    }

    pub fn timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Adds a unicode reaction; `me` marks it as placed by the current bot user.
    pub fn reaction(mut self, emoji: &str, me: bool) -> Self {
        self.reactions.push(json!({
            "count": 1,
            "count_details": { "burst": 0, "normal": 1 },
            "me": me,
            "me_burst": false,
            "emoji": { "id": null, "name": emoji },
            "burst_colors": [],
        }));
        self
    }

    /// # Panics
    /// - If the JSON cannot be deserialized into a Message (indicates invalid test data)
    pub fn build(self) -> Message {
        serde_json::from_value(json!({
            "id": self.message_id.to_string(),
            "channel_id": self.channel_id.to_string(),
            "author": {
                "id": self.author_id.to_string(),
                "username": format!("user{}", self.author_id),
                "discriminator": "0",
                "global_name": null,
                "avatar": null,
                "bot": self.author_is_bot,
                "system": false,
                "mfa_enabled": false,
            },
            "content": self.content,
            "timestamp": self.timestamp.to_rfc3339(),
            "edited_timestamp": null,
            "tts": false,
            "mention_everyone": false,
            "mentions": [],
            "mention_roles": [],
            "mention_channels": [],
            "attachments": [],
            "embeds": [],
            "reactions": self.reactions,
            "components": [],
            "sticker_items": [],
            "pinned": false,
            "type": 0,
            "flags": 0,
        }))
        .expect("Failed to create test message - invalid JSON structure")
    }
}
