//! Discord bot integration.
//!
//! The bot connects to the gateway, feeds messages from the counting channel into the
//! counting engine, forwards deletions there for anchor retraction, and answers the
//! administrative prefix commands elsewhere in the guild.
//!
//! All REST calls go through one shared `Http` client created at startup, so the
//! counting platform adapter, the voice label worker, and the statistics service share
//! Serenity's rate limiter.
//!
//! # Gateway Intents
//!
//! - `GUILDS` - Guild cache used for owner and permission checks
//! - `GUILD_MESSAGES` - Message and deletion events
//! - `GUILD_MEMBERS` - Member lookups for permission checks (privileged intent)
//! - `MESSAGE_CONTENT` - Message text for counting and commands (privileged intent)
//!
//! Both privileged intents must be enabled in the Discord Developer Portal.

pub mod command;
pub mod handler;
pub mod platform;
pub mod start;
pub mod voice_label;
