//! Server statistics voice channels.
//!
//! Mirrors the guild's member and boost counts into the names of two locked voice
//! channels. Existing channels are reused when their name matches the statistic,
//! otherwise they are created on first setup. Discord allows only two renames per
//! channel every ten minutes, so renames are skipped while the label is unchanged.

use dioxus_logger::tracing;
use serenity::{
    all::{
        ChannelId, ChannelType, CreateChannel, EditChannel, GuildId, PermissionOverwrite,
        PermissionOverwriteType, Permissions, RoleId,
    },
    http::Http,
};
use std::{collections::HashMap, sync::Arc};
use tokio::sync::Mutex;

use crate::{
    error::AppError,
    model::stats::{GuildStats, StatKind, VoiceChannelInfo},
};

/// Voice channel currently showing a statistic.
struct StatChannel {
    channel_id: u64,
    /// Name last observed or written, used to skip redundant renames
    current_name: String,
}

/// Service maintaining the statistics voice channels of one guild.
///
/// Shared between the ready handler, the `refresh` command, and the scheduler.
pub struct ServerStatsService {
    http: Arc<Http>,
    guild_id: u64,
    channels: Mutex<HashMap<StatKind, StatChannel>>,
}

impl ServerStatsService {
    /// Creates a new ServerStatsService instance with no channels assigned yet.
    ///
    /// # Arguments
    /// - `http` - Discord HTTP client
    /// - `guild_id` - Guild whose statistics are displayed
    ///
    /// # Returns
    /// - `ServerStatsService` - New service instance
    pub fn new(http: Arc<Http>, guild_id: u64) -> Self {
        Self {
            http,
            guild_id,
            channels: Mutex::new(HashMap::new()),
        }
    }

    /// Finds or creates a voice channel for every statistic.
    ///
    /// Statistics that already have a channel are left alone, so calling this on every
    /// gateway ready is harmless. A channel that fails to be created is logged and
    /// retried on the next setup.
    ///
    /// # Returns
    /// - `Ok(())` - Every statistic was assigned a channel, or creation failures were logged
    /// - `Err(AppError::DiscordErr)` - The guild's channels could not be listed
    pub async fn setup(&self) -> Result<(), AppError> {
        let mut channels = self.channels.lock().await;
        if StatKind::ALL.iter().all(|kind| channels.contains_key(kind)) {
            return Ok(());
        }

        let voice_channels: Vec<VoiceChannelInfo> = self
            .http
            .get_channels(GuildId::new(self.guild_id))
            .await?
            .into_iter()
            .filter(|channel| channel.kind == ChannelType::Voice)
            .map(|channel| VoiceChannelInfo {
                channel_id: channel.id.get(),
                name: channel.name,
                position: channel.position,
            })
            .collect();

        let existing = assign_channels(&voice_channels);

        for kind in StatKind::ALL {
            if channels.contains_key(&kind) {
                continue;
            }

            if let Some(found) = existing.get(&kind) {
                tracing::info!(
                    "Using existing voice channel '{}' for {:?}",
                    found.name,
                    kind
                );
                channels.insert(
                    kind,
                    StatChannel {
                        channel_id: found.channel_id,
                        current_name: found.name.clone(),
                    },
                );
                continue;
            }

            match self.create_channel(kind).await {
                Ok(created) => {
                    tracing::info!("Created voice channel '{}'", created.current_name);
                    channels.insert(kind, created);
                }
                Err(e) => {
                    tracing::error!("Failed to create voice channel for {:?}: {}", kind, e);
                }
            }
        }

        Ok(())
    }

    /// Fetches the current member and boost counts from Discord.
    pub async fn fetch_stats(&self) -> Result<GuildStats, AppError> {
        let guild = self
            .http
            .get_guild_with_counts(GuildId::new(self.guild_id))
            .await?;

        Ok(GuildStats {
            member_count: guild.approximate_member_count.unwrap_or(0),
            boost_count: guild.premium_subscription_count.unwrap_or(0),
        })
    }

    /// Renames the statistics channels to the current figures.
    ///
    /// Individual rename failures are logged and do not fail the refresh.
    ///
    /// # Returns
    /// - `Ok(GuildStats)` - Figures the channels were updated to
    /// - `Err(AppError::DiscordErr)` - Channels could not be listed or figures fetched
    pub async fn refresh(&self) -> Result<GuildStats, AppError> {
        self.setup().await?;
        let stats = self.fetch_stats().await?;

        let mut channels = self.channels.lock().await;
        for (kind, channel) in channels.iter_mut() {
            let label = kind.label(stats.value(*kind));
            if channel.current_name == label {
                continue;
            }

            match ChannelId::new(channel.channel_id)
                .edit(&self.http, EditChannel::new().name(label.clone()))
                .await
            {
                Ok(_) => {
                    tracing::debug!("Renamed voice channel {} to '{}'", channel.channel_id, label);
                    channel.current_name = label;
                }
                Err(e) => {
                    tracing::warn!(
                        "Failed to rename voice channel {} for {:?}: {}",
                        channel.channel_id,
                        kind,
                        e
                    );
                }
            }
        }

        Ok(stats)
    }

    /// Creates a voice channel nobody can connect to.
    async fn create_channel(&self, kind: StatKind) -> Result<StatChannel, AppError> {
        let name = kind.label(0);
        let guild_id = GuildId::new(self.guild_id);

        // The @everyone role shares the guild's id
        let lock = PermissionOverwrite {
            allow: Permissions::empty(),
            deny: Permissions::CONNECT,
            kind: PermissionOverwriteType::Role(RoleId::new(self.guild_id)),
        };

        let channel = guild_id
            .create_channel(
                &self.http,
                CreateChannel::new(name.clone())
                    .kind(ChannelType::Voice)
                    .permissions(vec![lock]),
            )
            .await?;

        Ok(StatChannel {
            channel_id: channel.id.get(),
            current_name: name,
        })
    }
}

/// Picks an existing voice channel for each statistic.
///
/// Channels are considered in guild order; the first whose name matches a statistic
/// is taken, and a channel is never assigned to two statistics.
///
/// # Arguments
/// - `channels` - Voice channels of the guild in any order
///
/// # Returns
/// - `HashMap<StatKind, VoiceChannelInfo>` - Statistics with a matching channel
pub fn assign_channels(channels: &[VoiceChannelInfo]) -> HashMap<StatKind, VoiceChannelInfo> {
    let mut ordered: Vec<&VoiceChannelInfo> = channels.iter().collect();
    ordered.sort_by_key(|channel| (channel.position, channel.channel_id));

    let mut assigned: HashMap<StatKind, VoiceChannelInfo> = HashMap::new();
    for kind in StatKind::ALL {
        let found = ordered.iter().find(|channel| {
            kind.matches(&channel.name)
                && !assigned
                    .values()
                    .any(|taken| taken.channel_id == channel.channel_id)
        });

        if let Some(channel) = found {
            assigned.insert(kind, (*channel).clone());
        }
    }

    assigned
}

#[cfg(test)]
mod tests {
    use super::*;

    fn voice(channel_id: u64, name: &str, position: u16) -> VoiceChannelInfo {
        VoiceChannelInfo {
            channel_id,
            name: name.to_string(),
            position,
        }
    }

    /// Tests reuse of channels created by an earlier run.
    ///
    /// Expected: both statistics mapped to their labelled channels
    #[test]
    fn assigns_previously_created_channels() {
        let channels = vec![
            voice(1, "General", 0),
            voice(2, "👥 Total Members: 512", 1),
            voice(3, "🚀 Boosts: 14", 2),
        ];

        let assigned = assign_channels(&channels);

        assert_eq!(assigned[&StatKind::TotalMembers].channel_id, 2);
        assert_eq!(assigned[&StatKind::Boosts].channel_id, 3);
    }

    /// Tests that the first matching channel in guild order wins.
    ///
    /// Expected: the channel at the lower position is used
    #[test]
    fn prefers_channel_higher_in_guild_order() {
        let channels = vec![voice(9, "members old", 5), voice(4, "Members", 1)];

        let assigned = assign_channels(&channels);

        assert_eq!(assigned[&StatKind::TotalMembers].channel_id, 4);
        assert!(!assigned.contains_key(&StatKind::Boosts));
    }

    /// Tests that one channel is not used for two statistics.
    ///
    /// Expected: boosts left unassigned when the only match is taken
    #[test]
    fn does_not_share_a_channel() {
        let channels = vec![voice(1, "Members & Boosts", 0)];

        let assigned = assign_channels(&channels);

        assert_eq!(assigned[&StatKind::TotalMembers].channel_id, 1);
        assert!(!assigned.contains_key(&StatKind::Boosts));
    }
}
