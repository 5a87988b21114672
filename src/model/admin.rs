//! Bot admin domain model.

use chrono::{DateTime, Utc};

use crate::{error::AppError, util::parse::parse_u64_from_string};

/// A user granted counting-admin rights through the persisted admin list.
#[derive(Debug, Clone, PartialEq)]
pub struct BotAdmin {
    /// Discord ID of the admin
    pub discord_id: u64,
    /// Discord ID of the user who added them
    pub added_by: u64,
    /// When the entry was created
    pub added_at: DateTime<Utc>,
}

impl BotAdmin {
    /// Converts an entity model to the domain model at the repository boundary.
    ///
    /// # Arguments
    /// - `entity` - The entity model from the database
    ///
    /// # Returns
    /// - `Ok(BotAdmin)` - The converted domain model
    /// - `Err(AppError::InternalErr(ParseStringId))` - A stored Discord ID is not a valid u64
    pub fn from_entity(entity: entity::bot_admin::Model) -> Result<Self, AppError> {
        Ok(Self {
            discord_id: parse_u64_from_string(entity.discord_id)?,
            added_by: parse_u64_from_string(entity.added_by)?,
            added_at: entity.added_at,
        })
    }
}

/// The author of an administrative chat command, as seen from the guild.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Requester {
    pub user_id: u64,
    /// Author owns the guild
    pub is_guild_owner: bool,
    /// Author has the Administrator permission in the guild
    pub has_administrator: bool,
}
