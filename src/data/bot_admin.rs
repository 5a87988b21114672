//! Bot admin data repository for database operations.
//!
//! This module provides the `BotAdminRepository` for managing the persisted list of users
//! granted counting-admin rights on top of the configured owner and the guild's own
//! administrators.

use chrono::Utc;
use migration::OnConflict;
use sea_orm::{
    ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::{error::AppError, model::admin::BotAdmin};

/// Repository providing database operations for the bot admin list.
pub struct BotAdminRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> BotAdminRepository<'a> {
    /// Creates a new BotAdminRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    ///
    /// # Returns
    /// - `BotAdminRepository` - New repository instance
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Adds a user to the admin list.
    ///
    /// # Arguments
    /// - `discord_id` - Discord ID of the user to add
    /// - `added_by` - Discord ID of the user performing the change
    ///
    /// # Returns
    /// - `Ok(true)` - The user was added
    /// - `Ok(false)` - The user was already on the list, nothing changed
    /// - `Err(DbErr)` - Database error during insert
    pub async fn add(&self, discord_id: u64, added_by: u64) -> Result<bool, DbErr> {
        let inserted = entity::prelude::BotAdmin::insert(entity::bot_admin::ActiveModel {
            discord_id: ActiveValue::Set(discord_id.to_string()),
            added_by: ActiveValue::Set(added_by.to_string()),
            added_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        })
        .on_conflict(
            OnConflict::column(entity::bot_admin::Column::DiscordId)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(self.db)
        .await?;

        Ok(inserted > 0)
    }

    /// Removes a user from the admin list.
    ///
    /// # Arguments
    /// - `discord_id` - Discord ID of the user to remove
    ///
    /// # Returns
    /// - `Ok(true)` - The user was removed
    /// - `Ok(false)` - The user was not on the list
    /// - `Err(DbErr)` - Database error during delete
    pub async fn remove(&self, discord_id: u64) -> Result<bool, DbErr> {
        let result = entity::prelude::BotAdmin::delete_many()
            .filter(entity::bot_admin::Column::DiscordId.eq(discord_id.to_string()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Gets every entry of the admin list, oldest first.
    ///
    /// # Returns
    /// - `Ok(Vec<BotAdmin>)` - All admins (empty if none were added)
    /// - `Err(AppError::DbErr)` - Database error during query
    /// - `Err(AppError::InternalErr)` - A stored Discord ID is not a valid u64
    pub async fn get_all(&self) -> Result<Vec<BotAdmin>, AppError> {
        let entities = entity::prelude::BotAdmin::find()
            .order_by_asc(entity::bot_admin::Column::AddedAt)
            .order_by_asc(entity::bot_admin::Column::Id)
            .all(self.db)
            .await?;

        entities.into_iter().map(BotAdmin::from_entity).collect()
    }

    /// Checks whether a user is on the admin list.
    ///
    /// # Arguments
    /// - `discord_id` - Discord ID of the user
    ///
    /// # Returns
    /// - `Ok(true)` - The user is listed
    /// - `Ok(false)` - The user is not listed
    /// - `Err(DbErr)` - Database error during count query
    pub async fn is_admin(&self, discord_id: u64) -> Result<bool, DbErr> {
        let count = entity::prelude::BotAdmin::find()
            .filter(entity::bot_admin::Column::DiscordId.eq(discord_id.to_string()))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }
}
