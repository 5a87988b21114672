//! Bot admin factory for creating test admin list entries.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

pub struct BotAdminFactory<'a> {
    db: &'a DatabaseConnection,
    discord_id: String,
    added_by: String,
    added_at: DateTime<Utc>,
}

impl<'a> BotAdminFactory<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            discord_id: (100_000_000_000 + id).to_string(),
            added_by: "1".to_string(),
            added_at: Utc::now(),
        }
    }

    pub fn discord_id(mut self, discord_id: impl Into<String>) -> Self {
        self.discord_id = discord_id.into();
        self
    }

    pub fn added_by(mut self, added_by: impl Into<String>) -> Self {
        self.added_by = added_by.into();
        self
    }

    pub fn added_at(mut self, added_at: DateTime<Utc>) -> Self {
        self.added_at = added_at;
        self
    }

    pub async fn build(self) -> Result<entity::bot_admin::Model, DbErr> {
        entity::bot_admin::ActiveModel {
            discord_id: ActiveValue::Set(self.discord_id),
            added_by: ActiveValue::Set(self.added_by),
            added_at: ActiveValue::Set(self.added_at),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

pub async fn create_bot_admin(db: &DatabaseConnection) -> Result<entity::bot_admin::Model, DbErr> {
    BotAdminFactory::new(db).build().await
}

pub async fn create_bot_admin_with_id(
    db: &DatabaseConnection,
    discord_id: impl Into<String>,
) -> Result<entity::bot_admin::Model, DbErr> {
    BotAdminFactory::new(db).discord_id(discord_id).build().await
}
