//! Bot admin service for business logic.
//!
//! Decides who may run administrative chat commands and manages the persisted admin
//! list. Admin rights come from four sources: the configured bot owner, the guild owner,
//! the guild's Administrator permission, and the bot admin list. Only the first three
//! may change the list.

use dioxus_logger::tracing;
use sea_orm::DatabaseConnection;

use crate::{
    data::bot_admin::BotAdminRepository,
    error::{auth::AuthError, AppError},
    model::admin::{BotAdmin, Requester},
};

pub struct AdminService<'a> {
    db: &'a DatabaseConnection,
    owner_user_id: Option<u64>,
}

impl<'a> AdminService<'a> {
    /// Creates a new AdminService instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    /// - `owner_user_id` - Configured bot owner, if any
    ///
    /// # Returns
    /// - `AdminService` - New service instance
    pub fn new(db: &'a DatabaseConnection, owner_user_id: Option<u64>) -> Self {
        Self { db, owner_user_id }
    }

    /// Whether the requester may add or remove bot admins.
    pub fn can_manage_admins(&self, requester: &Requester) -> bool {
        self.owner_user_id == Some(requester.user_id)
            || requester.is_guild_owner
            || requester.has_administrator
    }

    /// Checks whether the requester may run administrative commands.
    ///
    /// The admin list is only queried when none of the guild-level rights apply.
    ///
    /// # Arguments
    /// - `requester` - Author of the command
    ///
    /// # Returns
    /// - `Ok(true)` - Requester is the owner, a guild administrator, or a listed admin
    /// - `Ok(false)` - Requester has no admin rights
    /// - `Err(AppError::DbErr)` - Database error during the list lookup
    pub async fn is_authorized(&self, requester: &Requester) -> Result<bool, AppError> {
        if self.can_manage_admins(requester) {
            return Ok(true);
        }

        let listed = BotAdminRepository::new(self.db)
            .is_admin(requester.user_id)
            .await?;

        Ok(listed)
    }

    /// Adds a user to the bot admin list.
    ///
    /// # Arguments
    /// - `requester` - Author of the command
    /// - `target_id` - Discord ID of the user to add
    ///
    /// # Returns
    /// - `Ok(true)` - The user was added
    /// - `Ok(false)` - The user was already listed
    /// - `Err(AppError::AuthErr(CannotManageAdmins))` - Requester may not change the list
    /// - `Err(AppError::DbErr)` - Database error
    pub async fn add(&self, requester: &Requester, target_id: u64) -> Result<bool, AppError> {
        if !self.can_manage_admins(requester) {
            return Err(AuthError::CannotManageAdmins.into());
        }

        let added = BotAdminRepository::new(self.db)
            .add(target_id, requester.user_id)
            .await?;

        if added {
            tracing::info!("User {} added {} as bot admin", requester.user_id, target_id);
        }

        Ok(added)
    }

    /// Removes a user from the bot admin list.
    ///
    /// # Arguments
    /// - `requester` - Author of the command
    /// - `target_id` - Discord ID of the user to remove
    ///
    /// # Returns
    /// - `Ok(true)` - The user was removed
    /// - `Ok(false)` - The user was not listed
    /// - `Err(AppError::AuthErr(CannotManageAdmins))` - Requester may not change the list
    /// - `Err(AppError::DbErr)` - Database error
    pub async fn remove(&self, requester: &Requester, target_id: u64) -> Result<bool, AppError> {
        if !self.can_manage_admins(requester) {
            return Err(AuthError::CannotManageAdmins.into());
        }

        let removed = BotAdminRepository::new(self.db).remove(target_id).await?;

        if removed {
            tracing::info!(
                "User {} removed {} from bot admins",
                requester.user_id,
                target_id
            );
        }

        Ok(removed)
    }

    /// Lists the persisted bot admins, oldest first.
    pub async fn list(&self) -> Result<Vec<BotAdmin>, AppError> {
        BotAdminRepository::new(self.db).get_all().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::{builder::TestBuilder, factory};

    const OWNER: u64 = 1;

    fn member(user_id: u64) -> Requester {
        Requester {
            user_id,
            is_guild_owner: false,
            has_administrator: false,
        }
    }

    /// Tests each source of admin rights.
    ///
    /// Verifies that the configured owner, the guild owner, guild administrators, and
    /// listed users are authorized while other members are not.
    ///
    /// Expected: only the plain member is refused
    #[tokio::test]
    async fn authorizes_every_admin_source() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_admin_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        factory::bot_admin::create_bot_admin_with_id(db, "40").await?;

        let service = AdminService::new(db, Some(OWNER));

        let guild_owner = Requester {
            is_guild_owner: true,
            ..member(20)
        };
        let administrator = Requester {
            has_administrator: true,
            ..member(30)
        };

        assert!(service.is_authorized(&member(OWNER)).await?);
        assert!(service.is_authorized(&guild_owner).await?);
        assert!(service.is_authorized(&administrator).await?);
        assert!(service.is_authorized(&member(40)).await?);
        assert!(!service.is_authorized(&member(50)).await?);

        Ok(())
    }

    /// Tests that listed admins cannot change the admin list.
    ///
    /// Expected: Err(AuthError::CannotManageAdmins) and no new entry
    #[tokio::test]
    async fn listed_admin_cannot_add_admins() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_admin_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        factory::bot_admin::create_bot_admin_with_id(db, "40").await?;

        let service = AdminService::new(db, Some(OWNER));
        let result = service.add(&member(40), 50).await;

        assert!(matches!(
            result,
            Err(AppError::AuthErr(AuthError::CannotManageAdmins))
        ));
        assert_eq!(service.list().await?.len(), 1);

        Ok(())
    }

    /// Tests the owner adding and removing an admin.
    ///
    /// Expected: added once, removed once, list empty afterwards
    #[tokio::test]
    async fn owner_manages_admin_list() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_admin_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let service = AdminService::new(db, Some(OWNER));
        let owner = member(OWNER);

        assert!(service.add(&owner, 50).await?);
        assert!(!service.add(&owner, 50).await?);

        let admins = service.list().await?;
        assert_eq!(admins.len(), 1);
        assert_eq!(admins[0].discord_id, 50);
        assert_eq!(admins[0].added_by, OWNER);

        assert!(service.remove(&owner, 50).await?);
        assert!(!service.remove(&owner, 50).await?);
        assert!(service.list().await?.is_empty());

        Ok(())
    }
}
