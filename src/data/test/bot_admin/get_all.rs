use super::*;
use chrono::{Duration, Utc};
use crate::error::AppError;

/// Tests listing admins on an empty list.
///
/// Expected: Ok with an empty vector
#[tokio::test]
async fn returns_empty_list() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_admin_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let admins = BotAdminRepository::new(db).get_all().await?;

    assert!(admins.is_empty());

    Ok(())
}

/// Tests listing admins in the order they were added.
///
/// Expected: Ok with the older entry first
#[tokio::test]
async fn returns_admins_oldest_first() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_admin_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    factory::bot_admin::BotAdminFactory::new(db)
        .discord_id("222")
        .added_at(now)
        .build()
        .await?;
    factory::bot_admin::BotAdminFactory::new(db)
        .discord_id("111")
        .added_at(now - Duration::hours(1))
        .build()
        .await?;

    let admins = BotAdminRepository::new(db).get_all().await?;

    let ids: Vec<u64> = admins.iter().map(|admin| admin.discord_id).collect();
    assert_eq!(ids, vec![111, 222]);

    Ok(())
}

/// Tests that a corrupted stored ID surfaces as an internal error.
///
/// Expected: Err(AppError::InternalErr)
#[tokio::test]
async fn fails_on_invalid_stored_id() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_admin_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::bot_admin::create_bot_admin_with_id(db, "not-a-snowflake").await?;

    let result = BotAdminRepository::new(db).get_all().await;

    assert!(matches!(result, Err(AppError::InternalErr(_))));

    Ok(())
}
