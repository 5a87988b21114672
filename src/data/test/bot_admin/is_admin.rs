use super::*;

/// Tests the admin list lookup.
///
/// Expected: true for the listed user, false for anyone else
#[tokio::test]
async fn checks_admin_list_membership() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::BotAdmin)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::bot_admin::create_bot_admin_with_id(db, "123456789").await?;

    let repo = BotAdminRepository::new(db);

    assert!(repo.is_admin(123456789).await?);
    assert!(!repo.is_admin(555).await?);

    Ok(())
}
