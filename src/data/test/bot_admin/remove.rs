use super::*;

/// Tests removing a listed admin.
///
/// Expected: Ok(true) and the user is no longer listed
#[tokio::test]
async fn removes_existing_admin() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::BotAdmin)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::bot_admin::create_bot_admin_with_id(db, "123456789").await?;

    let repo = BotAdminRepository::new(db);
    let result = repo.remove(123456789).await?;

    assert!(result);
    assert!(!repo.is_admin(123456789).await?);

    Ok(())
}

/// Tests removing a user who is not listed.
///
/// Verifies that other entries are left untouched.
///
/// Expected: Ok(false)
#[tokio::test]
async fn returns_false_for_unknown_admin() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::BotAdmin)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::bot_admin::create_bot_admin_with_id(db, "111").await?;

    let repo = BotAdminRepository::new(db);
    let result = repo.remove(222).await?;

    assert!(!result);
    assert!(repo.is_admin(111).await?);

    Ok(())
}
