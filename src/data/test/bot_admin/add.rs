use super::*;

/// Tests adding a new user to the admin list.
///
/// Verifies that the repository inserts the entry and records who added it.
///
/// Expected: Ok(true) and the user is listed afterwards
#[tokio::test]
async fn adds_new_admin() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::BotAdmin)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = BotAdminRepository::new(db);
    let result = repo.add(123456789, 987654321).await?;

    assert!(result);
    assert!(repo.is_admin(123456789).await?);

    let admins = repo.get_all().await.unwrap();
    assert_eq!(admins.len(), 1);
    assert_eq!(admins[0].added_by, 987654321);

    Ok(())
}

/// Tests adding a user who is already listed.
///
/// Verifies that the unique Discord ID is not duplicated and the original entry is kept.
///
/// Expected: Ok(false) with a single entry
#[tokio::test]
async fn does_not_duplicate_existing_admin() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::BotAdmin)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::bot_admin::BotAdminFactory::new(db)
        .discord_id("123456789")
        .added_by("1")
        .build()
        .await?;

    let repo = BotAdminRepository::new(db);
    let result = repo.add(123456789, 2).await?;

    assert!(!result);

    let admins = repo.get_all().await.unwrap();
    assert_eq!(admins.len(), 1);
    assert_eq!(admins[0].added_by, 1);

    Ok(())
}

/// Tests two simultaneous additions of the same user.
///
/// Verifies that the unique Discord ID conflict is absorbed instead of surfacing as a
/// database error.
///
/// Expected: both Ok, exactly one reports the insert, a single entry
#[tokio::test]
async fn concurrent_adds_insert_once() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::BotAdmin)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = BotAdminRepository::new(db);
    let (first, second) = tokio::join!(repo.add(123456789, 1), repo.add(123456789, 2));

    assert!(first? ^ second?);
    assert_eq!(repo.get_all().await.unwrap().len(), 1);

    Ok(())
}
