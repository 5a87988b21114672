use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]

pub struct Migration;

#[async_trait::async_trait]

impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(BotAdmin::Table)
                    .if_not_exists()
                    .col(pk_auto(BotAdmin::Id))
                    .col(string_uniq(BotAdmin::DiscordId))
                    .col(string(BotAdmin::AddedBy))
                    .col(timestamp_with_time_zone(BotAdmin::AddedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(BotAdmin::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]

pub enum BotAdmin {
    Table,
    Id,
    DiscordId,
    AddedBy,
    AddedAt,
}
