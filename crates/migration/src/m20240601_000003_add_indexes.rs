//! Supporting indexes, applied after all tables exist.
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // list_by_owner scans by user_id on every request
        manager
            .create_index(
                Index::create()
                    .name("idx_trackers_user_id")
                    .table(Trackers::Table)
                    .col(Trackers::UserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_trackers_user_id").table(Trackers::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Trackers { Table, UserId }
