//! Create `trackers` table with FK to `users`.
//!
//! `compare_mode` is a varchar holding one of the two closed variants;
//! `cron_expr` is stored opaque and is not executed by this service.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Trackers::Table)
                    .if_not_exists()
                    .col(uuid(Trackers::Id).primary_key())
                    .col(uuid(Trackers::UserId).not_null())
                    .col(string_len(Trackers::Name, 255).not_null())
                    .col(string_len(Trackers::CronExpr, 255).not_null())
                    .col(string_len(Trackers::CompareMode, 16).not_null())
                    .col(string_len(Trackers::WebsiteUrl, 2048).not_null())
                    .col(string_len(Trackers::Selector, 255).not_null())
                    .col(timestamp_with_time_zone(Trackers::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Trackers::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_trackers_users")
                            .from(Trackers::Table, Trackers::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Trackers::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Trackers {
    Table,
    Id,
    UserId,
    Name,
    CronExpr,
    CompareMode,
    WebsiteUrl,
    Selector,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Users { Table, Id }
