//! Create feedback table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Feedback::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Feedback::Id).string_len(32).not_null().primary_key())
                    .col(ColumnDef::new(Feedback::Name).string_len(256).not_null())
                    .col(ColumnDef::new(Feedback::Phone).string_len(32).not_null())
                    .col(ColumnDef::new(Feedback::Content).text().not_null())
                    .col(ColumnDef::new(Feedback::IsRead).boolean().not_null().default(false))
                    .col(
                        ColumnDef::new(Feedback::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_feedback_created_at")
                    .table(Feedback::Table)
                    .col(Feedback::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Feedback::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Feedback {
    Table,
    Id,
    Name,
    Phone,
    Content,
    IsRead,
    CreatedAt,
}
