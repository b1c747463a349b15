//! Create unit table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Unit::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Unit::Id).string_len(32).not_null().primary_key())
                    .col(ColumnDef::new(Unit::Code).string_len(32).not_null())
                    .col(ColumnDef::new(Unit::Name).string_len(256).not_null())
                    .col(ColumnDef::new(Unit::ParentCode).string_len(32))
                    .col(
                        ColumnDef::new(Unit::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Unique index: code
        manager
            .create_index(
                Index::create()
                    .name("idx_unit_code")
                    .table(Unit::Table)
                    .col(Unit::Code)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Index: parent_code (for main-unit listing)
        manager
            .create_index(
                Index::create()
                    .name("idx_unit_parent_code")
                    .table(Unit::Table)
                    .col(Unit::ParentCode)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Unit::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Unit {
    Table,
    Id,
    Code,
    Name,
    ParentCode,
    CreatedAt,
}
