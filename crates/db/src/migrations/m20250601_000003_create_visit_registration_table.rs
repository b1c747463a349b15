//! Create visit registration table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(VisitRegistration::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(VisitRegistration::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(VisitRegistration::RegistrationCode)
                            .string_len(7)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(VisitRegistration::SoldierName)
                            .string_len(256)
                            .not_null(),
                    )
                    .col(ColumnDef::new(VisitRegistration::UnitCode).string_len(32).not_null())
                    .col(
                        ColumnDef::new(VisitRegistration::MainUnitCode)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(VisitRegistration::RelativeName)
                            .string_len(256)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(VisitRegistration::Relationship)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(ColumnDef::new(VisitRegistration::VisitDate).date().not_null())
                    .col(ColumnDef::new(VisitRegistration::Province).string_len(128).not_null())
                    .col(ColumnDef::new(VisitRegistration::Ward).string_len(128).not_null())
                    .col(
                        ColumnDef::new(VisitRegistration::NumberOfVisitors)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(VisitRegistration::VehicleType)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(ColumnDef::new(VisitRegistration::VehicleCount).integer().not_null())
                    .col(
                        ColumnDef::new(VisitRegistration::PhoneNumber)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(VisitRegistration::Status)
                            .string_len(16)
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(VisitRegistration::AdminNotes).text())
                    .col(ColumnDef::new(VisitRegistration::ReviewedById).string_len(32))
                    .col(ColumnDef::new(VisitRegistration::ReviewedAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(VisitRegistration::SubmittedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Unique index: registration_code (guards against duplicate codes
        // under concurrent submissions)
        manager
            .create_index(
                Index::create()
                    .name("idx_visit_registration_code")
                    .table(VisitRegistration::Table)
                    .col(VisitRegistration::RegistrationCode)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Index: (main_unit_code, status) for the admin listing
        manager
            .create_index(
                Index::create()
                    .name("idx_visit_registration_main_unit_status")
                    .table(VisitRegistration::Table)
                    .col(VisitRegistration::MainUnitCode)
                    .col(VisitRegistration::Status)
                    .to_owned(),
            )
            .await?;

        // Index: reviewed_at for monthly statistics
        manager
            .create_index(
                Index::create()
                    .name("idx_visit_registration_reviewed_at")
                    .table(VisitRegistration::Table)
                    .col(VisitRegistration::ReviewedAt)
                    .to_owned(),
            )
            .await?;

        // Index: visit_date for the admin date-range filter
        manager
            .create_index(
                Index::create()
                    .name("idx_visit_registration_visit_date")
                    .table(VisitRegistration::Table)
                    .col(VisitRegistration::VisitDate)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(VisitRegistration::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum VisitRegistration {
    Table,
    Id,
    RegistrationCode,
    SoldierName,
    UnitCode,
    MainUnitCode,
    RelativeName,
    Relationship,
    VisitDate,
    Province,
    Ward,
    NumberOfVisitors,
    VehicleType,
    VehicleCount,
    PhoneNumber,
    Status,
    AdminNotes,
    ReviewedById,
    ReviewedAt,
    SubmittedAt,
}
