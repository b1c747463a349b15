//! Visit registration entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Review status of a visit registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[derive(Default)]
pub enum RegistrationStatus {
    #[sea_orm(string_value = "pending")]
    #[default]
    Pending,
    #[sea_orm(string_value = "approved")]
    Approved,
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

/// Vehicle the visiting party arrives with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum VehicleType {
    #[sea_orm(string_value = "car")]
    #[default]
    Car,
    #[sea_orm(string_value = "motorbike")]
    Motorbike,
}

/// A relative's request to visit a soldier.
///
/// The submission payload is immutable once created; only the review fields
/// (`status`, `admin_notes`, `reviewed_by_id`, `reviewed_at`) change.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "visit_registration")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// 7-character public lookup key, unique across all registrations
    #[sea_orm(unique)]
    pub registration_code: String,

    pub soldier_name: String,

    /// Unit named on the form (may be a sub-unit)
    pub unit_code: String,

    /// Top-level unit; authorization partition key for reviewers
    pub main_unit_code: String,

    pub relative_name: String,

    pub relationship: String,

    pub visit_date: Date,

    pub province: String,

    pub ward: String,

    pub number_of_visitors: i32,

    pub vehicle_type: VehicleType,

    pub vehicle_count: i32,

    pub phone_number: String,

    pub status: RegistrationStatus,

    /// Reviewer note, set on review
    #[sea_orm(column_type = "Text", nullable)]
    pub admin_notes: Option<String>,

    /// Admin who reviewed the request
    #[sea_orm(nullable)]
    pub reviewed_by_id: Option<String>,

    #[sea_orm(nullable)]
    pub reviewed_at: Option<DateTimeWithTimeZone>,

    pub submitted_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::unit::Entity",
        from = "Column::UnitCode",
        to = "super::unit::Column::Code"
    )]
    Unit,
    #[sea_orm(
        belongs_to = "super::unit::Entity",
        from = "Column::MainUnitCode",
        to = "super::unit::Column::Code"
    )]
    MainUnit,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::ReviewedById",
        to = "super::user::Column::Id"
    )]
    Reviewer,
}

impl Related<super::unit::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Unit.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
