//! Unit entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Organizational unit. A unit without a parent is a main unit; sub-units
/// point directly at their main unit (parent chain depth is at most 1).
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "unit")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Human-assigned unit code (e.g. "901", "901-D1")
    #[sea_orm(unique)]
    pub code: String,

    /// Display name
    pub name: String,

    /// Code of the parent (main) unit; NULL for main units
    #[sea_orm(nullable)]
    pub parent_code: Option<String>,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::visit_registration::Entity")]
    Registrations,
}

impl Related<super::visit_registration::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Registrations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Whether this unit is a main (top-level) unit.
    #[must_use]
    pub const fn is_main(&self) -> bool {
        self.parent_code.is_none()
    }
}
