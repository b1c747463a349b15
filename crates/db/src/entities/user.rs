//! Admin user entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Role of an administrative account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[derive(Default)]
pub enum UserRole {
    /// Unit-scoped reviewer; may only act within their own main unit.
    #[sea_orm(string_value = "admin")]
    #[default]
    Admin,
    /// Global reviewer and account manager.
    #[sea_orm(string_value = "super_admin")]
    SuperAdmin,
}

/// Administrative account. The phone number is the login identity.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    #[sea_orm(unique)]
    pub phone: String,

    pub name: String,

    /// Argon2 password hash
    #[serde(skip_serializing)]
    pub password_hash: String,

    pub role: UserRole,

    /// Main-unit scope for ADMIN accounts; NULL for SUPER_ADMIN (global scope)
    #[sea_orm(nullable)]
    pub unit_code: Option<String>,

    pub is_active: bool,

    /// Bearer session token
    #[sea_orm(unique, nullable)]
    #[serde(skip_serializing)]
    pub token: Option<String>,

    pub created_at: DateTimeWithTimeZone,

    #[sea_orm(nullable)]
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Whether this account has global scope.
    #[must_use]
    pub fn is_super_admin(&self) -> bool {
        self.role == UserRole::SuperAdmin
    }
}
