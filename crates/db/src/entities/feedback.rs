//! Feedback entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Anonymous feedback left through the public form.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "feedback")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub name: String,

    pub phone: String,

    #[sea_orm(column_type = "Text")]
    pub content: String,

    pub is_read: bool,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
