//! Unit repository.

use std::sync::Arc;

use crate::entities::{Unit, unit};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use unitvisit_common::{AppError, AppResult};

/// Unit repository for database operations.
#[derive(Clone)]
pub struct UnitRepository {
    db: Arc<DatabaseConnection>,
}

impl UnitRepository {
    /// Create a new unit repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a unit by its code.
    pub async fn find_by_code(&self, code: &str) -> AppResult<Option<unit::Model>> {
        Unit::find()
            .filter(unit::Column::Code.eq(code))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a unit by code, returning an error if not found.
    pub async fn get_by_code(&self, code: &str) -> AppResult<unit::Model> {
        self.find_by_code(code)
            .await?
            .ok_or_else(|| AppError::UnitNotFound(code.to_string()))
    }

    /// List all units ordered by code.
    pub async fn find_all(&self) -> AppResult<Vec<unit::Model>> {
        Unit::find()
            .order_by_asc(unit::Column::Code)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List main units (units with no parent).
    pub async fn find_main_units(&self) -> AppResult<Vec<unit::Model>> {
        Unit::find()
            .filter(unit::Column::ParentCode.is_null())
            .order_by_asc(unit::Column::Code)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn mock_unit(code: &str, parent: Option<&str>) -> unit::Model {
        unit::Model {
            id: format!("id-{code}"),
            code: code.to_string(),
            name: format!("Unit {code}"),
            parent_code: parent.map(String::from),
            created_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_get_by_code_returns_unit() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[mock_unit("901", None)]])
                .into_connection(),
        );

        let repo = UnitRepository::new(db);
        let unit = repo.get_by_code("901").await.unwrap();

        assert_eq!(unit.code, "901");
        assert!(unit.is_main());
    }

    #[tokio::test]
    async fn test_get_by_code_fails_for_unknown_unit() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<unit::Model>::new()])
                .into_connection(),
        );

        let repo = UnitRepository::new(db);
        let err = repo.get_by_code("999").await.unwrap_err();

        assert!(matches!(err, AppError::UnitNotFound(code) if code == "999"));
    }
}
