//! Visit registration repository.

use std::sync::Arc;

use crate::entities::{
    VisitRegistration,
    visit_registration::{self, RegistrationStatus},
};
use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder,
};
use unitvisit_common::{AppError, AppResult};

/// Filters for the admin registration listing.
#[derive(Debug, Clone, Default)]
pub struct RegistrationFilter {
    /// Restrict to a single status; `None` means all statuses.
    pub status: Option<RegistrationStatus>,
    /// Restrict to a main unit (set for unit-scoped reviewers).
    pub main_unit_code: Option<String>,
    /// Earliest visit date, inclusive.
    pub visit_from: Option<NaiveDate>,
    /// Latest visit date, inclusive.
    pub visit_to: Option<NaiveDate>,
}

/// Visit registration repository for database operations.
#[derive(Clone)]
pub struct RegistrationRepository {
    db: Arc<DatabaseConnection>,
}

impl RegistrationRepository {
    /// Create a new registration repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Whether a registration code is already taken.
    pub async fn code_exists(&self, code: &str) -> AppResult<bool> {
        let count = VisitRegistration::find()
            .filter(visit_registration::Column::RegistrationCode.eq(code))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(count > 0)
    }

    /// Find a registration by its public code.
    pub async fn find_by_code(&self, code: &str) -> AppResult<Option<visit_registration::Model>> {
        VisitRegistration::find()
            .filter(visit_registration::Column::RegistrationCode.eq(code))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a registration by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<visit_registration::Model>> {
        VisitRegistration::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a registration by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<visit_registration::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::RegistrationNotFound(id.to_string()))
    }

    /// Create a new registration.
    ///
    /// The unique index on `registration_code` is the authoritative guard
    /// against duplicate codes; a violation surfaces as `Conflict`.
    pub async fn create(
        &self,
        model: visit_registration::ActiveModel,
    ) -> AppResult<visit_registration::Model> {
        model.insert(self.db.as_ref()).await.map_err(|e| {
            let msg = e.to_string();
            if msg.contains("duplicate key") || msg.contains("UNIQUE constraint") {
                AppError::Conflict(format!("Registration code already exists: {msg}"))
            } else {
                AppError::Database(msg)
            }
        })
    }

    /// Update a registration.
    pub async fn update(
        &self,
        model: visit_registration::ActiveModel,
    ) -> AppResult<visit_registration::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List registrations matching the filter, newest submission first.
    pub async fn list(
        &self,
        filter: &RegistrationFilter,
    ) -> AppResult<Vec<visit_registration::Model>> {
        let mut query = VisitRegistration::find()
            .order_by_desc(visit_registration::Column::SubmittedAt);

        if let Some(status) = filter.status {
            query = query.filter(visit_registration::Column::Status.eq(status));
        }
        if let Some(ref main_unit_code) = filter.main_unit_code {
            query = query.filter(visit_registration::Column::MainUnitCode.eq(main_unit_code));
        }
        if let Some(from) = filter.visit_from {
            query = query.filter(visit_registration::Column::VisitDate.gte(from));
        }
        if let Some(to) = filter.visit_to {
            query = query.filter(visit_registration::Column::VisitDate.lte(to));
        }

        query
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Approved registrations reviewed within `[start, end]`, optionally
    /// scoped to a main unit. Feeds the monthly statistics reducer.
    pub async fn find_approved_reviewed_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        main_unit_code: Option<&str>,
    ) -> AppResult<Vec<visit_registration::Model>> {
        let mut query = VisitRegistration::find()
            .filter(visit_registration::Column::Status.eq(RegistrationStatus::Approved))
            .filter(visit_registration::Column::ReviewedAt.gte(start))
            .filter(visit_registration::Column::ReviewedAt.lte(end));

        if let Some(code) = main_unit_code {
            query = query.filter(visit_registration::Column::MainUnitCode.eq(code));
        }

        query
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::entities::visit_registration::VehicleType;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn mock_registration(id: &str, code: &str) -> visit_registration::Model {
        visit_registration::Model {
            id: id.to_string(),
            registration_code: code.to_string(),
            soldier_name: "Nguyễn Văn A".to_string(),
            unit_code: "901-D1".to_string(),
            main_unit_code: "901".to_string(),
            relative_name: "Nguyễn Văn B".to_string(),
            relationship: "Bố".to_string(),
            visit_date: NaiveDate::from_ymd_opt(2024, 3, 16).unwrap(),
            province: "Hà Nội".to_string(),
            ward: "Phúc Xá".to_string(),
            number_of_visitors: 2,
            vehicle_type: VehicleType::Motorbike,
            vehicle_count: 1,
            phone_number: "0912345678".to_string(),
            status: RegistrationStatus::Pending,
            admin_notes: None,
            reviewed_by_id: None,
            reviewed_at: None,
            submitted_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_code_exists_true_when_taken() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[maplit::btreemap! {
                    "num_items" => sea_orm::Value::BigInt(Some(1))
                }]])
                .into_connection(),
        );

        let repo = RegistrationRepository::new(db);
        assert!(repo.code_exists("Ab3X9kL").await.unwrap());
    }

    #[tokio::test]
    async fn test_code_exists_false_when_free() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[maplit::btreemap! {
                    "num_items" => sea_orm::Value::BigInt(Some(0))
                }]])
                .into_connection(),
        );

        let repo = RegistrationRepository::new(db);
        assert!(!repo.code_exists("Ab3X9kL").await.unwrap());
    }

    #[tokio::test]
    async fn test_find_by_code_returns_registration() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[mock_registration("reg1", "Ab3X9kL")]])
                .into_connection(),
        );

        let repo = RegistrationRepository::new(db);
        let found = repo.find_by_code("Ab3X9kL").await.unwrap();

        assert!(found.is_some());
        assert_eq!(found.unwrap().registration_code, "Ab3X9kL");
    }

    #[tokio::test]
    async fn test_get_by_id_fails_for_missing() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<visit_registration::Model>::new()])
                .into_connection(),
        );

        let repo = RegistrationRepository::new(db);
        let err = repo.get_by_id("missing").await.unwrap_err();

        assert!(matches!(err, AppError::RegistrationNotFound(_)));
    }

    #[tokio::test]
    async fn test_list_applies_filters() {
        let reg = mock_registration("reg1", "Ab3X9kL");
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[reg]])
                .into_connection(),
        );

        let repo = RegistrationRepository::new(db);
        let filter = RegistrationFilter {
            status: Some(RegistrationStatus::Pending),
            main_unit_code: Some("901".to_string()),
            visit_from: NaiveDate::from_ymd_opt(2024, 3, 1),
            visit_to: NaiveDate::from_ymd_opt(2024, 3, 31),
        };

        let results = repo.list(&filter).await.unwrap();
        assert_eq!(results.len(), 1);
    }
}
