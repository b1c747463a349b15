//! Feedback repository.

use std::sync::Arc;

use crate::entities::{Feedback, feedback};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder};
use unitvisit_common::{AppError, AppResult};

/// Feedback repository for database operations.
#[derive(Clone)]
pub struct FeedbackRepository {
    db: Arc<DatabaseConnection>,
}

impl FeedbackRepository {
    /// Create a new feedback repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a feedback entry by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<feedback::Model> {
        Feedback::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
            .ok_or_else(|| AppError::NotFound(format!("Feedback {id}")))
    }

    /// List all feedback entries, newest first.
    pub async fn find_all(&self) -> AppResult<Vec<feedback::Model>> {
        Feedback::find()
            .order_by_desc(feedback::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new feedback entry.
    pub async fn create(&self, model: feedback::ActiveModel) -> AppResult<feedback::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a feedback entry.
    pub async fn update(&self, model: feedback::ActiveModel) -> AppResult<feedback::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
