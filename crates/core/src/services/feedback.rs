//! Public feedback inbox.

use chrono::Utc;
use sea_orm::Set;
use serde::Deserialize;
use unitvisit_common::{AppResult, IdGenerator};
use unitvisit_db::{entities::feedback, repositories::FeedbackRepository};
use validator::Validate;

/// Input for an anonymous feedback submission.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitFeedbackInput {
    #[validate(length(min = 1, max = 256))]
    pub name: String,

    #[validate(length(min = 1, max = 32))]
    pub phone: String,

    #[validate(length(min = 1, max = 4000))]
    pub content: String,
}

/// Collects public feedback and tracks which entries were read.
#[derive(Clone)]
pub struct FeedbackService {
    feedback_repo: FeedbackRepository,
    id_gen: IdGenerator,
}

impl FeedbackService {
    /// Create a new feedback service.
    #[must_use]
    pub const fn new(feedback_repo: FeedbackRepository) -> Self {
        Self {
            feedback_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Submit a feedback entry.
    pub async fn submit(&self, input: SubmitFeedbackInput) -> AppResult<feedback::Model> {
        input.validate()?;

        let model = feedback::ActiveModel {
            id: Set(self.id_gen.generate()),
            name: Set(input.name),
            phone: Set(input.phone),
            content: Set(input.content),
            is_read: Set(false),
            created_at: Set(Utc::now().into()),
        };

        self.feedback_repo.create(model).await
    }

    /// List all feedback, newest first.
    pub async fn list(&self) -> AppResult<Vec<feedback::Model>> {
        self.feedback_repo.find_all().await
    }

    /// Set the read flag on a feedback entry.
    pub async fn mark_read(&self, id: &str, read: bool) -> AppResult<feedback::Model> {
        let entry = self.feedback_repo.get_by_id(id).await?;

        let mut model: feedback::ActiveModel = entry.into();
        model.is_read = Set(read);

        self.feedback_repo.update(model).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;
    use unitvisit_common::AppError;

    fn mock_feedback(id: &str, is_read: bool) -> feedback::Model {
        feedback::Model {
            id: id.to_string(),
            name: "Nguyễn Văn B".to_string(),
            phone: "0912345678".to_string(),
            content: "Cổng đăng ký rất tiện lợi".to_string(),
            is_read,
            created_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_submit_rejects_empty_content() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let service = FeedbackService::new(FeedbackRepository::new(db));

        let err = service
            .submit(SubmitFeedbackInput {
                name: "Nguyễn Văn B".to_string(),
                phone: "0912345678".to_string(),
                content: String::new(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_submit_creates_unread_entry() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[mock_feedback("fb1", false)]])
                .into_connection(),
        );
        let service = FeedbackService::new(FeedbackRepository::new(db));

        let entry = service
            .submit(SubmitFeedbackInput {
                name: "Nguyễn Văn B".to_string(),
                phone: "0912345678".to_string(),
                content: "Cổng đăng ký rất tiện lợi".to_string(),
            })
            .await
            .unwrap();

        assert!(!entry.is_read);
    }

    #[tokio::test]
    async fn test_mark_read_flips_flag() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[mock_feedback("fb1", false)]])
                .append_query_results([[mock_feedback("fb1", true)]])
                .into_connection(),
        );
        let service = FeedbackService::new(FeedbackRepository::new(db));

        let entry = service.mark_read("fb1", true).await.unwrap();
        assert!(entry.is_read);
    }

    #[tokio::test]
    async fn test_mark_read_fails_for_missing_entry() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<feedback::Model>::new()])
                .into_connection(),
        );
        let service = FeedbackService::new(FeedbackRepository::new(db));

        assert!(service.mark_read("missing", true).await.is_err());
    }
}
