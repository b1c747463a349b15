//! Public feedback submission.

use axum::{Json, Router, extract::State, routing::post};
use serde::Serialize;
use unitvisit_common::AppResult;
use unitvisit_core::SubmitFeedbackInput;
use unitvisit_db::entities::feedback;

use crate::{middleware::AppState, response::ApiResponse};

/// Feedback response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackResponse {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub content: String,
    pub is_read: bool,
    pub created_at: String,
}

impl From<feedback::Model> for FeedbackResponse {
    fn from(entry: feedback::Model) -> Self {
        Self {
            id: entry.id,
            name: entry.name,
            phone: entry.phone,
            content: entry.content,
            is_read: entry.is_read,
            created_at: entry.created_at.to_rfc3339(),
        }
    }
}

/// Submit a feedback entry.
async fn submit(
    State(state): State<AppState>,
    Json(input): Json<SubmitFeedbackInput>,
) -> AppResult<ApiResponse<FeedbackResponse>> {
    let entry = state.feedback_service.submit(input).await?;

    Ok(ApiResponse::ok(entry.into()))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(submit))
}
