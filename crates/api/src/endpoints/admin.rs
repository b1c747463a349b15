//! Admin dashboard endpoints.
//!
//! Everything here requires a bearer token; per-unit authorization is
//! enforced in the services.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::{get, patch},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use unitvisit_common::AppResult;
use unitvisit_core::{
    CreateAdminInput, ListQuery, MonthlySummary, ReviewInput, UpdateProfileInput,
};
use unitvisit_db::entities::{user, visit_registration::RegistrationStatus};

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

use super::feedback::FeedbackResponse;
use super::registrations::RegistrationResponse;

/// Account response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    pub id: String,
    pub phone: String,
    pub name: String,
    pub role: user::UserRole,
    pub unit_code: Option<String>,
    pub is_active: bool,
    pub created_at: String,
}

impl From<user::Model> for AccountResponse {
    fn from(user: user::Model) -> Self {
        Self {
            id: user.id,
            phone: user.phone,
            name: user.name,
            role: user.role,
            unit_code: user.unit_code,
            is_active: user.is_active,
            created_at: user.created_at.to_rfc3339(),
        }
    }
}

/// Registration listing request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListRegistrationsQuery {
    #[serde(default)]
    pub status: Option<RegistrationStatus>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

/// List registrations visible to the acting admin.
async fn list_registrations(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Query(query): Query<ListRegistrationsQuery>,
) -> AppResult<ApiResponse<Vec<RegistrationResponse>>> {
    let registrations = state
        .registration_service
        .list(
            &user,
            ListQuery {
                status: query.status,
                start_date: query.start_date,
                end_date: query.end_date,
            },
        )
        .await?;

    Ok(ApiResponse::ok(
        registrations.into_iter().map(Into::into).collect(),
    ))
}

/// Approve or reject a registration.
async fn review(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(input): Json<ReviewInput>,
) -> AppResult<ApiResponse<RegistrationResponse>> {
    let registration = state.registration_service.review(&user, input).await?;

    Ok(ApiResponse::ok(registration.into()))
}

/// Statistics request.
#[derive(Debug, Deserialize)]
pub struct StatisticsQuery {
    pub month: String,
}

/// Monthly statistics, scoped to the acting admin's unit.
async fn statistics(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Query(query): Query<StatisticsQuery>,
) -> AppResult<ApiResponse<MonthlySummary>> {
    let summary = state
        .statistics_service
        .monthly_summary_for(&user, &query.month)
        .await?;

    Ok(ApiResponse::ok(summary))
}

/// List all admin accounts. SUPER_ADMIN only.
async fn list_users(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<AccountResponse>>> {
    let accounts = state.account_service.list(&user).await?;

    Ok(ApiResponse::ok(
        accounts.into_iter().map(Into::into).collect(),
    ))
}

/// Create a unit admin account. SUPER_ADMIN only.
async fn create_user(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateAdminInput>,
) -> AppResult<ApiResponse<AccountResponse>> {
    let account = state.account_service.create_admin(&user, input).await?;

    Ok(ApiResponse::ok(account.into()))
}

/// Set-active request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetActiveRequest {
    pub user_id: String,
    pub is_active: bool,
}

/// Enable or disable an account. SUPER_ADMIN only.
async fn set_user_active(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<SetActiveRequest>,
) -> AppResult<ApiResponse<AccountResponse>> {
    let account = state
        .account_service
        .set_active(&user, &req.user_id, req.is_active)
        .await?;

    Ok(ApiResponse::ok(account.into()))
}

/// The acting admin's own profile.
async fn get_profile(AuthUser(user): AuthUser) -> ApiResponse<AccountResponse> {
    ApiResponse::ok(user.into())
}

/// Update the acting admin's own profile.
async fn update_profile(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(input): Json<UpdateProfileInput>,
) -> AppResult<ApiResponse<AccountResponse>> {
    let account = state.account_service.update_profile(&user, input).await?;

    Ok(ApiResponse::ok(account.into()))
}

/// List all units for the admin dashboard.
async fn list_units(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<super::units::UnitResponse>>> {
    let units = state.unit_service.list().await?;

    Ok(ApiResponse::ok(units.into_iter().map(Into::into).collect()))
}

/// List all feedback entries.
async fn list_feedback(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<FeedbackResponse>>> {
    let entries = state.feedback_service.list().await?;

    Ok(ApiResponse::ok(
        entries.into_iter().map(Into::into).collect(),
    ))
}

/// Mark-read request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkReadRequest {
    pub feedback_id: String,
    pub is_read: bool,
}

/// Set the read flag on a feedback entry.
async fn mark_feedback_read(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<MarkReadRequest>,
) -> AppResult<ApiResponse<FeedbackResponse>> {
    let entry = state
        .feedback_service
        .mark_read(&req.feedback_id, req.is_read)
        .await?;

    Ok(ApiResponse::ok(entry.into()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/registrations", get(list_registrations).patch(review))
        .route("/statistics", get(statistics))
        .route(
            "/users",
            get(list_users).post(create_user).patch(set_user_active),
        )
        .route("/profile", get(get_profile).patch(update_profile))
        .route("/units", get(list_units))
        .route("/feedback", get(list_feedback).patch(mark_feedback_read))
}
