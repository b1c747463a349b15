//! Authentication endpoints.

use axum::{Json, Router, extract::State, routing::post};
use serde::{Deserialize, Serialize};
use unitvisit_common::AppResult;
use unitvisit_db::entities::user::UserRole;

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// Signin request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SigninRequest {
    pub phone: String,
    pub password: String,
}

/// Signin response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SigninResponse {
    pub id: String,
    pub name: String,
    pub role: UserRole,
    pub unit_code: Option<String>,
    pub token: String,
}

/// Sign in with phone number and password.
async fn signin(
    State(state): State<AppState>,
    Json(req): Json<SigninRequest>,
) -> AppResult<ApiResponse<SigninResponse>> {
    let user = state
        .account_service
        .authenticate(&req.phone, &req.password)
        .await?;

    Ok(ApiResponse::ok(SigninResponse {
        id: user.id,
        name: user.name,
        role: user.role,
        unit_code: user.unit_code,
        token: user.token.unwrap_or_default(),
    }))
}

/// Signout response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignoutResponse {
    pub ok: bool,
}

/// Sign out, invalidating the current token.
async fn signout(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<SignoutResponse>> {
    state.account_service.sign_out(user).await?;

    Ok(ApiResponse::ok(SignoutResponse { ok: true }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/signin", post(signin))
        .route("/signout", post(signout))
}
