//! Public visit registration submission.

use axum::{Json, Router, extract::State, routing::post};
use serde::Serialize;
use unitvisit_common::AppResult;
use unitvisit_core::SubmitRegistrationInput;
use unitvisit_db::entities::visit_registration::{self, RegistrationStatus, VehicleType};

use crate::{middleware::AppState, response::ApiResponse};

/// Registration response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationResponse {
    pub id: String,
    pub registration_code: String,
    pub soldier_name: String,
    pub unit_code: String,
    pub main_unit_code: String,
    pub relative_name: String,
    pub relationship: String,
    pub visit_date: String,
    pub province: String,
    pub ward: String,
    pub number_of_visitors: i32,
    pub vehicle_type: VehicleType,
    pub vehicle_count: i32,
    pub phone_number: String,
    pub status: RegistrationStatus,
    pub admin_notes: Option<String>,
    pub reviewed_at: Option<String>,
    pub submitted_at: String,
}

impl From<visit_registration::Model> for RegistrationResponse {
    fn from(registration: visit_registration::Model) -> Self {
        Self {
            id: registration.id,
            registration_code: registration.registration_code,
            soldier_name: registration.soldier_name,
            unit_code: registration.unit_code,
            main_unit_code: registration.main_unit_code,
            relative_name: registration.relative_name,
            relationship: registration.relationship,
            visit_date: registration.visit_date.to_string(),
            province: registration.province,
            ward: registration.ward,
            number_of_visitors: registration.number_of_visitors,
            vehicle_type: registration.vehicle_type,
            vehicle_count: registration.vehicle_count,
            phone_number: registration.phone_number,
            status: registration.status,
            admin_notes: registration.admin_notes,
            reviewed_at: registration.reviewed_at.map(|t| t.to_rfc3339()),
            submitted_at: registration.submitted_at.to_rfc3339(),
        }
    }
}

/// Submit a new visit registration.
async fn submit(
    State(state): State<AppState>,
    Json(input): Json<SubmitRegistrationInput>,
) -> AppResult<ApiResponse<RegistrationResponse>> {
    let registration = state.registration_service.submit(input).await?;

    Ok(ApiResponse::ok(registration.into()))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(submit))
}
