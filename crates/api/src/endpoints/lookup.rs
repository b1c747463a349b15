//! Anonymous registration status lookup.

use axum::{
    Router,
    extract::{Query, State},
    routing::get,
};
use serde::{Deserialize, Serialize};
use unitvisit_common::AppResult;
use unitvisit_core::RegistrationLookup;
use unitvisit_db::entities::visit_registration::RegistrationStatus;

use crate::{middleware::AppState, response::ApiResponse};

/// Lookup request.
#[derive(Debug, Deserialize)]
pub struct LookupQuery {
    pub code: String,
}

/// Lookup response. No reviewer identity is exposed.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupResponse {
    pub registration_code: String,
    pub soldier_name: String,
    pub unit_name: String,
    pub relative_name: String,
    pub relationship: String,
    pub visit_date: String,
    pub status: RegistrationStatus,
    pub admin_notes: Option<String>,
    pub submitted_at: String,
}

impl From<RegistrationLookup> for LookupResponse {
    fn from(lookup: RegistrationLookup) -> Self {
        Self {
            registration_code: lookup.registration_code,
            soldier_name: lookup.soldier_name,
            unit_name: lookup.unit_name,
            relative_name: lookup.relative_name,
            relationship: lookup.relationship,
            visit_date: lookup.visit_date.to_string(),
            status: lookup.status,
            admin_notes: lookup.admin_notes,
            submitted_at: lookup.submitted_at.to_rfc3339(),
        }
    }
}

/// Look up a registration by its public code.
async fn lookup(
    State(state): State<AppState>,
    Query(query): Query<LookupQuery>,
) -> AppResult<ApiResponse<LookupResponse>> {
    let result = state.registration_service.lookup(&query.code).await?;

    Ok(ApiResponse::ok(result.into()))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(lookup))
}
