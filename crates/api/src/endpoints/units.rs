//! Public unit directory.

use axum::{Router, extract::State, routing::get};
use serde::Serialize;
use unitvisit_common::AppResult;
use unitvisit_db::entities::unit;

use crate::{middleware::AppState, response::ApiResponse};

/// Unit response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitResponse {
    pub code: String,
    pub name: String,
    pub parent_code: Option<String>,
}

impl From<unit::Model> for UnitResponse {
    fn from(unit: unit::Model) -> Self {
        Self {
            code: unit.code,
            name: unit.name,
            parent_code: unit.parent_code,
        }
    }
}

/// List all units.
async fn list(State(state): State<AppState>) -> AppResult<ApiResponse<Vec<UnitResponse>>> {
    let units = state.unit_service.list().await?;

    Ok(ApiResponse::ok(units.into_iter().map(Into::into).collect()))
}

/// List main units only.
async fn list_main(State(state): State<AppState>) -> AppResult<ApiResponse<Vec<UnitResponse>>> {
    let units = state.unit_service.list_main().await?;

    Ok(ApiResponse::ok(units.into_iter().map(Into::into).collect()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list))
        .route("/main", get(list_main))
}
