//! API middleware.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use unitvisit_core::{
    AccountService, FeedbackService, RegistrationService, StatisticsService, UnitService,
};

/// Application state.
#[derive(Clone)]
pub struct AppState {
    pub account_service: AccountService,
    pub unit_service: UnitService,
    pub registration_service: RegistrationService,
    pub statistics_service: StatisticsService,
    pub feedback_service: FeedbackService,
}

/// Authentication middleware.
///
/// Resolves a `Bearer` token to its account and stashes it in the request
/// extensions; handlers opt in via the `AuthUser` extractor. Requests
/// without a valid token pass through unauthenticated.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    if let Some(auth_header) = req.headers().get("Authorization")
        && let Ok(auth_str) = auth_header.to_str()
        && let Some(token) = auth_str.strip_prefix("Bearer ")
        && let Ok(user) = state.account_service.authenticate_by_token(token).await
    {
        req.extensions_mut().insert(user);
    }

    next.run(req).await
}
