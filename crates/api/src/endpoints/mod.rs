//! API endpoints.

mod admin;
mod auth;
mod feedback;
mod lookup;
mod registrations;
mod units;

use axum::Router;

use crate::middleware::AppState;

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/registrations", registrations::router())
        .nest("/lookup", lookup::router())
        .nest("/feedback", feedback::router())
        .nest("/units", units::router())
        .nest("/auth", auth::router())
        .nest("/admin", admin::router())
}
