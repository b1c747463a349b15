//! Unitvisit server entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{Router, middleware};
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use unitvisit_api::{middleware::AppState, router as api_router};
use unitvisit_common::Config;
use unitvisit_core::{
    AccountService, CodeGenerator, FeedbackService, RegistrationService, StatisticsService,
    UnitService,
};
use unitvisit_db::repositories::{
    FeedbackRepository, RegistrationRepository, UnitRepository, UserRepository,
};

/// Waits for a shutdown signal (SIGINT or SIGTERM).
///
/// On Unix systems, this listens for both SIGINT (Ctrl+C) and SIGTERM.
/// On Windows, this only listens for Ctrl+C.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received SIGINT, initiating graceful shutdown...");
        },
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        },
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "unitvisit=debug,tower_http=debug".into()),
        )
        .init();

    info!("Starting unitvisit server...");

    // Load configuration
    let config = Config::load()?;

    // Connect to database
    let db = unitvisit_db::init(&config).await?;
    info!("Connected to database");

    // Run migrations
    info!("Running database migrations...");
    unitvisit_db::migrate(&db).await?;
    info!("Migrations completed");

    // Initialize repositories
    let db = Arc::new(db);
    let unit_repo = UnitRepository::new(Arc::clone(&db));
    let user_repo = UserRepository::new(Arc::clone(&db));
    let registration_repo = RegistrationRepository::new(Arc::clone(&db));
    let feedback_repo = FeedbackRepository::new(Arc::clone(&db));

    // Initialize services
    let unit_service = UnitService::new(unit_repo);
    let code_generator = CodeGenerator::new(
        registration_repo.clone(),
        config.registration.code_max_attempts,
    );
    let registration_service = RegistrationService::new(
        registration_repo.clone(),
        unit_service.clone(),
        code_generator,
    );
    let statistics_service = StatisticsService::new(registration_repo);
    let account_service = AccountService::new(user_repo, unit_service.clone());
    let feedback_service = FeedbackService::new(feedback_repo);

    // Create app state
    let state = AppState {
        account_service,
        unit_service,
        registration_service,
        statistics_service,
        feedback_service,
    };

    // Build router
    let app = Router::new()
        .nest("/api", api_router())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            unitvisit_api::middleware::auth_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    // Start server with graceful shutdown
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
