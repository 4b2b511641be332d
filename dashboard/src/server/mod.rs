//! HTTP facade: axum router over the application services.

pub mod error;
pub mod handlers;
pub mod spa;
pub mod state;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub use error::ApiError;
pub use state::AppState;

/// Build the dashboard router.
///
/// API routes are matched first; everything else is a static file from the
/// UI directory, falling back to the SPA shell.
pub fn router(state: Arc<AppState>) -> Router {
    let static_files = ServeDir::new(&state.static_dir)
        .fallback(get(spa::shell).with_state(Arc::clone(&state)));

    Router::new()
        .route("/api/status", get(handlers::status))
        .route("/api/config", get(handlers::get_config).post(handlers::save_config))
        .route("/api/services/status", get(handlers::services_status))
        .route("/api/services/{service}/restart", post(handlers::restart_service))
        .route("/api/services/{service}/logs", get(handlers::service_logs))
        .route(
            "/api/deployment-port",
            get(handlers::get_deployment_port).post(handlers::set_deployment_port),
        )
        .route("/api/install", post(handlers::run_install))
        .route("/api/deployments", get(handlers::deployments))
        .route("/health", get(handlers::health))
        .fallback_service(static_files)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
