//! JSON API handlers.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use chrono::{DateTime, Utc};
use nlq_common::{DeploymentRecord, ServiceStatus, Stack};
use serde::Serialize;
use serde_json::{Value, json};

use crate::application::services::port_allocation::{self, PortCheck};
use crate::application::services::{config_service, install, service_status};
use crate::domain::config::{EnvConfig, InstallationStatus};
use crate::domain::deploy::helper_url;
use crate::domain::install::InstallRequest;
use crate::domain::port::parse_port;
use crate::server::error::ApiError;
use crate::server::state::AppState;

type SharedState = State<Arc<AppState>>;

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    #[serde(flatten)]
    pub status: InstallationStatus,
    pub timestamp: DateTime<Utc>,
}

/// GET /api/status
pub async fn status(State(state): SharedState) -> Json<StatusResponse> {
    Json(StatusResponse {
        status: config_service::installation_status(&state.store).await,
        timestamp: Utc::now(),
    })
}

/// GET /api/config
pub async fn get_config(State(state): SharedState) -> Json<EnvConfig> {
    Json(config_service::masked_config(&state.store).await)
}

/// POST /api/config: replaces the primary stack's configuration.
pub async fn save_config(
    State(state): SharedState,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(body) = body?;
    let config = config_service::config_from_json(&body)
        .ok_or_else(|| ApiError::BadRequest("Configuration must be a JSON object".into()))?;

    if !config_service::save_config(&state.store, Stack::Nlq, &config).await {
        return Err(ApiError::Internal("Failed to save configuration".into()));
    }
    Ok(Json(json!({ "success": true, "message": "Configuration saved" })))
}

/// GET /api/services/status
pub async fn services_status(State(state): SharedState) -> Json<BTreeMap<String, ServiceStatus>> {
    Json(service_status::gather_service_status(&state.health_probe).await)
}

/// POST /api/services/{service}/restart: acknowledgement only.
pub async fn restart_service(Path(service): Path<String>) -> Json<Value> {
    Json(json!({
        "success": true,
        "message": format!("Service {service} restart initiated"),
        "service": service,
    }))
}

/// GET /api/services/{service}/logs: placeholder only.
pub async fn service_logs(Path(service): Path<String>) -> Json<Value> {
    Json(json!({
        "service": service,
        "logs": "Service logs would appear here",
    }))
}

/// GET /api/deployment-port
pub async fn get_deployment_port(State(state): SharedState) -> Json<PortCheck> {
    Json(
        port_allocation::check_current(
            &state.port_probe,
            &state.deployment_port,
            state.target.host(),
        )
        .await,
    )
}

/// POST /api/deployment-port `{ port }`
pub async fn set_deployment_port(
    State(state): SharedState,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(body) = body?;
    let requested = parse_port(body.get("port").unwrap_or(&Value::Null))?;
    let port =
        port_allocation::negotiate(&state.port_probe, &state.deployment_port, requested).await?;

    let host = state.target.host();
    tracing::info!(port, host, "deployment port negotiated");
    Ok(Json(json!({
        "success": true,
        "port": port,
        "host": host,
        "url": helper_url(host, port),
    })))
}

/// POST /api/install: saves configuration, then deploys in the background.
pub async fn run_install(
    State(state): SharedState,
    body: Result<Json<InstallRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(request) = body?;
    let stacks = install::install(&state.store, &state.deployment_port, &request).await?;

    let port = state.deployment_port.get();
    for stack in &stacks {
        tracing::info!(%stack, port, "starting background deployment");
        // Detached: progress is visible through GET /api/deployments.
        drop(state.spawn_deployment(*stack, port));
    }

    Ok(Json(json!({
        "success": true,
        "message": "Configuration saved. Deployment starting in background. \
                    Check /api/deployments for progress.",
        "systems": stacks,
    })))
}

/// GET /api/deployments
pub async fn deployments(State(state): SharedState) -> Json<BTreeMap<Stack, DeploymentRecord>> {
    Json(state.tracker.snapshot())
}

/// GET /health
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "timestamp": Utc::now() }))
}
