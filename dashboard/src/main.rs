//! NLQ dashboard server entry point.
//!
//! Initialises tracing, loads configuration from `NLQ_DASHBOARD_*`
//! environment variables, resolves where the deployment helper lives, and
//! serves the dashboard API and UI.

use std::sync::Arc;

use anyhow::{Context, Result};
use nlq_common::DashboardConfig;
use tracing_subscriber::EnvFilter;

use nlq_dashboard::application::services::config_service;
use nlq_dashboard::domain::{ExecutionContext, Platform};
use nlq_dashboard::server::{self, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialise tracing with RUST_LOG env filter.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("nlq-dashboard starting");

    // 2. Load configuration from NLQ_DASHBOARD_* env vars; PORT wins for the
    //    listen port.
    let config: DashboardConfig = envy::prefixed("NLQ_DASHBOARD_")
        .from_env()
        .context("failed to load config from NLQ_DASHBOARD_* env vars")?;
    let config = config.with_port_override(std::env::var("PORT").ok().as_deref());

    // 3. Resolve the execution context once.
    let context = ExecutionContext::detect(|key| std::env::var(key).ok(), Platform::current());

    let state = Arc::new(AppState::new(&config, context).context("failed to initialise state")?);

    tracing::info!(
        listen_addr = %config.listen_addr,
        static_dir = %config.static_dir.display(),
        ?context,
        deployment_host = state.target.host(),
        deployment_port = config.deployment_port,
        "configuration loaded",
    );

    // 4. Bind, report installation state, serve.
    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;

    let installation = config_service::installation_status(&state.store).await;
    if installation.installed {
        tracing::info!("installation found; dashboard ready");
    } else {
        tracing::info!(
            has_api_key = installation.has_api_key,
            has_passwords = installation.has_passwords,
            "not installed yet; setup wizard available",
        );
    }

    tracing::info!("dashboard ready on http://{}", config.listen_addr);

    axum::serve(listener, server::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    tracing::info!("nlq-dashboard shut down");
    Ok(())
}

/// Wait for SIGINT (Ctrl-C) for graceful shutdown.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to install Ctrl-C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("received shutdown signal");
}
