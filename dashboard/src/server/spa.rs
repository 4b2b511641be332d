//! Single-page application shell.

use std::sync::Arc;

use axum::extract::State;
use axum::response::Html;

use crate::server::state::AppState;

/// Served when the UI has not been built.
const FALLBACK_INDEX: &str = r#"<!DOCTYPE html><html><head><meta charset="utf-8"><title>NLQ Dashboard</title></head><body><h1>NLQ Dashboard assets not found</h1><p>Run <code>npm run build</code> to generate the UI, or point <code>NLQ_DASHBOARD_STATIC_DIR</code> at an existing build.</p></body></html>"#;

/// Any GET that matches no API route and no static file.
pub async fn shell(State(state): State<Arc<AppState>>) -> Html<String> {
    let index = state.static_dir.join("index.html");
    match tokio::fs::read_to_string(&index).await {
        Ok(html) => Html(html),
        Err(e) => {
            tracing::debug!(path = %index.display(), error = %e, "serving placeholder index");
            Html(FALLBACK_INDEX.to_string())
        }
    }
}
