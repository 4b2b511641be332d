//! Shared fixtures for router-level tests.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum::routing::post;
use http_body_util::BodyExt;
use nlq_common::{DashboardConfig, DeployRequest, DeploymentRecord, DeploymentState, Stack};
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;

use nlq_dashboard::domain::ExecutionContext;
use nlq_dashboard::server::{self, AppState};

pub struct TestApp {
    pub state: Arc<AppState>,
    pub router: Router,
    pub root: TempDir,
}

impl TestApp {
    /// Dashboard whose helper is expected on `127.0.0.1:deployment_port`.
    pub fn new(deployment_port: u16) -> Self {
        let root = TempDir::new().unwrap();
        let config = DashboardConfig {
            static_dir: root.path().join("dist"),
            container_root: root.path().join("app"),
            local_root: root.path().to_path_buf(),
            deployment_port,
            deployment_host: Some("127.0.0.1".to_string()),
            service_host: "127.0.0.1".to_string(),
            ..DashboardConfig::default()
        };
        let state = Arc::new(AppState::new(&config, ExecutionContext::LinuxHost).unwrap());
        let router = server::router(Arc::clone(&state));
        Self { state, router, root }
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let req = Request::get(uri).body(Body::empty()).unwrap();
        self.send(req).await
    }

    pub async fn post(&self, uri: &str, body: &Value) -> (StatusCode, Value) {
        self.post_raw(uri, body.to_string()).await
    }

    pub async fn post_raw(&self, uri: &str, body: String) -> (StatusCode, Value) {
        let req = Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap();
        self.send(req).await
    }

    pub async fn get_text(&self, uri: &str) -> (StatusCode, String) {
        let req = Request::get(uri).body(Body::empty()).unwrap();
        let response = self.router.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    async fn send(&self, req: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    /// Wait until the stack's background deployment has finished.
    pub async fn finished_deployment(&self, stack: Stack) -> DeploymentRecord {
        for _ in 0..200 {
            if let Some(record) = self.state.tracker.get(stack) {
                if matches!(record.state, DeploymentState::Succeeded | DeploymentState::Failed) {
                    return record;
                }
            }
            tokio::time::sleep(Duration::from_millis(25)).await;
        }
        panic!("deployment of {stack} did not finish");
    }
}

/// A loopback port with nothing listening on it.
pub fn free_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

// ── Deployment helper ─────────────────────────────────────────────────────────

/// Stand-in deployment helper. Records requested stacks and answers with
/// `reply`, or with a success echoing the stack when `reply` is `None`.
pub async fn spawn_helper(reply: Option<(StatusCode, Value)>) -> (u16, Arc<Mutex<Vec<Stack>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let recorder = Arc::clone(&seen);
    let app = Router::new().route(
        "/deploy",
        post(move |axum::Json(req): axum::Json<DeployRequest>| {
            let recorder = Arc::clone(&recorder);
            let reply = reply.clone();
            async move {
                recorder.lock().unwrap().push(req.system);
                let (status, body) = reply.unwrap_or_else(|| {
                    (
                        StatusCode::OK,
                        json!({
                            "status": "success",
                            "stdout": format!("{} started", req.system),
                            "system": req.system,
                        }),
                    )
                });
                (status, axum::Json(body))
            }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (port, seen)
}
