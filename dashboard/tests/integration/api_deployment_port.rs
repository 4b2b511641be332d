//! Deployment port negotiation endpoints.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::{TestApp, free_port};

#[tokio::test]
async fn test_free_default_port_is_available() {
    let port = free_port();
    let app = TestApp::new(port);

    let (status, body) = app.get("/api/deployment-port").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["available"], true);
    assert_eq!(body["port"], port);
    assert_eq!(body["host"], "127.0.0.1");
    assert_eq!(body["url"], format!("http://127.0.0.1:{port}"));
}

#[tokio::test]
async fn test_occupied_default_port_offers_alternatives() {
    let held = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = held.local_addr().unwrap().port();
    let app = TestApp::new(port);

    let (status, body) = app.get("/api/deployment-port").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["available"], false);
    let alternatives: Vec<u16> = serde_json::from_value(body["alternatives"].clone()).unwrap();
    assert!(alternatives.len() <= 5);
    assert!(
        alternatives
            .iter()
            .all(|p| *p > port && u32::from(*p) <= u32::from(port) + 5)
    );
    drop(held);
}

#[tokio::test]
async fn test_negotiated_port_is_reported_afterwards() {
    let app = TestApp::new(free_port());
    let wanted = free_port();

    let (status, body) = app.post("/api/deployment-port", &json!({ "port": wanted })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["port"], wanted);
    assert_eq!(body["url"], format!("http://127.0.0.1:{wanted}"));

    assert_eq!(app.state.deployment_port.get(), wanted);
    let (_, body) = app.get("/api/deployment-port").await;
    assert_eq!(body["port"], wanted);
}

#[tokio::test]
async fn test_invalid_ports_are_rejected() {
    let default = free_port();
    let app = TestApp::new(default);

    for body in [
        json!({ "port": 0 }),
        json!({ "port": 70000 }),
        json!({ "port": "abc" }),
        json!({}),
    ] {
        let (status, reply) = app.post("/api/deployment-port", &body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{body} should be rejected");
        assert!(reply["error"].is_string());
    }
    assert_eq!(app.state.deployment_port.get(), default);
}

#[tokio::test]
async fn test_occupied_port_is_rejected_with_alternatives() {
    let held = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = held.local_addr().unwrap().port();
    let app = TestApp::new(free_port());

    let (status, body) = app.post("/api/deployment-port", &json!({ "port": port })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], format!("Port {port} is already in use"));
    assert!(body["alternatives"].is_array());
    assert!(!app.state.deployment_port.is_negotiated());
    drop(held);
}
