//! Downstream services the dashboard reports on.

/// A service with a fixed host port and a `/health` endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnownService {
    pub name: &'static str,
    pub port: u16,
}

pub const KNOWN_SERVICES: &[KnownService] = &[
    KnownService { name: "openwebui", port: 3000 },
    KnownService { name: "mcp", port: 8000 },
    KnownService { name: "litellm", port: 4000 },
    KnownService { name: "postgres_system", port: 5434 },
    KnownService { name: "postgres_query", port: 5433 },
];

#[must_use]
pub fn health_url(host: &str, port: u16) -> String {
    format!("http://{host}:{port}/health")
}
