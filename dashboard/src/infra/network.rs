//! Network infrastructure: implements `PortProbe` and `HealthProbe`.

use std::io;
use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::StatusCode;
use tokio::net::TcpListener;

use crate::application::ports::{HealthProbe, PortProbe};
use crate::domain::health::health_url;

/// Per-probe timeout for service health checks.
pub const HEALTH_TIMEOUT: Duration = Duration::from_secs(2);

/// Probes availability by binding a throwaway listener.
///
/// Only "address in use" counts as unavailable. Any other bind error is
/// logged and the port reported as available.
#[derive(Debug, Clone, Copy)]
pub struct TcpPortProbe {
    bind_ip: IpAddr,
}

impl TcpPortProbe {
    #[must_use]
    pub fn new(bind_ip: IpAddr) -> Self {
        Self { bind_ip }
    }
}

impl Default for TcpPortProbe {
    fn default() -> Self {
        Self::new(IpAddr::V4(Ipv4Addr::LOCALHOST))
    }
}

impl PortProbe for TcpPortProbe {
    async fn is_available(&self, port: u16) -> bool {
        match TcpListener::bind((self.bind_ip, port)).await {
            Ok(listener) => {
                drop(listener);
                true
            }
            Err(e) if e.kind() == io::ErrorKind::AddrInUse => false,
            Err(e) => {
                tracing::warn!(
                    port,
                    error = %e,
                    "port probe bind failed; treating port as available"
                );
                true
            }
        }
    }
}

/// `GET http://{host}:{port}/health` with a short timeout; healthy iff 200.
#[derive(Debug, Clone)]
pub struct HttpHealthProbe {
    client: reqwest::Client,
    host: String,
}

impl HttpHealthProbe {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(host: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(HEALTH_TIMEOUT)
            .build()
            .context("building health probe HTTP client")?;
        Ok(Self {
            client,
            host: host.into(),
        })
    }
}

impl HealthProbe for HttpHealthProbe {
    async fn is_healthy(&self, port: u16) -> bool {
        let url = health_url(&self.host, port);
        match self.client.get(&url).send().await {
            Ok(response) => response.status() == StatusCode::OK,
            Err(e) => {
                tracing::debug!(%url, error = %e, "health probe failed");
                false
            }
        }
    }
}
