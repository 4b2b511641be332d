use serde::Deserialize;
use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;

/// Dashboard server configuration.
///
/// Loaded by the binary with `envy::prefixed("NLQ_DASHBOARD_")`; every
/// field has a default so an empty environment yields a working setup.
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    /// Listen address (default: 0.0.0.0:3001)
    #[serde(default = "default_listen_addr")]
    pub listen_addr: SocketAddr,

    /// Directory holding the built single-page UI.
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,

    /// Preferred root for stack directories when running inside a container.
    #[serde(default = "default_container_root")]
    pub container_root: PathBuf,

    /// Fallback root for stack directories on a developer machine.
    #[serde(default = "default_local_root")]
    pub local_root: PathBuf,

    /// Port the deployment helper listens on until another is negotiated.
    #[serde(default = "default_deployment_port")]
    pub deployment_port: u16,

    /// Explicit deployment helper host. When unset the host is derived
    /// from the execution context.
    #[serde(default)]
    pub deployment_host: Option<String>,

    /// Host used for downstream service health probes.
    #[serde(default = "default_service_host")]
    pub service_host: String,
}

fn default_listen_addr() -> SocketAddr {
    SocketAddr::from((Ipv4Addr::UNSPECIFIED, 3001))
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("dist")
}

fn default_container_root() -> PathBuf {
    PathBuf::from("/app")
}

fn default_local_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_deployment_port() -> u16 {
    3002
}

fn default_service_host() -> String {
    "localhost".to_string()
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            static_dir: default_static_dir(),
            container_root: default_container_root(),
            local_root: default_local_root(),
            deployment_port: default_deployment_port(),
            deployment_host: None,
            service_host: default_service_host(),
        }
    }
}

impl DashboardConfig {
    /// Apply the conventional `PORT` override to the listen address.
    ///
    /// Values that are not a valid port are ignored.
    #[must_use]
    pub fn with_port_override(mut self, port: Option<&str>) -> Self {
        if let Some(port) = port.and_then(|p| p.trim().parse::<u16>().ok()) {
            self.listen_addr.set_port(port);
        }
        self
    }
}
