//! Shared server state.

use anyhow::Result;
use nlq_common::{DashboardConfig, Stack};

use crate::application::services::deployment::{
    self, DeploymentHandle, DeploymentTarget, DeploymentTracker,
};
use crate::application::services::port_allocation::NegotiatedPort;
use crate::domain::host::ExecutionContext;
use crate::infra::{EnvFileStore, HttpDeploymentClient, HttpHealthProbe, TcpPortProbe};

/// Everything a request handler needs, shared behind an `Arc`.
#[derive(Debug)]
pub struct AppState {
    pub store: EnvFileStore,
    pub port_probe: TcpPortProbe,
    pub health_probe: HttpHealthProbe,
    pub deployer: HttpDeploymentClient,
    pub target: DeploymentTarget,
    pub deployment_port: NegotiatedPort,
    pub tracker: DeploymentTracker,
    pub static_dir: std::path::PathBuf,
}

impl AppState {
    /// # Errors
    ///
    /// Returns an error if an HTTP client cannot be built.
    pub fn new(config: &DashboardConfig, context: ExecutionContext) -> Result<Self> {
        Ok(Self {
            store: EnvFileStore::new(&config.container_root, &config.local_root),
            port_probe: TcpPortProbe::default(),
            health_probe: HttpHealthProbe::new(config.service_host.clone())?,
            deployer: HttpDeploymentClient::new()?,
            target: DeploymentTarget::new(context, config.deployment_host.clone()),
            deployment_port: NegotiatedPort::new(config.deployment_port),
            tracker: DeploymentTracker::new(),
            static_dir: config.static_dir.clone(),
        })
    }

    /// Start a background deployment of `stack` against `port`.
    pub fn spawn_deployment(&self, stack: Stack, port: u16) -> DeploymentHandle {
        let client = self.deployer.clone();
        let target = self.target.clone();
        self.tracker.spawn(stack, async move {
            deployment::deploy(&client, &target, stack, port).await
        })
    }
}
