//! Deployment helper host resolution.

/// Environment variable set by the compose file when the dashboard runs as
/// a compose service. Present and non-empty means in-compose.
pub const IN_COMPOSE_MARKER: &str = "IN_DOCKER_COMPOSE";

/// Compose service name of the deployment helper.
pub const COMPOSE_SERVICE_HOST: &str = "deployment-service";
/// Docker Desktop alias for the host machine.
pub const DOCKER_DESKTOP_HOST: &str = "host.docker.internal";
/// Default Docker bridge gateway on Linux.
pub const LINUX_BRIDGE_GATEWAY: &str = "172.17.0.1";

/// Operating system family the dashboard runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    MacOs,
    Windows,
    /// Linux, and any other OS without Docker Desktop.
    Linux,
}

impl Platform {
    /// Accepts both Rust (`macos`, `windows`) and Node-style (`darwin`,
    /// `win32`) names. Anything unrecognised maps to [`Platform::Linux`].
    #[must_use]
    pub fn from_os(os: &str) -> Self {
        match os.trim().to_ascii_lowercase().as_str() {
            "macos" | "darwin" => Platform::MacOs,
            "windows" | "win32" => Platform::Windows,
            _ => Platform::Linux,
        }
    }

    /// Platform of the running binary.
    #[must_use]
    pub fn current() -> Self {
        Self::from_os(std::env::consts::OS)
    }
}

/// Where the dashboard runs relative to the deployment helper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionContext {
    InCompose,
    DockerDesktop,
    LinuxHost,
}

impl ExecutionContext {
    /// The in-compose marker takes precedence over the platform.
    #[must_use]
    pub fn resolve(in_compose: bool, platform: Platform) -> Self {
        if in_compose {
            return ExecutionContext::InCompose;
        }
        match platform {
            Platform::MacOs | Platform::Windows => ExecutionContext::DockerDesktop,
            Platform::Linux => ExecutionContext::LinuxHost,
        }
    }

    /// Detect the context from an environment lookup.
    pub fn detect<F>(lookup: F, platform: Platform) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let in_compose = lookup(IN_COMPOSE_MARKER).is_some_and(|v| !v.is_empty());
        Self::resolve(in_compose, platform)
    }

    /// Host at which the deployment helper is reachable.
    #[must_use]
    pub fn deployment_host(self) -> &'static str {
        match self {
            ExecutionContext::InCompose => COMPOSE_SERVICE_HOST,
            ExecutionContext::DockerDesktop => DOCKER_DESKTOP_HOST,
            ExecutionContext::LinuxHost => LINUX_BRIDGE_GATEWAY,
        }
    }
}
