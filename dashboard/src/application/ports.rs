//! Port trait definitions for the Application layer.
//!
//! Ports are the contracts infrastructure must fulfil. This file imports
//! only from `crate::domain` and `nlq_common`.

use nlq_common::{DeploymentResult, Stack};

use crate::domain::EnvConfig;

// ── Configuration ─────────────────────────────────────────────────────────────

/// Per-stack configuration persistence.
///
/// Neither operation surfaces errors: a missing or unreadable record loads
/// as empty, and a failed save is reported as `false` after being logged.
#[allow(async_fn_in_trait)]
pub trait ConfigStore {
    /// Load the stack's configuration record.
    async fn load(&self, stack: Stack) -> EnvConfig;
    /// Replace the stack's configuration record.
    async fn save(&self, stack: Stack, config: &EnvConfig) -> bool;
}

// ── Network ───────────────────────────────────────────────────────────────────

/// Local TCP port availability.
#[allow(async_fn_in_trait)]
pub trait PortProbe {
    /// `true` when the port can be bound right now.
    async fn is_available(&self, port: u16) -> bool;
}

/// Downstream service liveness.
#[allow(async_fn_in_trait)]
pub trait HealthProbe {
    /// `true` when the service on `port` answers its health check.
    async fn is_healthy(&self, port: u16) -> bool;
}

// ── Deployment ────────────────────────────────────────────────────────────────

/// Delegation of a stack deployment to the helper service.
#[allow(async_fn_in_trait)]
pub trait DeploymentClient {
    /// Ask the helper at `host:port` to deploy `stack`. Every failure is
    /// reported inside the returned result.
    async fn deploy(&self, host: &str, port: u16, stack: Stack) -> DeploymentResult;
}
