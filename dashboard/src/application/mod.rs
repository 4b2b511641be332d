//! Application layer: port traits and use-case orchestration.
//!
//! Depends only on `crate::domain` and `nlq_common`.

pub mod ports;
pub mod services;

pub use ports::{ConfigStore, DeploymentClient, HealthProbe, PortProbe};
