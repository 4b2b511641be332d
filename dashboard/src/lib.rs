//! NLQ dashboard: configures the NLQ stacks, reports their health, and
//! hands deployments to the deployment helper service.

pub mod application;
pub mod domain;
pub mod infra;
pub mod server;
