//! Application services: use-case orchestration over port traits.

pub mod config_service;
pub mod deployment;
pub mod install;
pub mod port_allocation;
pub mod service_status;
