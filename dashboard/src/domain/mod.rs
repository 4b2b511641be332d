//! Domain layer: pure dashboard rules, types, and validation.
//!
//! Nothing here imports `crate::infra`, `crate::server`, `crate::application`,
//! `tokio`, `std::fs`, or `std::net`. Data in, data out.

pub mod config;
pub mod deploy;
pub mod error;
pub mod health;
pub mod host;
pub mod install;
pub mod port;

pub use config::{EnvConfig, InstallationStatus, installation_status, masked_view};
pub use error::{InstallError, PortError};
pub use host::{ExecutionContext, Platform};
pub use install::InstallRequest;
