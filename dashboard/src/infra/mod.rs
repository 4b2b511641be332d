//! Infrastructure layer: I/O implementations of the application ports.

pub mod config;
pub mod deploy;
pub mod network;

pub use config::EnvFileStore;
pub use deploy::HttpDeploymentClient;
pub use network::{HttpHealthProbe, TcpPortProbe};
