pub mod config;
pub mod types;

pub use config::DashboardConfig;
pub use types::*;
