//! Typed domain error enums.
//!
//! All error types implement `thiserror::Error` and convert to
//! `anyhow::Error` via the `?` operator.

use thiserror::Error;

// ── Port errors ───────────────────────────────────────────────────────────────

/// Errors raised while validating or negotiating a deployment helper port.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PortError {
    #[error("Invalid port: {0}. Expected an integer between 1 and 65535.")]
    Invalid(String),

    #[error("Port {port} is already in use")]
    InUse { port: u16, alternatives: Vec<u16> },
}

// ── Install errors ────────────────────────────────────────────────────────────

/// Errors raised by the installation flow.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InstallError {
    #[error(transparent)]
    Port(#[from] PortError),

    #[error("Failed to save {0} configuration")]
    SaveFailed(nlq_common::Stack),
}
