use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named deployable group of containers.
///
/// Each stack owns one `.env` file and one compose definition, both kept
/// under the stack's [`Stack::directory`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Stack {
    /// Chat/query platform (OpenWebUI, MCP server, LiteLLM, databases).
    Nlq,
    /// Optional data-migration stack.
    Migration,
}

impl Stack {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Stack::Nlq => "nlq",
            Stack::Migration => "migration",
        }
    }

    /// Directory name holding the stack's `.env` and `docker-compose.yml`.
    #[must_use]
    pub fn directory(self) -> &'static str {
        match self {
            Stack::Nlq => "nlq-system",
            Stack::Migration => "migration-system",
        }
    }
}

impl fmt::Display for Stack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of `POST /deploy` sent to the deployment helper.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeployRequest {
    pub system: Stack,
}

/// Raw body returned by the deployment helper.
///
/// The helper answers `{status: "success", stdout, system}` or
/// `{status: "error", message, stderr?, composePath?}`; every field is
/// optional here so a partial or unexpected body still decodes.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HelperResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub stdout: Option<String>,
    #[serde(default)]
    pub stderr: Option<String>,
    #[serde(default)]
    pub compose_path: Option<String>,
    #[serde(default)]
    pub system: Option<String>,
}

/// Outcome of one deployment delegation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum DeploymentResult {
    Success {
        stdout: String,
        system: Stack,
    },
    Error {
        message: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        stderr: Option<String>,
        #[serde(
            rename = "composePath",
            default,
            skip_serializing_if = "Option::is_none"
        )]
        compose_path: Option<String>,
    },
}

impl DeploymentResult {
    /// Error result carrying only a message.
    pub fn error(message: impl Into<String>) -> Self {
        DeploymentResult::Error {
            message: message.into(),
            stderr: None,
            compose_path: None,
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, DeploymentResult::Success { .. })
    }
}

/// Liveness of one downstream service, recomputed on every status request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServiceStatus {
    pub port: u16,
    pub healthy: bool,
}

/// Lifecycle of a background deployment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentState {
    Pending,
    Running,
    Succeeded,
    Failed,
}

/// Last known state of a stack's background deployment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentRecord {
    pub state: DeploymentState,
    pub started_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<DeploymentResult>,
}
