//! Installation request → per-stack configuration records.

use serde::Deserialize;
use serde_json::Value;

use crate::domain::config::{
    API_KEY, DEFAULT_REGISTRY, DEFAULT_VERSION, EnvConfig, LITELLM_MASTER_KEY, MCP_REGISTRY,
    MCP_VERSION, MCPDB_PASSWORD, MIGRATION_DB_PASSWORD, OPENWEBUI_DB_PASSWORD, WEBUI_SECRET_KEY,
};
use crate::domain::error::PortError;
use crate::domain::port::parse_port;

/// Body of `POST /api/install`, as sent by the setup wizard.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InstallRequest {
    pub api_key: String,
    pub openwebui_password: String,
    pub mcpdb_password: String,
    pub litellm_key: String,
    pub webui_secret: String,
    pub registry: Option<String>,
    pub version: Option<String>,
    pub include_migration: bool,
    pub migration_password: Option<String>,
    pub deployment_service_port: Option<Value>,
}

fn or_default(value: Option<&String>, default: &str) -> String {
    value
        .filter(|v| !v.is_empty())
        .map_or_else(|| default.to_string(), Clone::clone)
}

impl InstallRequest {
    /// Configuration record of the primary stack.
    #[must_use]
    pub fn nlq_config(&self) -> EnvConfig {
        [
            (API_KEY, self.api_key.clone()),
            (OPENWEBUI_DB_PASSWORD, self.openwebui_password.clone()),
            (MCPDB_PASSWORD, self.mcpdb_password.clone()),
            (LITELLM_MASTER_KEY, self.litellm_key.clone()),
            (WEBUI_SECRET_KEY, self.webui_secret.clone()),
            (MCP_REGISTRY, or_default(self.registry.as_ref(), DEFAULT_REGISTRY)),
            (MCP_VERSION, or_default(self.version.as_ref(), DEFAULT_VERSION)),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
    }

    /// Configuration record of the migration stack, when requested.
    ///
    /// The migration database password falls back to the MCP one.
    #[must_use]
    pub fn migration_config(&self) -> Option<EnvConfig> {
        if !self.include_migration {
            return None;
        }
        let password = or_default(self.migration_password.as_ref(), &self.mcpdb_password);
        Some(EnvConfig::from([(MIGRATION_DB_PASSWORD.to_string(), password)]))
    }

    /// Helper port requested by the wizard, if any.
    ///
    /// # Errors
    ///
    /// Returns [`PortError::Invalid`] when a value is present but is not a
    /// port in `1..=65535`.
    pub fn deployment_port(&self) -> Result<Option<u16>, PortError> {
        match &self.deployment_service_port {
            None | Some(Value::Null) => Ok(None),
            Some(value) => parse_port(value).map(Some),
        }
    }
}
