//! Env-file format, secret masking and installation checks.
//!
//! Pure functions: no I/O and no async.

use std::collections::BTreeMap;

use serde::Serialize;

// ── Constants ────────────────────────────────────────────────────────────────

pub const API_KEY: &str = "ANTHROPIC_API_KEY";
pub const OPENWEBUI_DB_PASSWORD: &str = "OPENWEBUI_DB_PASSWORD";
pub const MCPDB_PASSWORD: &str = "MCPDB_PASSWORD";
pub const LITELLM_MASTER_KEY: &str = "LITELLM_MASTER_KEY";
pub const WEBUI_SECRET_KEY: &str = "WEBUI_SECRET_KEY";
pub const MCP_REGISTRY: &str = "MCP_REGISTRY";
pub const MCP_VERSION: &str = "MCP_VERSION";
pub const MIGRATION_DB_PASSWORD: &str = "MIGRATION_DB_PASSWORD";

pub const DEFAULT_REGISTRY: &str = "rfinancials/mydocker-repo";
pub const DEFAULT_VERSION: &str = "v1.0.0";

/// Substring of the example key shipped in `.env` templates. A key that
/// still contains it has not been replaced by the operator.
pub const PLACEHOLDER_API_KEY: &str = "sk-ant-api03";

/// Token returned in place of any secret value.
pub const MASK: &str = "****";

/// Secret keys always present in the masked view.
pub const SECRET_KEYS: &[&str] = &[
    API_KEY,
    OPENWEBUI_DB_PASSWORD,
    MCPDB_PASSWORD,
    LITELLM_MASTER_KEY,
    WEBUI_SECRET_KEY,
];

/// Non-secret keys always present in the masked view, with their defaults.
pub const DEFAULTED_KEYS: &[(&str, &str)] = &[
    ("OPENWEBUI_PORT", "3000"),
    ("MCP_PORT", "8000"),
    ("LITELLM_PORT", "4000"),
    ("MIGRATION_UI_PORT", "8080"),
    (MCP_REGISTRY, DEFAULT_REGISTRY),
    (MCP_VERSION, DEFAULT_VERSION),
];

/// One stack's configuration record.
pub type EnvConfig = BTreeMap<String, String>;

// ── Env-file format ──────────────────────────────────────────────────────────

/// Parse `KEY=VALUE` lines.
///
/// Blank lines and `#` comments are skipped. The first `=` separates key
/// from value, so values may themselves contain `=`. Keys and values are
/// trimmed; a line without `=` yields an empty value. Later duplicates win.
#[must_use]
pub fn parse_env(content: &str) -> EnvConfig {
    let mut config = EnvConfig::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let (key, value) = line.split_once('=').unwrap_or((line, ""));
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        config.insert(key.to_string(), value.trim().to_string());
    }
    config
}

/// Render a configuration record as newline-terminated `KEY=VALUE` lines.
#[must_use]
pub fn render_env(config: &EnvConfig) -> String {
    let mut out = String::new();
    for (key, value) in config {
        out.push_str(key);
        out.push('=');
        out.push_str(value);
        out.push('\n');
    }
    out
}

// ── Masking ──────────────────────────────────────────────────────────────────

/// Whether a key names a secret (`apiKey`, `*Password`, `*Key`, `*Secret`).
#[must_use]
pub fn is_secret_key(key: &str) -> bool {
    let upper = key.to_ascii_uppercase();
    ["PASSWORD", "KEY", "SECRET"]
        .iter()
        .any(|suffix| upper.ends_with(suffix))
}

fn mask(value: Option<&String>) -> String {
    match value {
        Some(v) if !v.is_empty() => MASK.to_string(),
        _ => String::new(),
    }
}

/// Configuration safe to hand to the browser.
///
/// Secret-shaped values become [`MASK`] when set and `""` otherwise; the
/// well-known non-secret keys fall back to their defaults.
#[must_use]
pub fn masked_view(config: &EnvConfig) -> EnvConfig {
    let mut view = EnvConfig::new();
    for key in SECRET_KEYS {
        view.insert((*key).to_string(), mask(config.get(*key)));
    }
    for (key, default) in DEFAULTED_KEYS {
        let value = config
            .get(*key)
            .filter(|v| !v.is_empty())
            .map_or_else(|| (*default).to_string(), Clone::clone);
        view.insert((*key).to_string(), value);
    }
    for (key, value) in config {
        if view.contains_key(key) {
            continue;
        }
        let shown = if is_secret_key(key) {
            mask(Some(value))
        } else {
            value.clone()
        };
        view.insert(key.clone(), shown);
    }
    view
}

// ── Installation check ───────────────────────────────────────────────────────

/// Installation state derived from the primary stack's configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallationStatus {
    pub installed: bool,
    pub has_api_key: bool,
    pub has_passwords: bool,
}

fn non_empty(config: &EnvConfig, key: &str) -> bool {
    config.get(key).is_some_and(|v| !v.is_empty())
}

/// Installed means a real (non-placeholder) API key and both database
/// passwords are present.
#[must_use]
pub fn installation_status(config: &EnvConfig) -> InstallationStatus {
    let has_api_key = non_empty(config, API_KEY);
    let has_passwords =
        non_empty(config, OPENWEBUI_DB_PASSWORD) && non_empty(config, MCPDB_PASSWORD);
    let real_api_key = config
        .get(API_KEY)
        .is_some_and(|v| !v.is_empty() && !v.contains(PLACEHOLDER_API_KEY));

    InstallationStatus {
        installed: real_api_key && has_passwords,
        has_api_key,
        has_passwords,
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────
