//! Application service: configuration use-cases.

use nlq_common::Stack;

use crate::application::ports::ConfigStore;
use crate::domain::config::{self, EnvConfig, InstallationStatus};

/// Replace a stack's configuration. Returns `false` when the write failed.
pub async fn save_config(store: &impl ConfigStore, stack: Stack, config: &EnvConfig) -> bool {
    store.save(stack, config).await
}

/// Primary stack configuration with secrets masked.
pub async fn masked_config(store: &impl ConfigStore) -> EnvConfig {
    config::masked_view(&store.load(Stack::Nlq).await)
}

/// Installation state of the primary stack.
pub async fn installation_status(store: &impl ConfigStore) -> InstallationStatus {
    config::installation_status(&store.load(Stack::Nlq).await)
}

/// Build a configuration record from an arbitrary JSON object.
///
/// String values are stored verbatim; any other value is stored as its JSON
/// text. Returns `None` when `body` is not an object.
#[must_use]
pub fn config_from_json(body: &serde_json::Value) -> Option<EnvConfig> {
    let object = body.as_object()?;
    Some(
        object
            .iter()
            .map(|(key, value)| {
                let text = match value {
                    serde_json::Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (key.clone(), text)
            })
            .collect(),
    )
}
