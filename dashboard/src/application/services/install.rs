//! Application service: installation use-case.
//!
//! Persists the wizard's configuration and reports which stacks should be
//! deployed. Spawning the deployments is left to the caller.

use nlq_common::Stack;

use crate::application::ports::ConfigStore;
use crate::application::services::port_allocation::NegotiatedPort;
use crate::domain::error::InstallError;
use crate::domain::install::InstallRequest;

/// Persist configuration for the requested stacks.
///
/// The requested helper port is validated before anything is written and
/// adopted as the negotiated port once the primary stack is saved. A failed
/// migration save is logged and drops that stack from the returned list.
///
/// # Errors
///
/// - [`InstallError::Port`] when `deploymentServicePort` is out of range.
/// - [`InstallError::SaveFailed`] when the primary stack cannot be saved.
pub async fn install(
    store: &impl ConfigStore,
    negotiated: &NegotiatedPort,
    request: &InstallRequest,
) -> Result<Vec<Stack>, InstallError> {
    let port = request.deployment_port()?;

    tracing::info!("saving configuration");
    if !store.save(Stack::Nlq, &request.nlq_config()).await {
        return Err(InstallError::SaveFailed(Stack::Nlq));
    }

    let mut stacks = vec![Stack::Nlq];
    if let Some(migration) = request.migration_config() {
        if store.save(Stack::Migration, &migration).await {
            stacks.push(Stack::Migration);
        } else {
            tracing::warn!("migration configuration not saved; skipping its deployment");
        }
    }

    if let Some(port) = port {
        negotiated.set(port);
    }
    Ok(stacks)
}
