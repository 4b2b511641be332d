//! Application service: deployment delegation and background tracking.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, PoisonError};

use chrono::Utc;
use nlq_common::{DeploymentRecord, DeploymentResult, DeploymentState, Stack};
use tokio::task::JoinHandle;

use crate::application::ports::DeploymentClient;
use crate::domain::host::ExecutionContext;

/// Where deployment requests are sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentTarget {
    pub context: ExecutionContext,
    /// Explicit host that bypasses the context mapping.
    pub host_override: Option<String>,
}

impl DeploymentTarget {
    #[must_use]
    pub fn new(context: ExecutionContext, host_override: Option<String>) -> Self {
        Self {
            context,
            host_override: host_override.filter(|h| !h.trim().is_empty()),
        }
    }

    #[must_use]
    pub fn host(&self) -> &str {
        self.host_override
            .as_deref()
            .unwrap_or_else(|| self.context.deployment_host())
    }
}

/// Deploy one stack through the helper.
pub async fn deploy(
    client: &impl DeploymentClient,
    target: &DeploymentTarget,
    stack: Stack,
    port: u16,
) -> DeploymentResult {
    let host = target.host();
    tracing::info!(%stack, host, port, "requesting deployment");
    client.deploy(host, port, stack).await
}

// ── Tracker ───────────────────────────────────────────────────────────────────

#[derive(Debug)]
struct Entry {
    generation: u64,
    record: DeploymentRecord,
}

#[derive(Debug, Default)]
struct Records {
    next_generation: u64,
    entries: BTreeMap<Stack, Entry>,
}

/// Per-stack state of background deployments.
///
/// Cloning yields another handle onto the same records.
#[derive(Debug, Clone, Default)]
pub struct DeploymentTracker {
    records: Arc<Mutex<Records>>,
}

/// Handle on one spawned deployment.
#[derive(Debug)]
pub struct DeploymentHandle {
    task: JoinHandle<DeploymentResult>,
}

impl DeploymentHandle {
    /// Wait for the deployment to finish.
    pub async fn wait(self) -> DeploymentResult {
        match self.task.await {
            Ok(result) => result,
            Err(e) => DeploymentResult::error(format!("deployment task failed: {e}")),
        }
    }
}

impl DeploymentTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `work` in the background and record its progress under `stack`.
    ///
    /// A newer deployment of the same stack supersedes the record of an
    /// older one still in flight.
    pub fn spawn<F>(&self, stack: Stack, work: F) -> DeploymentHandle
    where
        F: Future<Output = DeploymentResult> + Send + 'static,
    {
        let generation = self.begin(stack);
        let tracker = self.clone();
        let task = tokio::spawn(async move {
            tracker.update(stack, generation, |record| record.state = DeploymentState::Running);
            let result = work.await;
            match &result {
                DeploymentResult::Success { .. } => {
                    tracing::info!(%stack, "deployment succeeded");
                }
                DeploymentResult::Error { message, .. } => {
                    tracing::error!(%stack, error = %message, "deployment failed");
                }
            }
            let finished = result.clone();
            tracker.update(stack, generation, move |record| {
                record.state = if finished.is_success() {
                    DeploymentState::Succeeded
                } else {
                    DeploymentState::Failed
                };
                record.finished_at = Some(Utc::now());
                record.result = Some(finished);
            });
            result
        });
        DeploymentHandle { task }
    }

    /// Latest record for every stack that has been deployed.
    #[must_use]
    pub fn snapshot(&self) -> BTreeMap<Stack, DeploymentRecord> {
        let records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        records
            .entries
            .iter()
            .map(|(stack, entry)| (*stack, entry.record.clone()))
            .collect()
    }

    #[must_use]
    pub fn get(&self, stack: Stack) -> Option<DeploymentRecord> {
        let records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        records.entries.get(&stack).map(|entry| entry.record.clone())
    }

    fn begin(&self, stack: Stack) -> u64 {
        let mut records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        records.next_generation += 1;
        let generation = records.next_generation;
        records.entries.insert(
            stack,
            Entry {
                generation,
                record: DeploymentRecord {
                    state: DeploymentState::Pending,
                    started_at: Utc::now(),
                    finished_at: None,
                    result: None,
                },
            },
        );
        generation
    }

    fn update(&self, stack: Stack, generation: u64, apply: impl FnOnce(&mut DeploymentRecord)) {
        let mut records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(entry) = records
            .entries
            .get_mut(&stack)
            .filter(|entry| entry.generation == generation)
        {
            apply(&mut entry.record);
        }
    }
}
