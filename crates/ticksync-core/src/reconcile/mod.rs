//! The reconciliation loop.
//!
//! Given the engine's current task ids and the discovered local files,
//! decides CREATE, UPDATE, or DELETE per identifier and drives the template
//! rewriter and the [`RemoteMutator`]. After a run in which every mutation
//! succeeds, the remote task set is exactly the local file set.

use std::collections::HashSet;

use anyhow::{Context, Result};
use async_trait::async_trait;

use crate::discover::AlertFile;
use crate::params::DeployParams;
use crate::template;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// The result of one create/update/delete against the remote engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The task was registered for the first time.
    Created,
    /// The existing task's body was replaced.
    Updated,
    /// The task was removed; no local file matched it.
    Deleted,
    /// The mutation failed; the run continued with the next identifier.
    Failed { detail: String },
}

impl Outcome {
    /// Report label: the outcome name, or the failure detail for `Failed`.
    pub fn label(&self) -> &str {
        match self {
            Outcome::Created => "CREATED",
            Outcome::Updated => "UPDATED",
            Outcome::Deleted => "DELETED",
            Outcome::Failed { detail } => detail,
        }
    }
}

// ---------------------------------------------------------------------------
// Mutator trait
// ---------------------------------------------------------------------------

/// Mutation interface to the remote alert engine.
///
/// One implementation talks to a real engine over HTTP; dry runs and tests
/// substitute their own. The trait is object-safe so callers can pass
/// `&dyn RemoteMutator`.
///
/// Calls are not retried here: an `Err` becomes a [`Outcome::Failed`] for
/// that identifier and the run moves on.
#[async_trait]
pub trait RemoteMutator: Send + Sync {
    /// Register a new task. Errors if the engine already has one with this id.
    async fn create(&self, id: &str, script: &str) -> Result<()>;

    /// Replace an existing task's body. Errors if no such task exists.
    async fn update(&self, id: &str, script: &str) -> Result<()>;

    /// Remove a task. Errors if no such task exists.
    async fn delete(&self, id: &str) -> Result<()>;
}

// Compile-time assertion: RemoteMutator must be object-safe.
const _: () = {
    fn _assert_object_safe(_: &dyn RemoteMutator) {}
};

// ---------------------------------------------------------------------------
// Reconcile
// ---------------------------------------------------------------------------

/// Reconcile the remote task set against the discovered local files.
///
/// Each local file is processed fully before the next: read, rewrite, then
/// `update` if the id is already registered (claiming it from the pending
/// delete set) or `create` otherwise. Ids left unclaimed at the end are
/// deleted, in sorted order. Returns one `(id, outcome)` pair per processed
/// identifier: create/update outcomes in discovery order, then deletes.
///
/// A failed mutation is recorded and the run continues -- one bad alert must
/// not block deployment of the others. A local file that cannot be read is
/// fatal for the whole run: deploying from a partial view of the repository
/// could delete live alerts.
pub async fn reconcile(
    remote_ids: HashSet<String>,
    local_alerts: &[AlertFile],
    params: &DeployParams,
    mutator: &dyn RemoteMutator,
) -> Result<Vec<(String, Outcome)>> {
    let mut pending_deletes = remote_ids;
    let mut outcomes = Vec::with_capacity(local_alerts.len() + pending_deletes.len());

    for alert in local_alerts {
        let raw = std::fs::read_to_string(&alert.path)
            .with_context(|| format!("failed to read alert file {}", alert.path.display()))?;
        let script = template::rewrite(&raw, params);

        let outcome = if pending_deletes.remove(&alert.id) {
            match mutator.update(&alert.id, &script).await {
                Ok(()) => Outcome::Updated,
                Err(e) => failed(e),
            }
        } else {
            match mutator.create(&alert.id, &script).await {
                Ok(()) => Outcome::Created,
                Err(e) => failed(e),
            }
        };

        if let Outcome::Failed { detail } = &outcome {
            tracing::warn!(id = %alert.id, detail = %detail, "mutation failed, continuing");
        }
        outcomes.push((alert.id.clone(), outcome));
    }

    // Whatever no local file claimed no longer belongs in the engine.
    // Sorted so the delete report is deterministic.
    let mut delete_ids: Vec<String> = pending_deletes.into_iter().collect();
    delete_ids.sort();
    for id in delete_ids {
        let outcome = match mutator.delete(&id).await {
            Ok(()) => Outcome::Deleted,
            Err(e) => failed(e),
        };
        if let Outcome::Failed { detail } = &outcome {
            tracing::warn!(id = %id, detail = %detail, "delete failed, continuing");
        }
        outcomes.push((id, outcome));
    }

    Ok(outcomes)
}

/// Capture the full error chain as the failure detail.
fn failed(e: anyhow::Error) -> Outcome {
    Outcome::Failed {
        detail: format!("{e:#}"),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
