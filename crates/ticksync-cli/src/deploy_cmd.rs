//! The `ticksync deploy` command: fetch the engine's task set, discover
//! local alert files, reconcile, and report one status line per identifier.

use std::path::Path;

use anyhow::{Context, Result};

use ticksync_core::discover;
use ticksync_core::reconcile::{self, Outcome, RemoteMutator};
use ticksync_kapacitor::KapacitorClient;

use crate::config::DeployConfig;

/// Width each identifier is padded to in status lines.
const STATUS_PAD: usize = 50;

/// Mutator that performs no remote calls; backs `--dry-run`. The reconcile
/// loop still computes every operation, so the report shows exactly what a
/// real run would do.
struct NoopMutator;

#[async_trait::async_trait]
impl RemoteMutator for NoopMutator {
    async fn create(&self, _id: &str, _script: &str) -> Result<()> {
        Ok(())
    }

    async fn update(&self, _id: &str, _script: &str) -> Result<()> {
        Ok(())
    }

    async fn delete(&self, _id: &str) -> Result<()> {
        Ok(())
    }
}

pub async fn run_deploy(config: &DeployConfig, dir: &Path, dry_run: bool) -> Result<()> {
    let client = KapacitorClient::new(config.engine.clone(), &config.database);

    // Baseline first: without the current remote state no mutation is safe.
    let remote_ids = client
        .list_task_ids()
        .await
        .context("failed to read current task set, aborting before any mutation")?;
    tracing::info!(remote = remote_ids.len(), "fetched remote task set");

    let alerts = discover::discover_alerts(dir)
        .with_context(|| format!("failed to discover alert files under {}", dir.display()))?;
    tracing::info!(local = alerts.len(), dir = %dir.display(), "discovered alert files");

    let outcomes = if dry_run {
        reconcile::reconcile(remote_ids, &alerts, &config.params, &NoopMutator).await?
    } else {
        reconcile::reconcile(remote_ids, &alerts, &config.params, &client).await?
    };

    for (id, outcome) in &outcomes {
        println!("{}", status_line(id, outcome));
    }
    if dry_run {
        println!("dry run complete (no changes applied): {}", summary_line(&outcomes));
    } else {
        println!("deploy complete: {}", summary_line(&outcomes));
    }

    Ok(())
}

/// `<identifier padded to 50 chars with '.'>[<OUTCOME>]`, with embedded
/// newlines stripped from the outcome text.
fn status_line(id: &str, outcome: &Outcome) -> String {
    let label = outcome.label().replace('\n', "");
    format!("{id:.<width$}[{label}]", width = STATUS_PAD)
}

fn summary_line(outcomes: &[(String, Outcome)]) -> String {
    let mut created = 0;
    let mut updated = 0;
    let mut deleted = 0;
    let mut failed = 0;
    for (_, outcome) in outcomes {
        match outcome {
            Outcome::Created => created += 1,
            Outcome::Updated => updated += 1,
            Outcome::Deleted => deleted += 1,
            Outcome::Failed { .. } => failed += 1,
        }
    }
    format!("{created} created, {updated} updated, {deleted} deleted, {failed} failed")
}
