//! HTTP client for the Kapacitor v1 task API.

use std::collections::HashSet;

use anyhow::{Context, Result, bail};
use async_trait::async_trait;

use ticksync_core::reconcile::RemoteMutator;

use crate::config::EngineConfig;
use crate::payload::{TaskListResponse, TaskPayload};

/// Client for one Kapacitor engine, scoped to one backing database.
///
/// Connection settings and credentials are captured at construction and
/// reused for every request; the underlying `reqwest::Client` pools
/// connections across calls.
pub struct KapacitorClient {
    config: EngineConfig,
    /// Backing store written into every task payload.
    database: String,
    http: reqwest::Client,
}

impl KapacitorClient {
    pub fn new(config: EngineConfig, database: impl Into<String>) -> Self {
        Self {
            config,
            database: database.into(),
            http: reqwest::Client::new(),
        }
    }

    fn tasks_url(&self) -> String {
        format!("{}/kapacitor/v1/tasks", self.config.base_url)
    }

    fn task_url(&self, id: &str) -> String {
        format!("{}/kapacitor/v1/tasks/{id}", self.config.base_url)
    }

    fn authed(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request.basic_auth(
            &self.config.credentials.username,
            Some(&self.config.credentials.password),
        )
    }

    /// Fetch the ids of every task currently registered in the engine.
    ///
    /// This is the run's baseline. Callers treat a failure here as fatal:
    /// no mutation is safe without a known remote state.
    pub async fn list_task_ids(&self) -> Result<HashSet<String>> {
        let response = self
            .authed(self.http.get(self.tasks_url()))
            .send()
            .await
            .context("failed to fetch task list from kapacitor")?;
        let response = check_status(response, "listing tasks").await?;

        let list: TaskListResponse = response
            .json()
            .await
            .context("failed to decode kapacitor task list")?;

        Ok(list.tasks.into_iter().map(|t| t.id).collect())
    }
}

/// Surface a non-2xx response as an error carrying the body text, which is
/// where kapacitor puts its error detail.
async fn check_status(response: reqwest::Response, action: &str) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    bail!("kapacitor returned {status} while {action}: {body}");
}

#[async_trait]
impl RemoteMutator for KapacitorClient {
    async fn create(&self, id: &str, script: &str) -> Result<()> {
        tracing::debug!(id = %id, "creating kapacitor task");
        let payload = TaskPayload::new(id, &self.database, script);
        let response = self
            .authed(self.http.post(self.tasks_url()).json(&payload))
            .send()
            .await
            .with_context(|| format!("create request for task {id} failed"))?;
        check_status(response, "creating task").await?;
        Ok(())
    }

    async fn update(&self, id: &str, script: &str) -> Result<()> {
        tracing::debug!(id = %id, "updating kapacitor task");
        let payload = TaskPayload::new(id, &self.database, script);
        let response = self
            .authed(self.http.patch(self.task_url(id)).json(&payload))
            .send()
            .await
            .with_context(|| format!("update request for task {id} failed"))?;
        check_status(response, "updating task").await?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        tracing::debug!(id = %id, "deleting kapacitor task");
        let response = self
            .authed(self.http.delete(self.task_url(id)))
            .send()
            .await
            .with_context(|| format!("delete request for task {id} failed"))?;
        check_status(response, "deleting task").await?;
        Ok(())
    }
}
