//! Wire types for the Kapacitor v1 task API.

use serde::{Deserialize, Serialize};

/// Retention policy paired with the backing database on every task.
pub const RETENTION_POLICY: &str = "autogen";

/// Request body for `POST /kapacitor/v1/tasks` and `PATCH .../tasks/{id}`.
#[derive(Debug, Serialize)]
pub struct TaskPayload<'a> {
    pub id: &'a str,
    #[serde(rename = "type")]
    pub task_type: &'a str,
    pub dbrps: Vec<Dbrp<'a>>,
    pub script: &'a str,
    pub status: &'a str,
}

/// A database + retention-policy pair a task reads from.
#[derive(Debug, Serialize)]
pub struct Dbrp<'a> {
    pub db: &'a str,
    pub rp: &'a str,
}

impl<'a> TaskPayload<'a> {
    /// The fixed request shape: a stream task against a single dbrp with the
    /// run's backing store, enabled on arrival.
    pub fn new(id: &'a str, db: &'a str, script: &'a str) -> Self {
        Self {
            id,
            task_type: "stream",
            dbrps: vec![Dbrp {
                db,
                rp: RETENTION_POLICY,
            }],
            script,
            status: "enabled",
        }
    }
}

/// Response body for `GET /kapacitor/v1/tasks`. Only the ids are consumed.
#[derive(Debug, Deserialize)]
pub struct TaskListResponse {
    pub tasks: Vec<TaskRef>,
}

/// Minimal view of one registered task.
#[derive(Debug, Deserialize)]
pub struct TaskRef {
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_serializes_with_fixed_shape() {
        let payload = TaskPayload::new("cpu_high", "telegraf", "stream\n");
        let json = serde_json::to_value(&payload).expect("payload should serialize");

        assert_eq!(
            json,
            serde_json::json!({
                "id": "cpu_high",
                "type": "stream",
                "dbrps": [{"db": "telegraf", "rp": "autogen"}],
                "script": "stream\n",
                "status": "enabled",
            })
        );
    }

    #[test]
    fn task_list_deserializes_ids() {
        let body = r#"{"tasks": [{"id": "a", "status": "enabled"}, {"id": "b"}]}"#;
        let list: TaskListResponse = serde_json::from_str(body).expect("list should deserialize");

        let ids: Vec<&str> = list.tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }
}
