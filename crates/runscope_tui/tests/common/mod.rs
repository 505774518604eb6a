//! In-memory backend double shared by the view-state tests.

#![allow(dead_code)]

use async_trait::async_trait;
use runscope_core::{ChatMessage, Run, RunFilter, StepLog, UserProfile};
use runscope_error::{BackendError, BackendErrorKind};
use runscope_tui::MonitorBackend;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Default)]
pub struct FakeBackend {
    pub runs: Mutex<Vec<Run>>,
    pub steps: HashMap<String, Vec<StepLog>>,
    pub users: Vec<UserProfile>,
    pub messages: HashMap<String, Vec<ChatMessage>>,
    pub fail_runs: bool,
    pub fail_delete: bool,
    pub message_calls: AtomicUsize,
}

impl FakeBackend {
    pub fn with_runs(runs: Vec<Run>) -> Self {
        Self {
            runs: Mutex::new(runs),
            ..Self::default()
        }
    }

    pub fn message_calls(&self) -> usize {
        self.message_calls.load(Ordering::SeqCst)
    }
}

fn api_error(status: u16, message: &str) -> BackendError {
    BackendError::new(BackendErrorKind::Api {
        status,
        message: message.to_string(),
    })
}

#[async_trait]
impl MonitorBackend for FakeBackend {
    async fn list_runs(&self, filter: RunFilter, limit: usize) -> Result<Vec<Run>, BackendError> {
        if self.fail_runs {
            return Err(api_error(500, "database unavailable"));
        }
        let runs = self.runs.lock().unwrap();
        Ok(runs
            .iter()
            .filter(|run| !filter.flagged_only || run.is_flagged)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn list_step_logs(&self, run_id: &str) -> Result<Vec<StepLog>, BackendError> {
        Ok(self.steps.get(run_id).cloned().unwrap_or_default())
    }

    async fn delete_run(&self, run_id: &str) -> Result<(), BackendError> {
        if self.fail_delete {
            return Err(api_error(403, "permission denied for table nutri_search_runs"));
        }
        self.runs.lock().unwrap().retain(|run| run.id != run_id);
        Ok(())
    }

    async fn list_user_profiles(&self) -> Result<Vec<UserProfile>, BackendError> {
        Ok(self.users.clone())
    }

    async fn list_chat_messages(&self, user_id: &str) -> Result<Vec<ChatMessage>, BackendError> {
        self.message_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.messages.get(user_id).cloned().unwrap_or_default())
    }
}

pub fn run(id: &str, created_at: &str, flagged: bool) -> Run {
    serde_json::from_value(json!({
        "id": id,
        "user_id": "u1",
        "name": "nutrient lookup",
        "initial_query": "high protein breakfast",
        "status": "SUCCESS",
        "is_reviewed": false,
        "is_flagged": flagged,
        "created_at": created_at,
        "user_name": "Ada Lovelace"
    }))
    .unwrap()
}

pub fn step(run_id: &str, number: i32, input: Value, error: Option<&str>) -> StepLog {
    serde_json::from_value(json!({
        "id": format!("{run_id}-s{number}"),
        "run_id": run_id,
        "step_number": number,
        "step_name": format!("stage {number}"),
        "input_data": input,
        "output_data": {"ok": error.is_none()},
        "metadata": null,
        "duration_ms": 120,
        "error_message": error,
        "created_at": "2024-05-01T10:00:00+00:00"
    }))
    .unwrap()
}

pub fn profile(user_id: &str, display_name: &str) -> UserProfile {
    UserProfile {
        user_id: user_id.to_string(),
        name: Some(display_name.to_string()),
        surname: None,
        display_name: display_name.to_string(),
    }
}

pub fn message(id: &str, user_id: &str, sender: &str, text: &str) -> ChatMessage {
    serde_json::from_value(json!({
        "message_id": id,
        "user_id": user_id,
        "sender": sender,
        "message_type": "text",
        "content_text": text,
        "content_json": null,
        "created_at": "2024-05-01T10:00:00+00:00"
    }))
    .unwrap()
}
