//! Backend trait for dashboard data operations.
//!
//! The views never talk to the REST client directly; they go through this
//! trait so the dashboard can run against the hosted backend or an in-memory
//! double.

use async_trait::async_trait;
use runscope_core::{ChatMessage, Run, RunFilter, StepLog, UserProfile};
use runscope_error::BackendError;

/// Data operations needed by the dashboard.
///
/// `Send + Sync` because each fetch runs on its own tokio task.
#[async_trait]
pub trait MonitorBackend: Send + Sync {
    /// Runs newest first with owner display names, at most `limit`.
    async fn list_runs(&self, filter: RunFilter, limit: usize) -> Result<Vec<Run>, BackendError>;

    /// Step logs of `run_id` in step order, trigger message propagated.
    async fn list_step_logs(&self, run_id: &str) -> Result<Vec<StepLog>, BackendError>;

    /// Delete one run.
    async fn delete_run(&self, run_id: &str) -> Result<(), BackendError>;

    /// All user profiles, ordered by given name.
    async fn list_user_profiles(&self) -> Result<Vec<UserProfile>, BackendError>;

    /// Chat history of `user_id`, oldest first.
    async fn list_chat_messages(&self, user_id: &str) -> Result<Vec<ChatMessage>, BackendError>;
}
