//! Backend implementation over the hosted REST endpoint.

use crate::MonitorBackend;
use async_trait::async_trait;
use runscope_core::{ChatMessage, Run, RunFilter, StepLog, UserProfile};
use runscope_database::MonitorRepository;
use runscope_error::BackendError;

/// [`MonitorBackend`] backed by [`MonitorRepository`].
#[derive(Debug, Clone)]
pub struct RestBackend {
    repository: MonitorRepository,
}

impl RestBackend {
    /// Wrap a repository.
    pub fn new(repository: MonitorRepository) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl MonitorBackend for RestBackend {
    async fn list_runs(&self, filter: RunFilter, limit: usize) -> Result<Vec<Run>, BackendError> {
        self.repository.list_runs(filter, limit).await
    }

    async fn list_step_logs(&self, run_id: &str) -> Result<Vec<StepLog>, BackendError> {
        self.repository.list_step_logs(run_id).await
    }

    async fn delete_run(&self, run_id: &str) -> Result<(), BackendError> {
        self.repository.delete_run(run_id).await
    }

    async fn list_user_profiles(&self) -> Result<Vec<UserProfile>, BackendError> {
        self.repository.list_user_profiles().await
    }

    async fn list_chat_messages(&self, user_id: &str) -> Result<Vec<ChatMessage>, BackendError> {
        self.repository.list_chat_messages(user_id).await
    }
}
