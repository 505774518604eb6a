//! Background fetches and their outcomes.
//!
//! The UI loop never awaits the backend directly. Each [`FetchRequest`] runs as
//! its own tokio task and reports a [`FetchOutcome`] on a channel the loop
//! drains between frames.

use crate::{DetailRequest, MessagesRequest, MonitorBackend, RequestToken};
use runscope_core::{ChatMessage, Run, RunFilter, StepLog, UserProfile};
use runscope_error::BackendError;
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, instrument, warn};

/// Backend work requested by the view state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchRequest {
    /// Load the run list
    LoadRuns {
        /// Token of this fetch
        token: RequestToken,
        /// Active list filter
        filter: RunFilter,
        /// Maximum rows
        limit: usize,
    },
    /// Load a run's step logs
    LoadStepLogs(DetailRequest),
    /// Delete a run
    DeleteRun(String),
    /// Load the chat user list
    LoadUsers(RequestToken),
    /// Load a user's transcript
    LoadMessages(MessagesRequest),
}

/// Completed backend work.
#[derive(Debug)]
pub enum FetchOutcome {
    /// Run list for the request identified by `token`
    Runs {
        /// Token of the originating request
        token: RequestToken,
        /// Fetched runs
        result: Result<Vec<Run>, BackendError>,
    },
    /// Step logs for the request identified by `token`
    StepLogs {
        /// Token of the originating request
        token: RequestToken,
        /// Fetched steps
        result: Result<Vec<StepLog>, BackendError>,
    },
    /// Delete of `run_id`
    RunDeleted {
        /// Run that was deleted
        run_id: String,
        /// Delete outcome
        result: Result<(), BackendError>,
    },
    /// Chat user list for the request identified by `token`
    Users {
        /// Token of the originating request
        token: RequestToken,
        /// Fetched profiles
        result: Result<Vec<UserProfile>, BackendError>,
    },
    /// Transcript for the request identified by `token`
    Messages {
        /// Token of the originating request
        token: RequestToken,
        /// Fetched messages
        result: Result<Vec<ChatMessage>, BackendError>,
    },
}

impl FetchRequest {
    /// Perform the request against `backend`.
    #[instrument(skip(backend))]
    pub async fn execute(self, backend: &dyn MonitorBackend) -> FetchOutcome {
        match self {
            FetchRequest::LoadRuns {
                token,
                filter,
                limit,
            } => FetchOutcome::Runs {
                token,
                result: backend.list_runs(filter, limit).await,
            },
            FetchRequest::LoadStepLogs(request) => FetchOutcome::StepLogs {
                token: request.token,
                result: backend.list_step_logs(&request.run_id).await,
            },
            FetchRequest::DeleteRun(run_id) => {
                let result = backend.delete_run(&run_id).await;
                FetchOutcome::RunDeleted { run_id, result }
            }
            FetchRequest::LoadUsers(token) => FetchOutcome::Users {
                token,
                result: backend.list_user_profiles().await,
            },
            FetchRequest::LoadMessages(request) => FetchOutcome::Messages {
                token: request.token,
                result: backend.list_chat_messages(&request.user_id).await,
            },
        }
    }
}

/// Spawns fetches and forwards their outcomes to the UI loop.
#[derive(Clone)]
pub struct Dispatcher {
    backend: Arc<dyn MonitorBackend>,
    tx: UnboundedSender<FetchOutcome>,
}

impl Dispatcher {
    /// Create a dispatcher and the receiver its outcomes arrive on.
    pub fn new(backend: Arc<dyn MonitorBackend>) -> (Self, UnboundedReceiver<FetchOutcome>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { backend, tx }, rx)
    }

    /// Run `request` in the background. Must be called inside a tokio runtime.
    pub fn dispatch(&self, request: FetchRequest) {
        debug!(?request, "Dispatching fetch");
        let backend = Arc::clone(&self.backend);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let outcome = request.execute(backend.as_ref()).await;
            if tx.send(outcome).is_err() {
                warn!("UI loop gone, dropping fetch outcome");
            }
        });
    }

    /// Run every request in `requests`.
    pub fn dispatch_all(&self, requests: impl IntoIterator<Item = FetchRequest>) {
        for request in requests {
            self.dispatch(request);
        }
    }
}
