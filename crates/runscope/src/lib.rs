//! Runscope - monitoring for search runs and chat transcripts
//!
//! Runscope reads the records a search pipeline writes to a hosted
//! PostgREST backend and presents them two ways: an interactive terminal
//! dashboard and a scriptable CLI.
//!
//! # Features
//!
//! - **Search Runs**: newest-first run list with owner names, step-by-step logs
//!   per run, deletion of runs
//! - **Chat Monitor**: per-user chat transcripts
//! - **Workflow Export**: a run's step logs as pretty JSON on the clipboard
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use runscope::{BackendConfig, MonitorRepository, RunFilter, SupabaseClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = BackendConfig::load(None)?;
//!     let repository = MonitorRepository::new(SupabaseClient::new(&config), &config);
//!
//!     for run in repository.list_runs(RunFilter::default(), 10).await? {
//!         println!("{} {} {}", run.short_id(), run.status, run.user_label());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Cargo Features
//!
//! - `tui` (default) - Terminal dashboard and clipboard export
//!
//! # Architecture
//!
//! - `runscope_error` - Error types
//! - `runscope_core` - Runs, step logs, chat messages, profiles, workflow export
//! - `runscope_database` - Configuration, REST client, data access
//! - `runscope_tui` - Terminal dashboard
//!
//! This crate (`runscope`) re-exports everything for convenience.

mod logging;

pub use logging::{LogTarget, LoggingConfig, default_log_file, init_logging};

pub use runscope_error::{
    BackendError, BackendErrorKind, ClipboardError, ConfigError, JsonError, RunscopeError,
    RunscopeErrorKind, RunscopeResult,
};

pub use runscope_core::{
    ChatMessage, ExportedStep, Run, RunFilter, RunStatus, Sender, StepLog, UNKNOWN_USER,
    UserProfile, WorkflowExport, attach_user_names, display_name, distinct_user_ids, order_steps,
    propagate_trigger_message,
};

pub use runscope_database::{
    BackendConfig, DatabaseResult, Direction, MonitorRepository, SupabaseClient, TableNames,
    TableQuery,
};

#[cfg(feature = "tui")]
pub use runscope_tui::{
    App, AppOptions, MonitorBackend, RestBackend, TuiError, TuiErrorKind, TuiResult,
    WorkflowCopier, run_tui,
};
