//! Core data types for runscope.
//!
//! Rows of the four backend collections (runs, step logs, chat messages, user
//! profiles), the derived joins computed after a fetch, and the workflow export
//! document.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod chat;
mod export;
mod profile;
mod run;
mod step_log;
mod timestamp;

pub use chat::{ChatMessage, Sender};
pub use export::{ExportedStep, WorkflowExport};
pub use profile::{attach_user_names, distinct_user_ids, display_name, UserProfile, UNKNOWN_USER};
pub use run::{Run, RunFilter, RunStatus};
pub use step_log::{order_steps, propagate_trigger_message, StepLog, TRIGGER_MESSAGE_KEY};
pub use timestamp::Timestamp;
