//! Search run records.

use crate::UNKNOWN_USER;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Execution status of a run as stored by the workflow.
///
/// Unknown values are preserved verbatim in [`RunStatus::Other`].
///
/// # Examples
///
/// ```
/// use runscope_core::RunStatus;
///
/// assert_eq!(RunStatus::from("IN_PROGRESS".to_string()), RunStatus::InProgress);
/// assert_eq!(RunStatus::from("QUEUED".to_string()).to_string(), "QUEUED");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(from = "Option<String>", into = "String")]
pub enum RunStatus {
    /// Finished without error
    #[display("SUCCESS")]
    Success,
    /// Still executing
    #[display("IN_PROGRESS")]
    InProgress,
    /// Aborted with an error
    #[display("FAILED")]
    Failed,
    /// Anything else the workflow wrote
    #[display("{}", _0)]
    Other(String),
}

impl From<String> for RunStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "SUCCESS" => Self::Success,
            "IN_PROGRESS" => Self::InProgress,
            "FAILED" => Self::Failed,
            _ => Self::Other(raw),
        }
    }
}

impl From<Option<String>> for RunStatus {
    fn from(raw: Option<String>) -> Self {
        raw.map(Self::from)
            .unwrap_or_else(|| Self::Other("UNKNOWN".to_string()))
    }
}

impl From<RunStatus> for String {
    fn from(status: RunStatus) -> Self {
        status.to_string()
    }
}

/// One recorded execution of the search workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Run {
    /// Row ID
    pub id: String,
    /// Owning user, if the run was triggered by one
    pub user_id: Option<String>,
    /// Free-text run name
    #[serde(default)]
    pub name: Option<String>,
    /// Query text the run started from
    #[serde(default)]
    pub initial_query: Option<String>,
    /// Execution status
    pub status: RunStatus,
    /// Whether an operator has reviewed the run
    #[serde(default)]
    pub is_reviewed: bool,
    /// Whether the run was flagged for attention
    #[serde(default)]
    pub is_flagged: bool,
    /// Creation time
    #[serde(deserialize_with = "crate::timestamp::deserialize")]
    pub created_at: DateTime<Utc>,
    /// Display name of the owning user, resolved after fetch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
}

impl Run {
    /// Display name of the owning user, or the placeholder when unresolved.
    pub fn user_label(&self) -> &str {
        self.user_name.as_deref().unwrap_or(UNKNOWN_USER)
    }

    /// First eight characters of the ID, for headings.
    pub fn short_id(&self) -> &str {
        match self.id.char_indices().nth(8) {
            Some((end, _)) => &self.id[..end],
            None => &self.id,
        }
    }
}

/// Pre-filter applied when listing runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct RunFilter {
    /// Only return runs with the flagged marker set
    pub flagged_only: bool,
}

impl RunFilter {
    /// Filter that returns only flagged runs.
    pub fn flagged() -> Self {
        Self { flagged_only: true }
    }
}
