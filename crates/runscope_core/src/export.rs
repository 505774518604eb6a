//! Workflow export document.
//!
//! The pretty-printed form is pasted into issue trackers, so field names and
//! layout are kept stable: top-level `runId` and `stepLogs`, step fields in
//! snake_case as stored.

use crate::{StepLog, Timestamp};
use runscope_error::JsonError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A run's step logs packaged for sharing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowExport {
    /// Exported run
    pub run_id: String,
    /// Steps in display order
    pub step_logs: Vec<ExportedStep>,
}

/// One step of a [`WorkflowExport`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportedStep {
    /// Ordinal position
    pub step_number: i32,
    /// Stage name
    pub step_name: String,
    /// Captured input payload
    pub input_data: Value,
    /// Captured output payload
    pub output_data: Value,
    /// Free-form metadata
    pub metadata: Option<Value>,
    /// Duration in milliseconds
    pub duration_ms: Option<i64>,
    /// Error text
    pub error_message: Option<String>,
    /// Creation time, verbatim from the backend
    pub created_at: Timestamp,
}

impl From<&StepLog> for ExportedStep {
    fn from(step: &StepLog) -> Self {
        Self {
            step_number: step.step_number,
            step_name: step.step_name.clone(),
            input_data: step.input_data.clone(),
            output_data: step.output_data.clone(),
            metadata: step.metadata.clone(),
            duration_ms: step.duration_ms,
            error_message: step.error_message.clone(),
            created_at: step.created_at.clone(),
        }
    }
}

impl WorkflowExport {
    /// Package `steps` (already in display order) for `run_id`.
    pub fn new(run_id: impl Into<String>, steps: &[StepLog]) -> Self {
        Self {
            run_id: run_id.into(),
            step_logs: steps.iter().map(ExportedStep::from).collect(),
        }
    }

    /// Serialize with two-space indentation.
    pub fn to_pretty_json(&self) -> Result<String, JsonError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| JsonError::new(format!("Failed to serialize workflow export: {}", e)))
    }

    /// Parse a previously exported document.
    pub fn parse(text: &str) -> Result<Self, JsonError> {
        serde_json::from_str(text)
            .map_err(|e| JsonError::new(format!("Failed to parse workflow export: {}", e)))
    }
}
