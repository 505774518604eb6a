//! Step-by-step execution logs of a run.

use crate::Timestamp;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Key of the originating user message inside step 1's input payload.
pub const TRIGGER_MESSAGE_KEY: &str = "triggerMessage";

/// One recorded stage of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepLog {
    /// Row ID
    pub id: String,
    /// Parent run
    pub run_id: String,
    /// Ordinal position within the run, unique per run
    pub step_number: i32,
    /// Stage name
    pub step_name: String,
    /// Captured input payload
    #[serde(default)]
    pub input_data: Value,
    /// Captured output payload
    #[serde(default)]
    pub output_data: Value,
    /// Free-form metadata
    #[serde(default)]
    pub metadata: Option<Value>,
    /// Wall-clock duration of the stage
    #[serde(default)]
    pub duration_ms: Option<i64>,
    /// Error text when the stage failed
    #[serde(default)]
    pub error_message: Option<String>,
    /// Creation time, kept as the backend rendered it
    pub created_at: Timestamp,
    /// Originating user message, copied from step 1 after fetch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger_message: Option<String>,
}

impl StepLog {
    /// Whether the stage recorded an error.
    pub fn failed(&self) -> bool {
        self.error_message.is_some()
    }
}

/// Copy the first step's `triggerMessage` onto every step.
///
/// Expects `steps` already in step order. Leaves every step untouched when
/// the first input has no string `triggerMessage`.
///
/// # Examples
///
/// ```
/// use runscope_core::{propagate_trigger_message, StepLog};
/// use serde_json::json;
///
/// let step = |n: i32, input: serde_json::Value| -> StepLog {
///     serde_json::from_value(json!({
///         "id": format!("s{n}"), "run_id": "r1", "step_number": n,
///         "step_name": "stage", "input_data": input,
///         "created_at": "2024-05-01T10:00:00Z"
///     }))
///     .unwrap()
/// };
/// let mut steps = vec![step(1, json!({"triggerMessage": "find oats"})), step(2, json!({}))];
/// propagate_trigger_message(&mut steps);
/// assert!(steps.iter().all(|s| s.trigger_message.as_deref() == Some("find oats")));
/// ```
pub fn propagate_trigger_message(steps: &mut [StepLog]) {
    let Some(trigger) = steps
        .first()
        .and_then(|first| first.input_data.get(TRIGGER_MESSAGE_KEY))
        .and_then(Value::as_str)
        .map(str::to_owned)
    else {
        return;
    };

    for step in steps.iter_mut() {
        step.trigger_message = Some(trigger.clone());
    }
}

/// Sort `steps` by ascending step number and report duplicated numbers.
pub fn order_steps(steps: &mut [StepLog]) -> Vec<i32> {
    steps.sort_by_key(|step| step.step_number);
    let mut duplicates: Vec<i32> = steps
        .windows(2)
        .filter(|pair| pair[0].step_number == pair[1].step_number)
        .map(|pair| pair[0].step_number)
        .collect();
    duplicates.dedup();
    if !duplicates.is_empty() {
        tracing::warn!(run_id = %steps[0].run_id, ?duplicates, "Duplicate step numbers in run");
    }
    duplicates
}
