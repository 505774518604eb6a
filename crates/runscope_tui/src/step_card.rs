//! Step log card: header, status and expandable sections.

use runscope_core::StepLog;
use serde_json::Value;

/// Whether a card shows its sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CardState {
    /// Header only
    #[default]
    Collapsed,
    /// Header plus sections
    Expanded,
}

impl CardState {
    fn toggled(self) -> Self {
        match self {
            CardState::Collapsed => CardState::Expanded,
            CardState::Expanded => CardState::Collapsed,
        }
    }
}

/// Outcome indicator of one step, derived only from its error text.
///
/// There is no in-progress state at step level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepStatus {
    /// No error recorded
    Succeeded,
    /// Error recorded
    Failed,
}

impl StepStatus {
    /// Status of `step`.
    pub fn of(step: &StepLog) -> Self {
        if step.failed() {
            StepStatus::Failed
        } else {
            StepStatus::Succeeded
        }
    }

    /// Glyph shown in front of the card title.
    pub fn icon(self) -> &'static str {
        match self {
            StepStatus::Succeeded => "✔",
            StepStatus::Failed => "✘",
        }
    }
}

/// Expand/collapse state of every card in the detail pane.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StepCards {
    states: Vec<CardState>,
}

impl StepCards {
    /// All collapsed, one per step.
    pub fn collapsed(count: usize) -> Self {
        Self {
            states: vec![CardState::Collapsed; count],
        }
    }

    /// State of card `index`; out-of-range cards read as collapsed.
    pub fn state(&self, index: usize) -> CardState {
        self.states.get(index).copied().unwrap_or_default()
    }

    /// Flip card `index`.
    pub fn toggle(&mut self, index: usize) {
        if let Some(state) = self.states.get_mut(index) {
            *state = state.toggled();
        }
    }

    /// Number of cards.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Whether there are no cards.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

/// One block of an expanded card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardSection {
    /// Originating user message
    TriggerMessage(String),
    /// Error text
    Error(String),
    /// Pretty-printed input payload
    Input(String),
    /// Pretty-printed output payload
    Output(String),
    /// Pretty-printed metadata
    Metadata(String),
}

impl CardSection {
    /// Section heading.
    pub fn title(&self) -> &'static str {
        match self {
            CardSection::TriggerMessage(_) => "Trigger Message",
            CardSection::Error(_) => "Error",
            CardSection::Input(_) => "Input",
            CardSection::Output(_) => "Output",
            CardSection::Metadata(_) => "Metadata",
        }
    }

    /// Section body.
    pub fn body(&self) -> &str {
        match self {
            CardSection::TriggerMessage(text)
            | CardSection::Error(text)
            | CardSection::Input(text)
            | CardSection::Output(text)
            | CardSection::Metadata(text) => text,
        }
    }
}

/// Title and optional duration label of a card.
pub fn card_header(step: &StepLog) -> (String, Option<String>) {
    let title = format!("{}. {}", step.step_number, step.step_name);
    let duration = step
        .duration_ms
        .filter(|ms| *ms > 0)
        .map(|ms| format!("{}ms", ms));
    (title, duration)
}

/// Sections of an expanded card, in display order.
///
/// The trigger message is shown on step 1 only.
pub fn card_sections(step: &StepLog) -> Vec<CardSection> {
    let mut sections = Vec::with_capacity(5);

    if step.step_number == 1
        && let Some(trigger) = &step.trigger_message
    {
        sections.push(CardSection::TriggerMessage(trigger.clone()));
    }
    if let Some(error) = &step.error_message {
        sections.push(CardSection::Error(error.clone()));
    }
    sections.push(CardSection::Input(pretty(&step.input_data)));
    sections.push(CardSection::Output(pretty(&step.output_data)));
    if let Some(metadata) = &step.metadata {
        sections.push(CardSection::Metadata(pretty(metadata)));
    }

    sections
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
