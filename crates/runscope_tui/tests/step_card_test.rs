mod common;

use common::step;
use runscope_core::propagate_trigger_message;
use runscope_tui::{CardSection, CardState, StepCards, StepStatus, card_header, card_sections};
use serde_json::json;

#[test]
fn sections_follow_fixed_order() {
    let mut steps = vec![
        step("r1", 1, json!({"triggerMessage": "find vegan protein"}), Some("boom")),
        step("r1", 2, json!({"query": "tofu"}), None),
    ];
    steps[0].metadata = Some(json!({"model": "small"}));
    propagate_trigger_message(&mut steps);

    let titles: Vec<&str> = card_sections(&steps[0]).iter().map(|s| s.title()).collect();
    assert_eq!(
        titles,
        vec!["Trigger Message", "Error", "Input", "Output", "Metadata"]
    );

    // Later steps carry the trigger but do not show it
    assert_eq!(steps[1].trigger_message.as_deref(), Some("find vegan protein"));
    let sections = card_sections(&steps[1]);
    assert_eq!(
        sections.iter().map(|s| s.title()).collect::<Vec<_>>(),
        vec!["Input", "Output"]
    );
    assert_eq!(sections[0], CardSection::Input("{\n  \"query\": \"tofu\"\n}".to_string()));
}

#[test]
fn header_shows_positive_duration_only() {
    let mut step = step("r1", 3, json!({}), None);
    assert_eq!(
        card_header(&step),
        ("3. stage 3".to_string(), Some("120ms".to_string()))
    );

    step.duration_ms = Some(0);
    assert_eq!(card_header(&step).1, None);
    step.duration_ms = None;
    assert_eq!(card_header(&step).1, None);
}

#[test]
fn status_reflects_error_presence() {
    assert_eq!(StepStatus::of(&step("r1", 1, json!({}), None)), StepStatus::Succeeded);
    assert_eq!(
        StepStatus::of(&step("r1", 1, json!({}), Some("bad"))),
        StepStatus::Failed
    );
}

#[test]
fn cards_start_collapsed_and_toggle_independently() {
    let mut cards = StepCards::collapsed(3);
    assert_eq!(cards.len(), 3);
    cards.toggle(1);
    assert_eq!(cards.state(0), CardState::Collapsed);
    assert_eq!(cards.state(1), CardState::Expanded);
    cards.toggle(1);
    assert_eq!(cards.state(1), CardState::Collapsed);
    // Out of range indexes read as collapsed
    assert_eq!(cards.state(7), CardState::Collapsed);
}
