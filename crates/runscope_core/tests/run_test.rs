use runscope_core::{
    attach_user_names, distinct_user_ids, Run, RunStatus, UserProfile, UNKNOWN_USER,
};
use serde_json::json;

fn run(id: &str, user_id: Option<&str>) -> Run {
    serde_json::from_value(json!({
        "id": id,
        "user_id": user_id,
        "name": null,
        "initial_query": "high protein breakfast",
        "status": "SUCCESS",
        "is_reviewed": false,
        "created_at": "2024-05-01T10:00:00.123456+00:00"
    }))
    .unwrap()
}

fn profile(user_id: &str, name: Option<&str>, surname: Option<&str>) -> UserProfile {
    UserProfile {
        user_id: user_id.to_string(),
        name: name.map(String::from),
        surname: surname.map(String::from),
        display_name: String::new(),
    }
}

#[test]
fn decodes_backend_row_with_missing_optional_columns() {
    let run = run("0f8c2a1e-77aa-4bd2-9c1d-1234567890ab", Some("u1"));
    assert_eq!(run.status, RunStatus::Success);
    assert!(!run.is_flagged);
    assert_eq!(run.user_name, None);
    assert_eq!(run.user_label(), UNKNOWN_USER);
    assert_eq!(run.short_id(), "0f8c2a1e");
}

#[test]
fn unknown_and_null_statuses_are_preserved() {
    let status: RunStatus = serde_json::from_value(json!("QUEUED")).unwrap();
    assert_eq!(status, RunStatus::Other("QUEUED".to_string()));
    assert_eq!(serde_json::to_value(&status).unwrap(), json!("QUEUED"));

    let missing: RunStatus = serde_json::from_value(json!(null)).unwrap();
    assert_eq!(missing.to_string(), "UNKNOWN");
}

#[test]
fn distinct_user_ids_collapses_repeats_and_skips_anonymous_runs() {
    let runs = vec![
        run("r1", Some("u2")),
        run("r2", Some("u1")),
        run("r3", Some("u2")),
        run("r4", None),
    ];
    let ids: Vec<String> = distinct_user_ids(&runs).into_iter().collect();
    assert_eq!(ids, vec!["u1".to_string(), "u2".to_string()]);
}

#[test]
fn attach_user_names_falls_back_for_missing_profiles() {
    let mut runs = vec![run("r1", Some("u1")), run("r2", Some("ghost")), run("r3", None)];
    let profiles = vec![profile("u1", Some(" Ada"), Some("Lovelace "))];

    attach_user_names(&mut runs, &profiles);

    assert_eq!(runs[0].user_label(), "Ada Lovelace");
    assert_eq!(runs[1].user_label(), UNKNOWN_USER);
    assert_eq!(runs[2].user_name.as_deref(), Some(UNKNOWN_USER));
}

#[test]
fn profile_display_name_uses_placeholder_when_blank() {
    let mut blank = profile("u1", None, None);
    blank.resolve_display_name();
    assert_eq!(blank.display_name, UNKNOWN_USER);

    let mut named = profile("u2", Some("Grace"), None);
    named.resolve_display_name();
    assert_eq!(named.display_name, "Grace");
}
