mod common;

use common::{run, step};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use runscope_core::{RunFilter, WorkflowExport};
use runscope_error::ClipboardError;
use runscope_tui::{
    App, AppMode, AppOptions, Clipboard, CopyPath, FetchOutcome, FetchRequest, Osc52Clipboard,
    RequestToken, ViewKind, WorkflowCopier, COPY_ACK_DURATION,
};
use serde_json::json;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

#[derive(Clone, Default)]
struct RecordingClipboard {
    copied: Arc<Mutex<Vec<String>>>,
    fail: bool,
}

impl RecordingClipboard {
    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    fn copied(&self) -> Vec<String> {
        self.copied.lock().unwrap().clone()
    }
}

impl Clipboard for RecordingClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if self.fail {
            return Err(ClipboardError::new("unavailable"));
        }
        self.copied.lock().unwrap().push(text.to_string());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}

fn copier(primary: &RecordingClipboard, fallback: &RecordingClipboard) -> WorkflowCopier {
    WorkflowCopier::new(Box::new(primary.clone()), Box::new(fallback.clone()))
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn app_with(primary: &RecordingClipboard) -> App {
    App::new(
        AppOptions::default(),
        copier(primary, &RecordingClipboard::failing()),
    )
}

fn loaded_app(primary: &RecordingClipboard) -> App {
    let mut app = app_with(primary);
    let token = list_token(&app.start());
    app.apply(FetchOutcome::Runs {
        token,
        result: Ok(vec![
            run("r2", "2024-05-02T09:00:00+00:00", false),
            run("r1", "2024-05-01T09:00:00+00:00", false),
        ]),
    });
    app
}

fn list_token(requests: &[FetchRequest]) -> RequestToken {
    match requests {
        [FetchRequest::LoadRuns { token, .. }] => *token,
        other => panic!("expected a run list request, got {:?}", other),
    }
}

#[test]
fn copy_prefers_primary_clipboard() {
    let primary = RecordingClipboard::default();
    let fallback = RecordingClipboard::default();
    let mut copier = copier(&primary, &fallback);

    let path = copier.copy_text("payload", Instant::now()).unwrap();

    assert_eq!(path, CopyPath::Primary);
    assert_eq!(primary.copied(), vec!["payload".to_string()]);
    assert!(fallback.copied().is_empty());
    assert!(copier.ack().is_copied());
}

#[test]
fn copy_falls_back_when_primary_unavailable() {
    let primary = RecordingClipboard::failing();
    let fallback = RecordingClipboard::default();
    let mut copier = copier(&primary, &fallback);

    let path = copier.copy_text("payload", Instant::now()).unwrap();

    assert_eq!(path, CopyPath::Fallback);
    assert_eq!(fallback.copied(), vec!["payload".to_string()]);
    assert!(copier.ack().is_copied());
}

#[test]
fn copy_failure_on_both_paths_sets_no_ack() {
    let mut copier = copier(&RecordingClipboard::failing(), &RecordingClipboard::failing());

    let err = copier.copy_text("payload", Instant::now()).unwrap_err();

    assert!(err.message.contains("unavailable"));
    assert!(!copier.ack().is_copied());
}

#[test]
fn ack_resets_after_two_seconds() {
    let primary = RecordingClipboard::default();
    let mut copier = copier(&primary, &RecordingClipboard::failing());
    let start = Instant::now();
    copier.copy_text("payload", start).unwrap();

    copier.tick(start + Duration::from_millis(1_500));
    assert!(copier.ack().is_copied());

    copier.tick(start + COPY_ACK_DURATION);
    assert!(!copier.ack().is_copied());
}

#[test]
fn osc52_writes_base64_escape_sequence() {
    let mut clipboard = Osc52Clipboard::new(Vec::new());
    clipboard.set_text("hi").unwrap();
    let written = String::from_utf8(clipboard.into_inner()).unwrap();
    assert_eq!(written, "\x1b]52;c;aGk=\x07");
}

#[test]
fn exported_workflow_matches_displayed_steps() {
    let primary = RecordingClipboard::default();
    let mut copier = copier(&primary, &RecordingClipboard::failing());
    let steps = vec![
        step("r1", 1, json!({"triggerMessage": "hi"}), None),
        step("r1", 2, json!({}), Some("timeout")),
    ];

    let (_, text) = copier.copy_workflow("r1", &steps, Instant::now()).unwrap();

    assert_eq!(primary.copied(), vec![text.clone()]);
    assert!(text.contains("\n  \"runId\": \"r1\""));
    let parsed = WorkflowExport::parse(&text).unwrap();
    assert_eq!(parsed.run_id, "r1");
    assert_eq!(parsed.step_logs.len(), 2);
    assert_eq!(parsed.step_logs[1].error_message.as_deref(), Some("timeout"));
}

#[test]
fn start_requests_run_list() {
    let mut app = App::new(
        AppOptions {
            run_limit: 25,
            filter: RunFilter::flagged(),
        },
        copier(&RecordingClipboard::default(), &RecordingClipboard::default()),
    );

    let requests = app.start();

    match requests.as_slice() {
        [FetchRequest::LoadRuns { filter, limit, .. }] => {
            assert_eq!(*filter, RunFilter::flagged());
            assert_eq!(*limit, 25);
        }
        other => panic!("unexpected requests: {:?}", other),
    }
    assert!(app.runs.list_phase().is_loading());
}

#[test]
fn toggling_filter_twice_keeps_latest_list() {
    let mut app = app_with(&RecordingClipboard::default());
    app.start();

    let flagged = list_token(&app.handle_key(key(KeyCode::Char('f')), Instant::now()));
    let all = list_token(&app.handle_key(key(KeyCode::Char('f')), Instant::now()));

    app.apply(FetchOutcome::Runs {
        token: all,
        result: Ok(vec![
            run("r2", "2024-05-02T09:00:00+00:00", false),
            run("r1", "2024-05-01T09:00:00+00:00", true),
        ]),
    });
    app.apply(FetchOutcome::Runs {
        token: flagged,
        result: Ok(vec![run("r1", "2024-05-01T09:00:00+00:00", true)]),
    });

    assert_eq!(app.runs.runs().len(), 2);
    assert!(!app.runs.filter().flagged_only);
}

#[test]
fn enter_on_run_requests_step_logs() {
    let mut app = loaded_app(&RecordingClipboard::default());

    app.handle_key(key(KeyCode::Down), Instant::now());
    let requests = app.handle_key(key(KeyCode::Enter), Instant::now());

    match requests.as_slice() {
        [FetchRequest::LoadStepLogs(request)] => assert_eq!(request.run_id, "r1"),
        other => panic!("unexpected requests: {:?}", other),
    }
    assert!(app.runs.detail_phase().is_loading());
}

#[test]
fn delete_requires_confirmation() {
    let mut app = loaded_app(&RecordingClipboard::default());

    app.handle_key(key(KeyCode::Char('d')), Instant::now());
    assert_eq!(app.mode, AppMode::ConfirmDelete("r2".to_string()));
    let requests = app.handle_key(key(KeyCode::Char('n')), Instant::now());
    assert!(requests.is_empty());
    assert_eq!(app.mode, AppMode::Browse);

    app.handle_key(key(KeyCode::Char('d')), Instant::now());
    let requests = app.handle_key(key(KeyCode::Char('y')), Instant::now());
    assert_eq!(requests, vec![FetchRequest::DeleteRun("r2".to_string())]);

    app.apply(FetchOutcome::RunDeleted {
        run_id: "r2".to_string(),
        result: Ok(()),
    });
    let ids: Vec<&str> = app.runs.runs().iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["r1"]);
}

#[test]
fn chat_users_load_on_first_visit_only() {
    let mut app = app_with(&RecordingClipboard::default());

    let requests = app.handle_key(key(KeyCode::Tab), Instant::now());
    assert_eq!(app.view, ViewKind::Chat);
    let token = match requests.as_slice() {
        [FetchRequest::LoadUsers(token)] => *token,
        other => panic!("unexpected requests: {:?}", other),
    };

    app.apply(FetchOutcome::Users {
        token,
        result: Ok(Vec::new()),
    });
    app.handle_key(key(KeyCode::Char('1')), Instant::now());
    let requests = app.handle_key(key(KeyCode::Char('2')), Instant::now());
    assert!(requests.is_empty());
}

#[test]
fn copy_key_exports_selected_run() {
    let primary = RecordingClipboard::default();
    let mut app = loaded_app(&primary);

    app.handle_key(key(KeyCode::Char('c')), Instant::now());
    assert!(!app.is_copied());
    assert!(primary.copied().is_empty());

    let request = app.runs.select_highlighted().unwrap();
    app.apply(FetchOutcome::StepLogs {
        token: request.token,
        result: Ok(vec![step("r2", 1, json!({}), None)]),
    });
    let now = Instant::now();
    app.handle_key(key(KeyCode::Char('c')), now);

    assert!(app.is_copied());
    let parsed = WorkflowExport::parse(&primary.copied()[0]).unwrap();
    assert_eq!(parsed.run_id, "r2");
    assert_eq!(parsed.step_logs.len(), 1);

    app.tick(now + COPY_ACK_DURATION);
    assert!(!app.is_copied());
}

#[test]
fn quit_keys_stop_the_loop() {
    let mut app = app_with(&RecordingClipboard::default());
    app.handle_key(
        KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        Instant::now(),
    );
    assert!(app.should_quit);

    let mut app = app_with(&RecordingClipboard::default());
    app.handle_key(key(KeyCode::Char('q')), Instant::now());
    assert!(app.should_quit);
}
