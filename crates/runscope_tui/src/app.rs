//! Application state and key handling.

use crate::{ChatView, FetchOutcome, FetchRequest, RunsFocus, RunsView, WorkflowCopier};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use runscope_core::RunFilter;
use std::time::Instant;
use tracing::{debug, error, info};

/// Lines moved by one page scroll of the transcript.
const PAGE_SCROLL: i32 = 10;

/// Which tab is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum ViewKind {
    /// Search runs and their step logs
    #[default]
    Runs,
    /// Chat transcripts per user
    Chat,
}

impl ViewKind {
    /// Tab title.
    pub fn title(self) -> &'static str {
        match self {
            ViewKind::Runs => "Search Runs",
            ViewKind::Chat => "Chat Monitor",
        }
    }

    /// Position in the tab bar.
    pub fn index(self) -> usize {
        match self {
            ViewKind::Runs => 0,
            ViewKind::Chat => 1,
        }
    }

    /// The other tab.
    pub fn next(self) -> Self {
        match self {
            ViewKind::Runs => ViewKind::Chat,
            ViewKind::Chat => ViewKind::Runs,
        }
    }
}

/// Input mode.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum AppMode {
    /// Normal navigation
    #[default]
    Browse,
    /// Waiting for `y` to delete the contained run id
    ConfirmDelete(String),
}

/// Startup options for the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppOptions {
    /// Maximum runs listed
    pub run_limit: usize,
    /// Initial run filter
    pub filter: RunFilter,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            run_limit: 50,
            filter: RunFilter::default(),
        }
    }
}

/// Main application state.
///
/// Key handling returns the fetches to issue; completed fetches come back
/// through [`App::apply`]. The state itself never awaits anything.
pub struct App {
    /// Displayed tab
    pub view: ViewKind,
    /// Input mode
    pub mode: AppMode,
    /// Runs tab state
    pub runs: RunsView,
    /// Chat tab state
    pub chat: ChatView,
    /// Informational message for the status bar
    pub status_message: Option<String>,
    /// Whether to quit the application
    pub should_quit: bool,
    run_limit: usize,
    copier: WorkflowCopier,
}

impl App {
    /// Create the app with the given clipboard strategy.
    pub fn new(options: AppOptions, copier: WorkflowCopier) -> Self {
        Self {
            view: ViewKind::Runs,
            mode: AppMode::Browse,
            runs: RunsView::new(options.filter),
            chat: ChatView::new(),
            status_message: None,
            should_quit: false,
            run_limit: options.run_limit,
            copier,
        }
    }

    /// Fetches to issue when the dashboard opens.
    pub fn start(&mut self) -> Vec<FetchRequest> {
        vec![self.reload_runs()]
    }

    /// Whether the "copied" acknowledgement is showing.
    pub fn is_copied(&self) -> bool {
        self.copier.ack().is_copied()
    }

    /// Error of the displayed tab.
    pub fn current_error(&self) -> Option<&str> {
        match self.view {
            ViewKind::Runs => self.runs.error().as_deref(),
            ViewKind::Chat => self.chat.error().as_deref(),
        }
    }

    /// Advance timers.
    pub fn tick(&mut self, now: Instant) {
        self.copier.tick(now);
    }

    /// Handle one key press and return the fetches it triggers.
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> Vec<FetchRequest> {
        if let AppMode::ConfirmDelete(run_id) = std::mem::take(&mut self.mode) {
            return self.confirm_delete(run_id, key);
        }

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return Vec::new();
        }

        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                Vec::new()
            }
            KeyCode::Tab => self.switch_to(self.view.next()),
            KeyCode::Char('1') => self.switch_to(ViewKind::Runs),
            KeyCode::Char('2') => self.switch_to(ViewKind::Chat),
            KeyCode::Esc => {
                self.status_message = None;
                self.runs.clear_error();
                self.chat.clear_error();
                Vec::new()
            }
            _ => match self.view {
                ViewKind::Runs => self.handle_runs_key(key, now),
                ViewKind::Chat => self.handle_chat_key(key),
            },
        }
    }

    /// Apply a completed fetch to the owning view.
    pub fn apply(&mut self, outcome: FetchOutcome) {
        match outcome {
            FetchOutcome::Runs { token, result } => {
                self.runs.finish_list_load(token, result);
            }
            FetchOutcome::StepLogs { token, result } => {
                self.runs.finish_detail_load(token, result);
            }
            FetchOutcome::RunDeleted { run_id, result } => {
                if result.is_ok() {
                    info!(%run_id, "Run deleted");
                    self.status_message = Some(format!("Deleted run {}", run_id));
                } else {
                    self.status_message = None;
                }
                self.runs.finish_delete(&run_id, result);
            }
            FetchOutcome::Users { token, result } => {
                self.chat.finish_users_load(token, result);
            }
            FetchOutcome::Messages { token, result } => {
                self.chat.finish_messages_load(token, result);
            }
        }
    }

    /// Copy the selected run's workflow export to the clipboard.
    pub fn copy_workflow(&mut self, now: Instant) {
        let Some(run) = self.runs.selected() else {
            self.status_message = Some("Select a run to export its workflow".to_string());
            return;
        };
        if self.runs.detail_phase().is_loading() {
            self.status_message = Some("Step logs are still loading".to_string());
            return;
        }

        let run_id = run.id.clone();
        match self.copier.copy_workflow(&run_id, self.runs.step_logs(), now) {
            Ok((path, _)) => {
                debug!(?path, %run_id, "Workflow exported");
                self.status_message = Some(format!(
                    "Copied workflow of run {} ({} steps)",
                    run.short_id(),
                    self.runs.step_logs().len()
                ));
            }
            Err(e) => {
                error!(error = %e, "Workflow export failed");
                self.status_message = Some(format!("Copy failed: {}", e));
            }
        }
    }

    fn switch_to(&mut self, view: ViewKind) -> Vec<FetchRequest> {
        self.view = view;
        if view == ViewKind::Chat && *self.chat.users_phase() == crate::LoadPhase::Idle {
            let token = self.chat.begin_users_load();
            return vec![FetchRequest::LoadUsers(token)];
        }
        Vec::new()
    }

    fn reload_runs(&mut self) -> FetchRequest {
        let request = self.runs.begin_list_load();
        FetchRequest::LoadRuns {
            token: request.token,
            filter: request.filter,
            limit: self.run_limit,
        }
    }

    fn confirm_delete(&mut self, run_id: String, key: KeyEvent) -> Vec<FetchRequest> {
        if matches!(key.code, KeyCode::Char('y') | KeyCode::Char('Y')) {
            self.status_message = Some(format!("Deleting run {}...", run_id));
            vec![FetchRequest::DeleteRun(run_id)]
        } else {
            self.status_message = Some("Delete cancelled".to_string());
            Vec::new()
        }
    }

    fn handle_runs_key(&mut self, key: KeyEvent, now: Instant) -> Vec<FetchRequest> {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.runs.cursor_up(),
            KeyCode::Down | KeyCode::Char('j') => self.runs.cursor_down(),
            KeyCode::Left | KeyCode::Char('h') => self.runs.focus_on(RunsFocus::List),
            KeyCode::Right | KeyCode::Char('l') => self.runs.focus_on(RunsFocus::Steps),
            KeyCode::Enter => match *self.runs.focus() {
                RunsFocus::List => {
                    return self
                        .runs
                        .select_highlighted()
                        .map(FetchRequest::LoadStepLogs)
                        .into_iter()
                        .collect();
                }
                RunsFocus::Steps => self.runs.toggle_step(),
            },
            KeyCode::Char(' ') if *self.runs.focus() == RunsFocus::Steps => {
                self.runs.toggle_step()
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                if let Some(run) = self.runs.highlighted() {
                    self.mode = AppMode::ConfirmDelete(run.id.clone());
                }
            }
            KeyCode::Char('y') | KeyCode::Char('c') => self.copy_workflow(now),
            KeyCode::Char('f') => {
                let filter = self.runs.toggle_flagged();
                self.status_message = Some(if filter.flagged_only {
                    "Showing flagged runs".to_string()
                } else {
                    "Showing all runs".to_string()
                });
                return vec![self.reload_runs()];
            }
            KeyCode::Char('r') => {
                self.runs.clear_error();
                return vec![self.reload_runs()];
            }
            _ => {}
        }
        Vec::new()
    }

    fn handle_chat_key(&mut self, key: KeyEvent) -> Vec<FetchRequest> {
        let request = match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.chat.cursor_up();
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.chat.cursor_down();
                None
            }
            KeyCode::Enter => self.chat.select_highlighted().map(FetchRequest::LoadMessages),
            KeyCode::Char('x') | KeyCode::Backspace => {
                self.chat.select_user(None).map(FetchRequest::LoadMessages)
            }
            KeyCode::PageUp => {
                self.chat.scroll_by(-PAGE_SCROLL);
                None
            }
            KeyCode::PageDown => {
                self.chat.scroll_by(PAGE_SCROLL);
                None
            }
            KeyCode::Char('r') => {
                self.chat.clear_error();
                match self.chat.reload_messages() {
                    Some(request) => Some(FetchRequest::LoadMessages(request)),
                    None => {
                        let token = self.chat.begin_users_load();
                        Some(FetchRequest::LoadUsers(token))
                    }
                }
            }
            _ => None,
        };
        request.into_iter().collect()
    }
}
