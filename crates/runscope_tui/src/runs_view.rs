//! View state of the "Search Runs" tab.

use crate::{
    CardState, DetailRequest, ListRequest, LoadPhase, MonitorBackend, RequestToken, StepCards,
};
use runscope_core::{Run, RunFilter, StepLog};
use runscope_error::BackendError;
use tracing::{debug, instrument, warn};

/// Which pane of the runs tab receives cursor keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RunsFocus {
    /// Run list
    #[default]
    List,
    /// Step cards of the selected run
    Steps,
}

/// Run list, selected run and its step logs.
///
/// The list and the detail pane load independently. Errors are advisory: they
/// are recorded for display and never block further interaction.
#[derive(Debug, Clone, Default, derive_getters::Getters)]
pub struct RunsView {
    /// Loaded runs, newest first
    runs: Vec<Run>,
    /// Progress of the run list fetch
    list_phase: LoadPhase,
    #[getter(skip)]
    cursor: usize,
    /// Run whose steps are shown
    selected: Option<Run>,
    /// Steps of the selected run
    step_logs: Vec<StepLog>,
    /// Progress of the step log fetch
    detail_phase: LoadPhase,
    /// Expand/collapse state per step
    cards: StepCards,
    #[getter(skip)]
    step_cursor: usize,
    /// Pane receiving cursor keys
    focus: RunsFocus,
    /// Last error message
    error: Option<String>,
    /// Active list filter
    filter: RunFilter,
    #[getter(skip)]
    latest_list: RequestToken,
    #[getter(skip)]
    latest_detail: RequestToken,
}

impl RunsView {
    /// Empty view with the given list filter.
    pub fn new(filter: RunFilter) -> Self {
        Self {
            filter,
            ..Self::default()
        }
    }

    /// Enter list loading and return the fetch to issue.
    ///
    /// Its token supersedes every earlier list fetch.
    pub fn begin_list_load(&mut self) -> ListRequest {
        self.list_phase = LoadPhase::Loading;
        ListRequest {
            token: self.latest_list.advance(),
            filter: self.filter,
        }
    }

    /// Apply a completed run list fetch.
    ///
    /// Responses to superseded requests are discarded and `false` is returned.
    /// On failure the list is emptied and the error recorded.
    #[instrument(skip(self, result))]
    pub fn finish_list_load(
        &mut self,
        token: RequestToken,
        result: Result<Vec<Run>, BackendError>,
    ) -> bool {
        if token != self.latest_list {
            debug!(?token, latest = ?self.latest_list, "Discarding stale run list response");
            return false;
        }

        match result {
            Ok(runs) => {
                debug!(count = runs.len(), "Run list loaded");
                self.runs = runs;
            }
            Err(e) => {
                warn!(error = %e, "Run list fetch failed");
                self.runs.clear();
                self.error = Some(e.message());
            }
        }
        self.list_phase = LoadPhase::Loaded;
        self.clamp_cursor();
        true
    }

    /// Select `run` and enter detail loading.
    ///
    /// Returns the request to issue; its token supersedes every earlier one.
    #[instrument(skip_all, fields(run_id = %run.id))]
    pub fn select_run(&mut self, run: Run) -> DetailRequest {
        let token = self.latest_detail.advance();
        let request = DetailRequest {
            token,
            run_id: run.id.clone(),
        };
        self.selected = Some(run);
        self.step_logs.clear();
        self.cards = StepCards::default();
        self.step_cursor = 0;
        self.detail_phase = LoadPhase::Loading;
        request
    }

    /// Select the run under the cursor.
    pub fn select_highlighted(&mut self) -> Option<DetailRequest> {
        let run = self.runs.get(self.cursor)?.clone();
        Some(self.select_run(run))
    }

    /// Apply a completed step log fetch.
    ///
    /// Responses to superseded requests are discarded and `false` is returned.
    #[instrument(skip(self, result))]
    pub fn finish_detail_load(
        &mut self,
        token: RequestToken,
        result: Result<Vec<StepLog>, BackendError>,
    ) -> bool {
        if token != self.latest_detail {
            debug!(?token, latest = ?self.latest_detail, "Discarding stale step log response");
            return false;
        }

        match result {
            Ok(steps) => {
                debug!(count = steps.len(), "Step logs loaded");
                self.cards = StepCards::collapsed(steps.len());
                self.step_logs = steps;
            }
            Err(e) => {
                warn!(error = %e, "Step log fetch failed");
                self.step_logs.clear();
                self.cards = StepCards::default();
                self.error = Some(e.message());
            }
        }
        self.step_cursor = 0;
        self.detail_phase = LoadPhase::Loaded;
        true
    }

    /// Apply a completed delete of `run_id`.
    ///
    /// On success the run leaves the list and, if selected, the detail pane is
    /// cleared. On failure nothing changes except the error.
    #[instrument(skip(self, result))]
    pub fn finish_delete(&mut self, run_id: &str, result: Result<(), BackendError>) {
        if let Err(e) = result {
            warn!(error = %e, "Run delete failed");
            self.error = Some(e.message());
            return;
        }

        self.runs.retain(|run| run.id != run_id);
        if self.selected.as_ref().is_some_and(|run| run.id == run_id) {
            // Invalidate any step fetch still in flight for the deleted run
            self.latest_detail.advance();
            self.clear_selection();
        }
        self.clamp_cursor();
    }

    /// Deselect the current run and empty the detail pane.
    pub fn clear_selection(&mut self) {
        self.selected = None;
        self.step_logs.clear();
        self.cards = StepCards::default();
        self.step_cursor = 0;
        self.detail_phase = LoadPhase::Idle;
        self.focus = RunsFocus::List;
    }

    /// Flip the flagged-only filter; the caller reloads the list.
    pub fn toggle_flagged(&mut self) -> RunFilter {
        self.filter.flagged_only = !self.filter.flagged_only;
        self.filter
    }

    /// Highlighted row of the run list.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Highlighted step card.
    pub fn step_cursor(&self) -> usize {
        self.step_cursor
    }

    /// Run under the cursor.
    pub fn highlighted(&self) -> Option<&Run> {
        self.runs.get(self.cursor)
    }

    /// Move the cursor of the focused pane up.
    pub fn cursor_up(&mut self) {
        match self.focus {
            RunsFocus::List => self.cursor = self.cursor.saturating_sub(1),
            RunsFocus::Steps => self.step_cursor = self.step_cursor.saturating_sub(1),
        }
    }

    /// Move the cursor of the focused pane down.
    pub fn cursor_down(&mut self) {
        match self.focus {
            RunsFocus::List => {
                if self.cursor + 1 < self.runs.len() {
                    self.cursor += 1;
                }
            }
            RunsFocus::Steps => {
                if self.step_cursor + 1 < self.step_logs.len() {
                    self.step_cursor += 1;
                }
            }
        }
    }

    /// Give cursor keys to `focus`; the step pane needs loaded steps.
    pub fn focus_on(&mut self, focus: RunsFocus) {
        if focus == RunsFocus::Steps && self.step_logs.is_empty() {
            return;
        }
        self.focus = focus;
    }

    /// Expand or collapse the highlighted step card.
    pub fn toggle_step(&mut self) {
        self.cards.toggle(self.step_cursor);
    }

    /// State of card `index`.
    pub fn card_state(&self, index: usize) -> CardState {
        self.cards.state(index)
    }

    /// Forget the last error.
    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Fetch and apply the run list in one step.
    pub async fn load(&mut self, backend: &dyn MonitorBackend, limit: usize) {
        let request = self.begin_list_load();
        let result = backend.list_runs(request.filter, limit).await;
        self.finish_list_load(request.token, result);
    }

    /// Select `run`, then fetch and apply its step logs.
    pub async fn open_run(&mut self, backend: &dyn MonitorBackend, run: Run) {
        let request = self.select_run(run);
        let result = backend.list_step_logs(&request.run_id).await;
        self.finish_detail_load(request.token, result);
    }

    /// Delete `run_id` remotely and apply the outcome.
    pub async fn delete_run(&mut self, backend: &dyn MonitorBackend, run_id: &str) {
        let result = backend.delete_run(run_id).await;
        self.finish_delete(run_id, result);
    }

    fn clamp_cursor(&mut self) {
        if self.cursor >= self.runs.len() {
            self.cursor = self.runs.len().saturating_sub(1);
        }
    }
}
