//! View state of the "Chat Monitor" tab.

use crate::{LoadPhase, MessagesRequest, MonitorBackend, RequestToken};
use runscope_core::{ChatMessage, UserProfile};
use runscope_error::BackendError;
use tracing::{debug, instrument, warn};

/// User picker and the selected user's transcript.
///
/// With no user selected the transcript is empty and nothing is fetched.
/// Selecting another user replaces the transcript wholesale.
#[derive(Debug, Clone, Default, derive_getters::Getters)]
pub struct ChatView {
    /// Known users, ordered by given name
    users: Vec<UserProfile>,
    /// Progress of the user list fetch
    users_phase: LoadPhase,
    #[getter(skip)]
    user_cursor: usize,
    /// User whose transcript is shown
    selected_user_id: Option<String>,
    /// Transcript, oldest first
    messages: Vec<ChatMessage>,
    /// Progress of the transcript fetch
    messages_phase: LoadPhase,
    #[getter(skip)]
    scroll: u16,
    /// Last error message
    error: Option<String>,
    #[getter(skip)]
    latest_users: RequestToken,
    #[getter(skip)]
    latest_messages: RequestToken,
}

impl ChatView {
    /// Empty view.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter user list loading and return the token of the fetch to issue.
    pub fn begin_users_load(&mut self) -> RequestToken {
        self.users_phase = LoadPhase::Loading;
        self.latest_users.advance()
    }

    /// Apply a completed user list fetch; stale responses are discarded.
    #[instrument(skip(self, result))]
    pub fn finish_users_load(
        &mut self,
        token: RequestToken,
        result: Result<Vec<UserProfile>, BackendError>,
    ) -> bool {
        if token != self.latest_users {
            debug!(?token, "Discarding stale user list response");
            return false;
        }
        match result {
            Ok(users) => {
                debug!(count = users.len(), "Users loaded");
                self.users = users;
            }
            Err(e) => {
                warn!(error = %e, "User list fetch failed");
                self.users.clear();
                self.error = Some(e.message());
            }
        }
        if self.user_cursor >= self.users.len() {
            self.user_cursor = self.users.len().saturating_sub(1);
        }
        self.users_phase = LoadPhase::Loaded;
        true
    }

    /// Change the selected user.
    ///
    /// Returns the transcript fetch to issue, or `None` when no user is
    /// selected or the selection did not change.
    #[instrument(skip(self))]
    pub fn select_user(&mut self, user_id: Option<String>) -> Option<MessagesRequest> {
        if user_id == self.selected_user_id {
            return None;
        }
        let token = self.latest_messages.advance();
        self.selected_user_id = user_id.clone();
        self.messages.clear();
        self.scroll = 0;

        let Some(user_id) = user_id else {
            self.messages_phase = LoadPhase::Idle;
            return None;
        };

        self.error = None;
        self.messages_phase = LoadPhase::Loading;
        Some(MessagesRequest { token, user_id })
    }

    /// Select the user under the cursor.
    pub fn select_highlighted(&mut self) -> Option<MessagesRequest> {
        let user_id = self.users.get(self.user_cursor)?.user_id.clone();
        self.select_user(Some(user_id))
    }

    /// Re-fetch the selected user's transcript.
    pub fn reload_messages(&mut self) -> Option<MessagesRequest> {
        let user_id = self.selected_user_id.clone()?;
        let token = self.latest_messages.advance();
        self.error = None;
        self.messages_phase = LoadPhase::Loading;
        Some(MessagesRequest { token, user_id })
    }

    /// Apply a completed transcript fetch; stale responses are discarded.
    #[instrument(skip(self, result))]
    pub fn finish_messages_load(
        &mut self,
        token: RequestToken,
        result: Result<Vec<ChatMessage>, BackendError>,
    ) -> bool {
        if token != self.latest_messages {
            debug!(?token, "Discarding stale transcript response");
            return false;
        }
        match result {
            Ok(messages) => {
                debug!(count = messages.len(), "Transcript loaded");
                self.messages = messages;
            }
            Err(e) => {
                warn!(error = %e, "Transcript fetch failed");
                self.messages.clear();
                self.error = Some(e.message());
            }
        }
        self.scroll = 0;
        self.messages_phase = LoadPhase::Loaded;
        true
    }

    /// Profile of the selected user, once the user list is loaded.
    pub fn selected_user(&self) -> Option<&UserProfile> {
        let id = self.selected_user_id.as_deref()?;
        self.users.iter().find(|user| user.user_id == id)
    }

    /// Highlighted row of the user list.
    pub fn user_cursor(&self) -> usize {
        self.user_cursor
    }

    /// Lines scrolled off the top of the transcript.
    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    /// Move the user cursor up.
    pub fn cursor_up(&mut self) {
        self.user_cursor = self.user_cursor.saturating_sub(1);
    }

    /// Move the user cursor down.
    pub fn cursor_down(&mut self) {
        if self.user_cursor + 1 < self.users.len() {
            self.user_cursor += 1;
        }
    }

    /// Forget the last error.
    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Scroll the transcript by `delta` lines.
    pub fn scroll_by(&mut self, delta: i32) {
        self.scroll = if delta.is_negative() {
            self.scroll.saturating_sub(delta.unsigned_abs() as u16)
        } else {
            self.scroll.saturating_add(delta as u16)
        };
    }

    /// Fetch and apply the user list in one step.
    pub async fn load_users(&mut self, backend: &dyn MonitorBackend) {
        let token = self.begin_users_load();
        let result = backend.list_user_profiles().await;
        self.finish_users_load(token, result);
    }

    /// Change the selection and, if needed, fetch and apply the transcript.
    pub async fn choose_user(&mut self, backend: &dyn MonitorBackend, user_id: Option<String>) {
        if let Some(request) = self.select_user(user_id) {
            let result = backend.list_chat_messages(&request.user_id).await;
            self.finish_messages_load(request.token, result);
        }
    }
}
