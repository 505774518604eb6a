//! Request bookkeeping shared by the view controllers.

use runscope_core::RunFilter;

/// Progress of one collection fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LoadPhase {
    /// Nothing requested yet
    #[default]
    Idle,
    /// Request in flight
    Loading,
    /// Last request completed, successfully or not
    Loaded,
}

impl LoadPhase {
    /// Whether a request is in flight.
    pub fn is_loading(self) -> bool {
        self == LoadPhase::Loading
    }
}

/// Monotonically increasing ID of a detail fetch.
///
/// Only the response carrying the most recently issued token is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct RequestToken(u64);

impl RequestToken {
    /// Advance to and return the next token.
    pub fn advance(&mut self) -> RequestToken {
        self.0 += 1;
        *self
    }
}

/// Run list fetch under the filter active when it was issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListRequest {
    /// Token identifying this fetch
    pub token: RequestToken,
    /// Filter the list is fetched with
    pub filter: RunFilter,
}

/// Step-log fetch for a selected run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailRequest {
    /// Token identifying this fetch
    pub token: RequestToken,
    /// Run whose steps are requested
    pub run_id: String,
}

/// Chat-history fetch for a selected user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessagesRequest {
    /// Token identifying this fetch
    pub token: RequestToken,
    /// User whose messages are requested
    pub user_id: String,
}
