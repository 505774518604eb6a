//! Top-level error wrapper types.

use crate::{BackendError, ClipboardError, ConfigError, JsonError};
#[cfg(feature = "tui")]
use crate::TuiError;

/// Every error condition a runscope operation can end in.
///
/// # Examples
///
/// ```
/// use runscope_error::{BackendError, BackendErrorKind, RunscopeError};
///
/// let backend = BackendError::new(BackendErrorKind::Request("connection refused".into()));
/// let err: RunscopeError = backend.into();
/// assert!(format!("{}", err).contains("Backend Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum RunscopeErrorKind {
    /// Hosted backend failure
    #[from(BackendError)]
    Backend(BackendError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Clipboard error
    #[from(ClipboardError)]
    Clipboard(ClipboardError),
    /// Terminal UI error
    #[cfg(feature = "tui")]
    #[from(TuiError)]
    Tui(TuiError),
}

/// Runscope error with kind discrimination.
///
/// # Examples
///
/// ```
/// use runscope_error::{ConfigError, RunscopeResult};
///
/// fn load() -> RunscopeResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// assert!(load().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Runscope Error: {}", _0)]
pub struct RunscopeError(Box<RunscopeErrorKind>);

impl RunscopeError {
    /// Create a new error from a kind.
    pub fn new(kind: RunscopeErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &RunscopeErrorKind {
        &self.0
    }
}

impl<T> From<T> for RunscopeError
where
    T: Into<RunscopeErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for runscope operations.
pub type RunscopeResult<T> = std::result::Result<T, RunscopeError>;
