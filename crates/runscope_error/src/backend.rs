//! Errors raised while talking to the hosted data backend.

/// Failure conditions of a backend round trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum BackendErrorKind {
    /// The request never produced a response (DNS, TLS, connection reset, ...)
    #[display("{}", _0)]
    Request(String),
    /// The backend answered with a non-success status
    #[display("{} (HTTP {})", message, status)]
    Api {
        /// HTTP status code returned by the backend
        status: u16,
        /// Message reported by the backend, or the status reason
        message: String,
    },
    /// The response body could not be decoded into the expected rows
    #[display("Failed to decode response: {}", _0)]
    Decode(String),
    /// Endpoint URL or service key was not supplied at startup
    #[display("Backend is not configured: {}", _0)]
    NotConfigured(String),
}

/// Backend error with source location tracking.
///
/// The [`message`](BackendError::message) accessor yields the text shown to the
/// operator; the `Display` implementation adds the source location for logs.
///
/// # Examples
///
/// ```
/// use runscope_error::{BackendError, BackendErrorKind};
///
/// let err = BackendError::new(BackendErrorKind::Api {
///     status: 401,
///     message: "Invalid API key".to_string(),
/// });
/// assert_eq!(err.message(), "Invalid API key (HTTP 401)");
/// assert!(format!("{}", err).contains("Backend Error"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("Backend Error: {} at line {} in {}", kind, line, file)]
pub struct BackendError {
    /// The kind of failure
    pub kind: BackendErrorKind,
    /// Line number where the error was created
    pub line: u32,
    /// File where the error was created
    pub file: &'static str,
}

impl BackendError {
    /// Create a new BackendError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: BackendErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Human-readable message without source location.
    pub fn message(&self) -> String {
        self.kind.to_string()
    }
}
