//! Clipboard error types.

/// Raised when text could not be placed on any clipboard.
///
/// # Examples
///
/// ```
/// use runscope_error::ClipboardError;
///
/// let err = ClipboardError::new("no display server");
/// assert!(format!("{}", err).contains("no display server"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Clipboard Error: {} at line {} in {}", message, line, file)]
pub struct ClipboardError {
    /// What went wrong
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ClipboardError {
    /// Create a new ClipboardError at the current location.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
