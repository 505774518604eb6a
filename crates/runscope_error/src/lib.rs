//! Error types for runscope.
//!
//! This crate provides the foundation error types used throughout the runscope workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use runscope_error::{BackendError, BackendErrorKind, RunscopeResult};
//!
//! fn fetch_runs() -> RunscopeResult<Vec<String>> {
//!     Err(BackendError::new(BackendErrorKind::Request("Connection refused".into())))?
//! }
//!
//! match fetch_runs() {
//!     Ok(runs) => println!("Got {} runs", runs.len()),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod backend;
mod clipboard;
mod config;
mod error;
mod json;
#[cfg(feature = "tui")]
mod tui;

pub use backend::{BackendError, BackendErrorKind};
pub use clipboard::ClipboardError;
pub use config::ConfigError;
pub use error::{RunscopeError, RunscopeErrorKind, RunscopeResult};
pub use json::JsonError;
#[cfg(feature = "tui")]
pub use tui::{TuiError, TuiErrorKind, TuiResult};
