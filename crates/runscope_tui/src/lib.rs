//! Terminal dashboard for monitoring search runs and chat transcripts.
//!
//! Two tabs: "Search Runs" lists recent runs and their step-by-step logs,
//! "Chat Monitor" shows one user's chat history. Data comes from any
//! [`MonitorBackend`]; fetches run as tokio tasks whose results are applied to
//! the view state by the UI loop. Built with ratatui for terminal rendering.

mod app;
mod backend;
mod chat_view;
mod events;
mod export;
mod fetch;
mod request;
#[cfg(feature = "database")]
mod rest_backend;
mod runner;
mod runs_view;
mod step_card;
mod ui;

pub use app::{App, AppMode, AppOptions, ViewKind};
pub use backend::MonitorBackend;
pub use chat_view::ChatView;
pub use events::{Event, EventHandler};
pub use export::{
    Clipboard, CopyAck, CopyPath, Osc52Clipboard, SystemClipboard, WorkflowCopier,
    COPY_ACK_DURATION,
};
pub use fetch::{Dispatcher, FetchOutcome, FetchRequest};
pub use request::{DetailRequest, ListRequest, LoadPhase, MessagesRequest, RequestToken};
#[cfg(feature = "database")]
pub use rest_backend::RestBackend;
pub use runner::run_tui;
pub use runs_view::{RunsFocus, RunsView};
pub use step_card::{card_header, card_sections, CardSection, CardState, StepCards, StepStatus};
pub use runscope_error::{TuiError, TuiErrorKind, TuiResult};
