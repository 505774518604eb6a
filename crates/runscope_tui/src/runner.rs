//! TUI runner - main loop and backend integration.
//!
//! The loop draws a frame, applies every fetch that completed since the last
//! frame, then waits up to one tick for input. Fetches run on the tokio
//! runtime, so the loop needs a multi-threaded runtime to keep them moving
//! while it waits for input.

use crate::{
    App, AppOptions, Dispatcher, Event, EventHandler, FetchOutcome, MonitorBackend, TuiError,
    TuiErrorKind, TuiResult, WorkflowCopier,
};
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc::{UnboundedReceiver, error::TryRecvError};
use tracing::{info, instrument};

/// Input poll interval in milliseconds.
const TICK_RATE_MS: u64 = 100;

type DashboardTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Run the dashboard against `backend` until the user quits.
///
/// The terminal is restored even when the loop fails.
#[instrument(skip(backend))]
pub async fn run_tui(backend: Arc<dyn MonitorBackend>, options: AppOptions) -> TuiResult<()> {
    let mut terminal = setup_terminal()?;
    let result = run_loop(&mut terminal, backend, options);
    let restored = restore_terminal(&mut terminal);
    result.and(restored)
}

fn setup_terminal() -> TuiResult<DashboardTerminal> {
    enable_raw_mode().map_err(|e| {
        TuiError::new(TuiErrorKind::TerminalSetup(format!(
            "Failed to enable raw mode: {}",
            e
        )))
    })?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).map_err(|e| {
        TuiError::new(TuiErrorKind::TerminalSetup(format!(
            "Failed to enter alternate screen: {}",
            e
        )))
    })?;
    Terminal::new(CrosstermBackend::new(stdout)).map_err(|e| {
        TuiError::new(TuiErrorKind::TerminalSetup(format!(
            "Failed to create terminal: {}",
            e
        )))
    })
}

fn restore_terminal(terminal: &mut DashboardTerminal) -> TuiResult<()> {
    disable_raw_mode().map_err(|e| {
        TuiError::new(TuiErrorKind::TerminalRestore(format!(
            "Failed to disable raw mode: {}",
            e
        )))
    })?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen).map_err(|e| {
        TuiError::new(TuiErrorKind::TerminalRestore(format!(
            "Failed to leave alternate screen: {}",
            e
        )))
    })?;
    terminal.show_cursor().map_err(|e| {
        TuiError::new(TuiErrorKind::TerminalRestore(format!(
            "Failed to show cursor: {}",
            e
        )))
    })
}

fn run_loop(
    terminal: &mut DashboardTerminal,
    backend: Arc<dyn MonitorBackend>,
    options: AppOptions,
) -> TuiResult<()> {
    let (dispatcher, mut outcomes) = Dispatcher::new(backend);
    let mut app = App::new(options, WorkflowCopier::system());
    let events = EventHandler::new(TICK_RATE_MS);

    dispatcher.dispatch_all(app.start());
    info!("Dashboard started");

    while !app.should_quit {
        terminal
            .draw(|f| crate::ui::draw(f, &app))
            .map_err(|e| TuiError::new(TuiErrorKind::Rendering(format!("Failed to draw: {}", e))))?;

        drain_outcomes(&mut app, &mut outcomes)?;

        match events.next()? {
            Some(Event::Key(key)) => dispatcher.dispatch_all(app.handle_key(key, Instant::now())),
            Some(Event::Tick) | Some(Event::Resize) | None => {}
        }
        app.tick(Instant::now());
    }

    info!("Dashboard closed");
    Ok(())
}

fn drain_outcomes(app: &mut App, outcomes: &mut UnboundedReceiver<FetchOutcome>) -> TuiResult<()> {
    loop {
        match outcomes.try_recv() {
            Ok(outcome) => app.apply(outcome),
            Err(TryRecvError::Empty) => return Ok(()),
            Err(TryRecvError::Disconnected) => {
                return Err(TuiError::new(TuiErrorKind::ChannelClosed(
                    "all fetch senders dropped".to_string(),
                )));
            }
        }
    }
}
