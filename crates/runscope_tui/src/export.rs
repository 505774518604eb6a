//! Copying a run's workflow export to the clipboard.

use base64::Engine;
use runscope_core::{StepLog, WorkflowExport};
use runscope_error::{ClipboardError, RunscopeResult};
use std::io::Write;
use std::time::{Duration, Instant};
use tracing::{debug, instrument, warn};

/// How long the "copied" acknowledgement stays visible.
pub const COPY_ACK_DURATION: Duration = Duration::from_secs(2);

/// Somewhere text can be copied to.
pub trait Clipboard: Send {
    /// Replace the clipboard contents with `text`.
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError>;

    /// Short name used in logs and status messages.
    fn name(&self) -> &'static str;
}

/// System clipboard using arboard, opened on first use.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    /// Clipboard that connects lazily.
    pub fn new() -> Self {
        Self { inner: None }
    }
}

impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let clipboard = match &mut self.inner {
            Some(clipboard) => clipboard,
            slot => slot.insert(
                arboard::Clipboard::new()
                    .map_err(|e| ClipboardError::new(format!("System clipboard unavailable: {}", e)))?,
            ),
        };
        clipboard
            .set_text(text.to_string())
            .map_err(|e| ClipboardError::new(format!("System clipboard rejected text: {}", e)))
    }

    fn name(&self) -> &'static str {
        "system"
    }
}

/// Terminal clipboard via the OSC 52 escape sequence.
///
/// Works over SSH and without a display server, as long as the terminal
/// emulator honours OSC 52.
pub struct Osc52Clipboard<W: Write + Send> {
    out: W,
}

impl Osc52Clipboard<std::io::Stdout> {
    /// Write the sequence to stdout.
    pub fn stdout() -> Self {
        Self {
            out: std::io::stdout(),
        }
    }
}

impl<W: Write + Send> Osc52Clipboard<W> {
    /// Write the sequence to `out`.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Recover the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> Clipboard for Osc52Clipboard<W> {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let encoded = base64::engine::general_purpose::STANDARD.encode(text);
        write!(self.out, "\x1b]52;c;{}\x07", encoded)
            .and_then(|_| self.out.flush())
            .map_err(|e| ClipboardError::new(format!("Terminal clipboard write failed: {}", e)))
    }

    fn name(&self) -> &'static str {
        "terminal"
    }
}

/// Which clipboard accepted the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CopyPath {
    /// The primary clipboard
    Primary,
    /// The fallback clipboard
    Fallback,
}

/// Transient "copied" acknowledgement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CopyAck {
    copied_at: Option<Instant>,
}

impl CopyAck {
    /// Start showing the acknowledgement.
    pub fn mark(&mut self, now: Instant) {
        self.copied_at = Some(now);
    }

    /// Hide the acknowledgement once [`COPY_ACK_DURATION`] has passed.
    pub fn tick(&mut self, now: Instant) {
        if self
            .copied_at
            .is_some_and(|at| now.saturating_duration_since(at) >= COPY_ACK_DURATION)
        {
            self.copied_at = None;
        }
    }

    /// Whether the acknowledgement is showing.
    pub fn is_copied(&self) -> bool {
        self.copied_at.is_some()
    }
}

/// Serializes workflow exports and copies them with a fallback path.
pub struct WorkflowCopier {
    primary: Box<dyn Clipboard>,
    fallback: Box<dyn Clipboard>,
    ack: CopyAck,
}

impl WorkflowCopier {
    /// Copier with explicit clipboards.
    pub fn new(primary: Box<dyn Clipboard>, fallback: Box<dyn Clipboard>) -> Self {
        Self {
            primary,
            fallback,
            ack: CopyAck::default(),
        }
    }

    /// System clipboard first, terminal OSC 52 second.
    pub fn system() -> Self {
        Self::new(
            Box::new(SystemClipboard::new()),
            Box::new(Osc52Clipboard::stdout()),
        )
    }

    /// Copy `text`, falling back when the primary clipboard fails.
    ///
    /// Either success starts the acknowledgement.
    #[instrument(skip(self, text), fields(bytes = text.len()))]
    pub fn copy_text(&mut self, text: &str, now: Instant) -> Result<CopyPath, ClipboardError> {
        let path = match self.primary.set_text(text) {
            Ok(()) => CopyPath::Primary,
            Err(primary_err) => {
                warn!(clipboard = self.primary.name(), error = %primary_err, "Primary clipboard failed, using fallback");
                self.fallback.set_text(text).map_err(|fallback_err| {
                    ClipboardError::new(format!(
                        "{} clipboard: {}; {} clipboard: {}",
                        self.primary.name(),
                        primary_err.message,
                        self.fallback.name(),
                        fallback_err.message
                    ))
                })?;
                CopyPath::Fallback
            }
        };
        debug!(?path, "Copied to clipboard");
        self.ack.mark(now);
        Ok(path)
    }

    /// Build the export document for `run_id`, copy it and return the text.
    pub fn copy_workflow(
        &mut self,
        run_id: &str,
        steps: &[StepLog],
        now: Instant,
    ) -> RunscopeResult<(CopyPath, String)> {
        let text = WorkflowExport::new(run_id, steps).to_pretty_json()?;
        let path = self.copy_text(&text, now)?;
        Ok((path, text))
    }

    /// Advance the acknowledgement timer.
    pub fn tick(&mut self, now: Instant) {
        self.ack.tick(now);
    }

    /// Current acknowledgement.
    pub fn ack(&self) -> &CopyAck {
        &self.ack
    }
}
