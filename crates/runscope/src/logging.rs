//! Tracing subscriber setup.
//!
//! CLI commands log to stderr. The dashboard owns the terminal, so it logs to
//! a file instead.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Where log lines go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    /// Standard error
    Stderr,
    /// Append to a file, creating parent directories
    File(PathBuf),
}

/// Configuration for the tracing subscriber.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is unset (e.g., "info", "runscope=debug")
    pub log_level: String,
    /// Ignore `RUST_LOG` and use `log_level`
    pub force_level: bool,
    /// Emit JSON lines instead of text
    pub json_logs: bool,
    /// Output destination
    pub target: LogTarget,
}

impl LoggingConfig {
    /// Info level to stderr; `verbose` forces debug.
    pub fn new(verbose: bool) -> Self {
        Self {
            log_level: if verbose { "debug" } else { "info" }.to_string(),
            force_level: verbose,
            json_logs: false,
            target: LogTarget::Stderr,
        }
    }

    /// Set the destination.
    pub fn with_target(mut self, target: LogTarget) -> Self {
        self.target = target;
        self
    }

    /// Enable JSON-formatted logs.
    pub fn with_json_logs(mut self, enabled: bool) -> Self {
        self.json_logs = enabled;
        self
    }

    fn filter(&self) -> EnvFilter {
        if self.force_level {
            return EnvFilter::new(&self.log_level);
        }
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.log_level))
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self::new(false)
    }
}

/// `<data_local_dir>/runscope/runscope.log`, or the temp dir when there is none.
pub fn default_log_file() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("runscope")
        .join("runscope.log")
}

/// Install the global tracing subscriber.
pub fn init_logging(config: &LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(config.filter())
        .with_target(false);

    match &config.target {
        LogTarget::Stderr if config.json_logs => {
            builder.json().with_writer(std::io::stderr).try_init().map_err(|e| -> Box<dyn std::error::Error> { e })?
        }
        LogTarget::Stderr => builder.with_writer(std::io::stderr).try_init().map_err(|e| -> Box<dyn std::error::Error> { e })?,
        LogTarget::File(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            let builder = builder.with_ansi(false).with_writer(Mutex::new(file));
            if config.json_logs {
                builder.json().try_init().map_err(|e| -> Box<dyn std::error::Error> { e })?
            } else {
                builder.try_init().map_err(|e| -> Box<dyn std::error::Error> { e })?
            }
        }
    }

    Ok(())
}
