//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the runscope binary.

mod chat;
mod commands;
mod output;
mod runs;
mod tui_handler;

pub use chat::handle_chat_command;
pub use commands::{ChatCommands, Cli, Commands, OutputFormat, RunsCommands, TuiArgs};
pub use runs::handle_runs_command;
pub use tui_handler::launch_tui;

use runscope::{BackendConfig, MonitorRepository, SupabaseClient};

/// Data access layer built from `config`.
pub fn repository(config: &BackendConfig) -> MonitorRepository {
    MonitorRepository::new(SupabaseClient::new(config), config)
}
