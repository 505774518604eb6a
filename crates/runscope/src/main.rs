//! Runscope CLI binary.
//!
//! This binary provides command-line access to Runscope's functionality:
//! - Launch the monitoring dashboard (default)
//! - List, inspect, export and delete search runs
//! - Read users' chat histories

use clap::Parser;
use runscope::{BackendConfig, LogTarget, LoggingConfig, default_log_file, init_logging};

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands, handle_chat_command, handle_runs_command, launch_tui};

    // Credentials may live in a .env file in the working directory
    let _ = dotenvy::dotenv();

    // Parse command-line arguments
    let cli = Cli::parse();
    let command = cli.command.unwrap_or_else(|| Commands::Tui(Default::default()));

    // The dashboard owns the terminal, so it logs to a file
    let target = match command {
        Commands::Tui(_) => LogTarget::File(default_log_file()),
        _ => LogTarget::Stderr,
    };
    init_logging(
        &LoggingConfig::new(cli.verbose)
            .with_target(target)
            .with_json_logs(cli.log_json),
    )?;

    let config = BackendConfig::load(cli.config.as_deref())?;

    // Execute the requested command
    match command {
        Commands::Tui(args) => launch_tui(args, &config).await?,
        Commands::Runs(runs_cmd) => handle_runs_command(runs_cmd, &config).await?,
        Commands::Chat(chat_cmd) => handle_chat_command(chat_cmd, &config).await?,
    }

    Ok(())
}
