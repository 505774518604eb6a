//! CLI command definitions.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Runscope - monitoring dashboard for search runs and chat transcripts
#[derive(Parser, Debug)]
#[command(name = "runscope")]
#[command(about = "Monitoring dashboard for search runs and chat transcripts", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute (defaults to the dashboard)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Configuration file layered over the defaults
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Launch the terminal dashboard
    Tui(TuiArgs),

    /// Search run commands
    #[command(subcommand)]
    Runs(RunsCommands),

    /// Chat transcript commands
    #[command(subcommand)]
    Chat(ChatCommands),
}

/// Dashboard options
#[derive(Args, Debug, Default)]
pub struct TuiArgs {
    /// Only list flagged runs
    #[arg(long)]
    pub flagged: bool,

    /// Maximum number of runs to list
    #[arg(long)]
    pub limit: Option<usize>,
}

/// Search run subcommands
#[derive(Subcommand, Debug)]
pub enum RunsCommands {
    /// List recent runs, newest first
    List {
        /// Only list flagged runs
        #[arg(long)]
        flagged: bool,

        /// Maximum number of runs to list
        #[arg(long)]
        limit: Option<usize>,

        /// Output format
        #[arg(long, default_value = "human")]
        format: OutputFormat,
    },

    /// Show the step logs of a run
    Steps {
        /// Run ID
        run_id: String,

        /// Output format
        #[arg(long, default_value = "human")]
        format: OutputFormat,
    },

    /// Print a run's workflow export
    Export {
        /// Run ID
        run_id: String,

        /// Also copy the export to the clipboard
        #[arg(long)]
        copy: bool,
    },

    /// Delete a run
    Delete {
        /// Run ID
        run_id: String,

        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

/// Chat transcript subcommands
#[derive(Subcommand, Debug)]
pub enum ChatCommands {
    /// List users with profiles
    Users {
        /// Output format
        #[arg(long, default_value = "human")]
        format: OutputFormat,
    },

    /// Show one user's chat history, oldest first
    Messages {
        /// User ID
        user_id: String,

        /// Output format
        #[arg(long, default_value = "human")]
        format: OutputFormat,
    },
}

/// Output format options
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable format
    Human,
    /// JSON format
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_means_dashboard() {
        let cli = Cli::try_parse_from(["runscope"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn global_flags_follow_subcommands() {
        let cli = Cli::try_parse_from([
            "runscope",
            "runs",
            "list",
            "--flagged",
            "--limit",
            "10",
            "--format",
            "json",
            "-v",
            "--config",
            "local.toml",
        ])
        .unwrap();

        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("local.toml")));
        match cli.command {
            Some(Commands::Runs(RunsCommands::List {
                flagged,
                limit,
                format,
            })) => {
                assert!(flagged);
                assert_eq!(limit, Some(10));
                assert_eq!(format, OutputFormat::Json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn delete_requires_run_id() {
        assert!(Cli::try_parse_from(["runscope", "runs", "delete"]).is_err());
        let cli = Cli::try_parse_from(["runscope", "runs", "delete", "r1", "--yes"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Runs(RunsCommands::Delete { ref run_id, yes: true })) if run_id == "r1"
        ));
    }
}
