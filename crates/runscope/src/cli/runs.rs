//! Search run command handlers.

use super::commands::{OutputFormat, RunsCommands};
use super::output::{local_time, print_json, truncate};
use runscope::{BackendConfig, MonitorRepository, RunFilter, RunscopeResult, WorkflowExport};
use std::io::{self, BufRead, Write};
use tracing::info;

/// Handle search run commands.
pub async fn handle_runs_command(cmd: RunsCommands, config: &BackendConfig) -> RunscopeResult<()> {
    let repository = super::repository(config);

    match cmd {
        RunsCommands::List {
            flagged,
            limit,
            format,
        } => {
            let filter = if flagged {
                RunFilter::flagged()
            } else {
                RunFilter::default()
            };
            list_runs(&repository, filter, limit.unwrap_or(config.run_limit), format).await
        }
        RunsCommands::Steps { run_id, format } => show_steps(&repository, &run_id, format).await,
        RunsCommands::Export { run_id, copy } => export_run(&repository, &run_id, copy).await,
        RunsCommands::Delete { run_id, yes } => delete_run(&repository, &run_id, yes).await,
    }
}

async fn list_runs(
    repository: &MonitorRepository,
    filter: RunFilter,
    limit: usize,
    format: OutputFormat,
) -> RunscopeResult<()> {
    let runs = repository.list_runs(filter, limit).await?;

    match format {
        OutputFormat::Json => print_json(&runs)?,
        OutputFormat::Human => {
            println!(
                "{:<10} {:<12} {:<19} {:<20} Query",
                "ID", "Status", "Created", "User"
            );
            println!("{:-<100}", "");
            for run in &runs {
                let flag = if run.is_flagged { " [flagged]" } else { "" };
                println!(
                    "{:<10} {:<12} {:<19} {:<20} {}{}",
                    run.short_id(),
                    run.status.to_string(),
                    local_time(&run.created_at),
                    truncate(run.user_label(), 20),
                    run.initial_query.as_deref().unwrap_or("No query available"),
                    flag
                );
            }
            println!("Total: {} runs", runs.len());
        }
    }

    Ok(())
}

async fn show_steps(
    repository: &MonitorRepository,
    run_id: &str,
    format: OutputFormat,
) -> RunscopeResult<()> {
    let steps = repository.list_step_logs(run_id).await?;

    match format {
        OutputFormat::Json => print_json(&steps)?,
        OutputFormat::Human => {
            if let Some(trigger) = steps.first().and_then(|s| s.trigger_message.as_deref()) {
                println!("Trigger: {}", trigger);
                println!("{:-<80}", "");
            }
            for step in &steps {
                let status = if step.failed() { "FAILED" } else { "ok" };
                match step.duration_ms.filter(|ms| *ms > 0) {
                    Some(ms) => println!(
                        "{}. {} [{}] {}ms",
                        step.step_number, step.step_name, status, ms
                    ),
                    None => println!("{}. {} [{}]", step.step_number, step.step_name, status),
                }
                if let Some(error) = &step.error_message {
                    println!("   error: {}", error);
                }
            }
            println!("Total: {} steps", steps.len());
        }
    }

    Ok(())
}

async fn export_run(repository: &MonitorRepository, run_id: &str, copy: bool) -> RunscopeResult<()> {
    let steps = repository.list_step_logs(run_id).await?;
    let text = WorkflowExport::new(run_id, &steps).to_pretty_json()?;
    println!("{}", text);

    if copy {
        copy_to_clipboard(&text)?;
    }
    Ok(())
}

#[cfg(feature = "tui")]
fn copy_to_clipboard(text: &str) -> RunscopeResult<()> {
    let path = runscope::WorkflowCopier::system().copy_text(text, std::time::Instant::now())?;
    info!(?path, "Workflow copied to clipboard");
    eprintln!("Copied to clipboard");
    Ok(())
}

#[cfg(not(feature = "tui"))]
fn copy_to_clipboard(_text: &str) -> RunscopeResult<()> {
    Err(runscope::ClipboardError::new(
        "Clipboard support not enabled. Rebuild with --features tui",
    ))?
}

async fn delete_run(repository: &MonitorRepository, run_id: &str, yes: bool) -> RunscopeResult<()> {
    if !yes && !confirm(&format!("Delete run {}? [y/N] ", run_id)) {
        eprintln!("Delete cancelled");
        return Ok(());
    }

    repository.delete_run(run_id).await?;
    info!(run_id, "Run deleted");
    println!("Deleted run {}", run_id);
    Ok(())
}

fn confirm(prompt: &str) -> bool {
    eprint!("{}", prompt);
    if io::stderr().flush().is_err() {
        return false;
    }
    let mut answer = String::new();
    if io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim(), "y" | "Y" | "yes")
}
