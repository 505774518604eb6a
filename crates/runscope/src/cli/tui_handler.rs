//! Dashboard launch command handler.

use super::commands::TuiArgs;
use runscope::{BackendConfig, RunFilter, RunscopeResult};

/// Launch the terminal dashboard.
#[cfg(feature = "tui")]
pub async fn launch_tui(args: TuiArgs, config: &BackendConfig) -> RunscopeResult<()> {
    use runscope::{AppOptions, RestBackend, run_tui};
    use std::sync::Arc;

    let options = AppOptions {
        run_limit: args.limit.unwrap_or(config.run_limit),
        filter: if args.flagged {
            RunFilter::flagged()
        } else {
            RunFilter::default()
        },
    };
    tracing::info!(?options, "Launching dashboard");

    let backend = Arc::new(RestBackend::new(super::repository(config)));
    run_tui(backend, options).await?;

    Ok(())
}

#[cfg(not(feature = "tui"))]
pub async fn launch_tui(_args: TuiArgs, _config: &BackendConfig) -> RunscopeResult<()> {
    eprintln!("Error: TUI feature not enabled. Rebuild with --features tui");
    std::process::exit(1);
}
