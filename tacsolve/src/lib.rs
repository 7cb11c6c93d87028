#![warn(missing_docs)]
//! Runs the TAC Travel allocation resolver on a JSON request.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tac_core::{models::SolveInput, ports::PriceSolver as _};
use tac_solver::{PriceOptimizer, Solution, SolverSettings};
use tokio::select;
use tracing::{Level, event};

mod cli;
pub use cli::Cli;

mod config;
pub use config::AppConfig;

mod io;
pub use io::IOArgs;

/// How often an interrupted solve is asked again to stop
const CANCEL_RETRY: Duration = Duration::from_millis(10);

/// Runs a solve on a blocking thread until it finishes or Ctrl-C is pressed.
///
/// An interrupted solve is cancelled and its best allocation so far is
/// returned like any other.
pub async fn solve(settings: SolverSettings, input: SolveInput) -> anyhow::Result<Solution> {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            event!(Level::WARN, %err, "cannot listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };
    solve_until(settings, input, ctrl_c).await
}

/// Runs a solve on a blocking thread until it finishes or `interrupt`
/// resolves, in which case the solve is cancelled.
pub async fn solve_until(
    settings: SolverSettings,
    input: SolveInput,
    interrupt: impl Future<Output = ()>,
) -> anyhow::Result<Solution> {
    let optimizer = Arc::new(PriceOptimizer::new(settings));

    let mut worker = tokio::task::spawn_blocking({
        let optimizer = optimizer.clone();
        move || optimizer.solve(&input)
    });

    let finished = select! {
        result = &mut worker => Some(result),
        _ = interrupt => None,
    };

    let solution = match finished {
        Some(result) => result??,
        None => {
            event!(Level::WARN, "interrupted, keeping the best allocation so far");
            // a solve that starts after the request clears it, so keep asking
            loop {
                optimizer.request_cancel(false);
                select! {
                    result = &mut worker => break result??,
                    _ = tokio::time::sleep(CANCEL_RETRY) => {}
                }
            }
        }
    };
    Ok(solution)
}

/// Errors raised by the command line
#[derive(thiserror::Error, Debug)]
pub enum CliError {
    /// The `--config` path does not exist
    #[error("config file {} does not exist", .0.display())]
    MissingConfig(PathBuf),
}
