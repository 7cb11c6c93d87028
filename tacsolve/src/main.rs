use tacsolve::{AppConfig, Cli, solve};
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Search progress is reported through `tracing`; RUST_LOG picks the level
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::import()?;
    let AppConfig { solver } = AppConfig::load(&cli)?;

    let input = cli.io.request()?;
    let solution = solve(solver, input).await?;

    cli.io.report(&solution)?;
    Ok(())
}
