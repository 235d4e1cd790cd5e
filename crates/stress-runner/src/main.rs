use anyhow::Result;
use clap::Parser;
use stress_runner::{run_session, Args, RunnerConfig};
use tracing::info;

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = RunnerConfig::resolve(&args)?;
    info!(
        iterations = config.iterations,
        escalation_factor = config.evaluator.escalation_factor,
        seed = ?config.evaluator.seed,
        "Stress runner starting"
    );

    let stdout = std::io::stdout();
    let summary = run_session(&config, &mut stdout.lock())?;
    info!(status = %summary.status, trials = summary.trials_run, "Stress runner finished");

    Ok(())
}
