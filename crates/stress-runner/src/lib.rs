//! Stress runner - drives the escalating evaluator from the command line
//!
//! Wires a [`CatalogChallengeSource`](evaluator::CatalogChallengeSource) and
//! [`MockResponder`](evaluator::MockResponder) into an
//! [`EscalationEvaluator`](evaluator::EscalationEvaluator), prints progress
//! after every trial, and optionally exports the session as JSON.

pub mod cli;
pub mod config;
pub mod report;

use anyhow::{Context, Result};
use evaluator::{
    CatalogChallengeSource, EscalationEvaluator, MockResponder, RunSummary, SessionExport,
};
use std::io::Write;

pub use cli::Args;
pub use config::RunnerConfig;

/// Run a full session, writing the report to `out`.
pub fn run_session(config: &RunnerConfig, out: &mut impl Write) -> Result<RunSummary> {
    let session_id = config
        .session_id
        .clone()
        .unwrap_or_else(evaluator::new_session_id);

    let mut evaluator = EscalationEvaluator::with_config(config.evaluator.clone())
        .context("Failed to build evaluator")?;
    let probability = config.evaluator.edge_case_probability;
    let mut source = match config.evaluator.seed {
        Some(seed) => CatalogChallengeSource::seeded(&session_id, probability, seed),
        None => CatalogChallengeSource::new(&session_id, probability),
    };
    let mut responder = MockResponder::new();

    writeln!(
        out,
        "{}",
        report::banner(&session_id, config.iterations, config.evaluator.escalation_factor)
    )?;

    let mut write_error = None;
    let summary = evaluator
        .run(config.iterations, &mut source, &mut responder, |result| {
            if write_error.is_none() {
                if let Err(e) = writeln!(out, "{}", report::trial_block(result)) {
                    write_error = Some(e);
                }
            }
        })
        .context("Stress run aborted")?;
    if let Some(e) = write_error {
        return Err(e).context("Failed to write trial report");
    }

    let statistics = evaluator.final_statistics().ok();
    writeln!(out, "{}", report::final_block(&summary, statistics.as_ref()))?;

    if let Some(path) = &config.export_path {
        SessionExport::capture(&session_id, &evaluator)
            .write_to(path)
            .with_context(|| format!("Failed to export session to {}", path.display()))?;
        writeln!(out, "Session written to {}", path.display())?;
    }

    Ok(summary)
}
