use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments
#[derive(Parser, Debug, Default)]
#[command(author, version, about = "Escalating stress test against a mock responder", long_about = None)]
pub struct Args {
    /// TOML config file (values are overridden by env and flags)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Iteration budget (overrides STRESS_ITERATIONS)
    #[arg(long)]
    pub iterations: Option<u64>,

    /// Complexity multiplier applied after each trial
    #[arg(long)]
    pub escalation_factor: Option<f64>,

    /// Complexity level of the first trial
    #[arg(long)]
    pub initial_complexity: Option<f64>,

    /// Maximum trial records retained
    #[arg(long)]
    pub capacity: Option<usize>,

    /// Error rate above which the run halts
    #[arg(long)]
    pub failure_threshold: Option<f64>,

    /// Chance of drawing an edge-case challenge
    #[arg(long)]
    pub edge_case_probability: Option<f64>,

    /// Seed for challenge selection (omit for a random run)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Session identifier used in challenge ids
    #[arg(long)]
    pub session_id: Option<String>,

    /// Write the full session as JSON to this path
    #[arg(long)]
    pub export: Option<PathBuf>,
}
