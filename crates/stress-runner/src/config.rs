use crate::cli::Args;
use anyhow::{Context, Result};
use evaluator::EvaluatorConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level runner configuration.
///
/// Resolution order: defaults → TOML file → `STRESS_*` / `EVALUATOR_*`
/// environment → command-line flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Iteration budget for the run
    pub iterations: u64,
    /// Where to write the session JSON (None = no export)
    pub export_path: Option<PathBuf>,
    /// Session identifier (None = random)
    pub session_id: Option<String>,
    /// Evaluator tuning
    pub evaluator: EvaluatorConfig,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            iterations: 15,
            export_path: None,
            session_id: None,
            evaluator: EvaluatorConfig {
                escalation_factor: 1.3,
                ..Default::default()
            },
        }
    }
}

impl RunnerConfig {
    /// Parse a TOML config file; missing keys keep their defaults
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Resolve the full configuration for a CLI invocation
    pub fn resolve(args: &Args) -> Result<Self> {
        let mut config = match &args.config {
            Some(path) => Self::from_toml_file(path)?,
            None => Self::default(),
        };
        config.apply_env();
        config.apply_args(args);
        config
            .evaluator
            .validate()
            .context("Invalid evaluator configuration")?;
        Ok(config)
    }

    /// Override fields from the environment
    pub fn apply_env(&mut self) {
        self.evaluator.apply_env();
        if let Ok(val) = std::env::var("STRESS_ITERATIONS") {
            if let Ok(n) = val.trim().parse() {
                self.iterations = n;
            }
        }
        if let Ok(path) = std::env::var("STRESS_EXPORT_PATH") {
            self.export_path = Some(PathBuf::from(path));
        }
        if let Ok(id) = std::env::var("STRESS_SESSION_ID") {
            self.session_id = Some(id);
        }
    }

    /// Override fields from explicit command-line flags
    pub fn apply_args(&mut self, args: &Args) {
        if let Some(n) = args.iterations {
            self.iterations = n;
        }
        if let Some(path) = &args.export {
            self.export_path = Some(path.clone());
        }
        if let Some(id) = &args.session_id {
            self.session_id = Some(id.clone());
        }

        let ev = &mut self.evaluator;
        if let Some(v) = args.escalation_factor {
            ev.escalation_factor = v;
        }
        if let Some(v) = args.initial_complexity {
            ev.initial_complexity = v;
        }
        if let Some(v) = args.capacity {
            ev.history_capacity = v;
        }
        if let Some(v) = args.failure_threshold {
            ev.failure_rate_threshold = v;
        }
        if let Some(v) = args.edge_case_probability {
            ev.edge_case_probability = v;
        }
        if let Some(v) = args.seed {
            ev.seed = Some(v);
        }
    }
}
