//! Evaluator configuration
//!
//! Defaults match the original stress-test tuning. Every knob can be
//! overridden from the environment (`EVALUATOR_*`) or deserialized from a
//! config file table; missing fields fall back to the defaults.

use crate::error::{EvaluatorError, EvaluatorResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluatorConfig {
    /// Maximum trial records retained
    pub history_capacity: usize,
    /// Complexity level of the first trial
    pub initial_complexity: f64,
    /// Multiplier applied to the complexity level after each trial
    pub escalation_factor: f64,
    /// Error rate above which the evaluator asks to halt
    pub failure_rate_threshold: f64,
    /// Composite score below which a trial counts as an error
    pub error_score_threshold: f64,
    /// Number of recent trials used for the consistency score
    pub consistency_window: usize,
    /// Chance that the catalog source emits an edge case
    pub edge_case_probability: f64,
    /// Seed for the catalog source (None = entropy)
    pub seed: Option<u64>,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            history_capacity: 1000,
            initial_complexity: 1.0,
            escalation_factor: 1.2,
            failure_rate_threshold: 0.7,
            error_score_threshold: 0.5,
            consistency_window: 5,
            edge_case_probability: 0.3,
            seed: None,
        }
    }
}

impl EvaluatorConfig {
    /// Create config from environment variables on top of the defaults
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    /// Override fields from `EVALUATOR_*` environment variables.
    ///
    /// Unparseable values are ignored.
    pub fn apply_env(&mut self) {
        self.apply_vars(|key| std::env::var(key).ok());
    }

    fn apply_vars(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        fn parsed<T: std::str::FromStr>(
            lookup: &impl Fn(&str) -> Option<String>,
            key: &str,
        ) -> Option<T> {
            lookup(key).and_then(|v| v.trim().parse().ok())
        }

        if let Some(v) = parsed(&lookup, "EVALUATOR_HISTORY_CAPACITY") {
            self.history_capacity = v;
        }
        if let Some(v) = parsed(&lookup, "EVALUATOR_INITIAL_COMPLEXITY") {
            self.initial_complexity = v;
        }
        if let Some(v) = parsed(&lookup, "EVALUATOR_ESCALATION_FACTOR") {
            self.escalation_factor = v;
        }
        if let Some(v) = parsed(&lookup, "EVALUATOR_FAILURE_RATE_THRESHOLD") {
            self.failure_rate_threshold = v;
        }
        if let Some(v) = parsed(&lookup, "EVALUATOR_ERROR_SCORE_THRESHOLD") {
            self.error_score_threshold = v;
        }
        if let Some(v) = parsed(&lookup, "EVALUATOR_CONSISTENCY_WINDOW") {
            self.consistency_window = v;
        }
        if let Some(v) = parsed(&lookup, "EVALUATOR_EDGE_CASE_PROBABILITY") {
            self.edge_case_probability = v;
        }
        if let Some(v) = parsed(&lookup, "EVALUATOR_SEED") {
            self.seed = Some(v);
        }
    }

    /// Reject values the evaluator cannot run with.
    pub fn validate(&self) -> EvaluatorResult<()> {
        if self.history_capacity == 0 {
            return Err(invalid("history_capacity", "must be at least 1"));
        }
        if self.consistency_window == 0 {
            return Err(invalid("consistency_window", "must be at least 1"));
        }
        if !self.initial_complexity.is_finite() || self.initial_complexity <= 0.0 {
            return Err(invalid(
                "initial_complexity",
                format!("must be finite and positive, got {}", self.initial_complexity),
            ));
        }
        if !self.escalation_factor.is_finite() || self.escalation_factor <= 1.0 {
            return Err(invalid(
                "escalation_factor",
                format!("must be finite and greater than 1, got {}", self.escalation_factor),
            ));
        }
        for (field, value) in [
            ("failure_rate_threshold", self.failure_rate_threshold),
            ("error_score_threshold", self.error_score_threshold),
            ("edge_case_probability", self.edge_case_probability),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(invalid(field, format!("must be within [0, 1], got {}", value)));
            }
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> EvaluatorError {
    EvaluatorError::InvalidConfig {
        field,
        reason: reason.into(),
    }
}
