//! Evaluator state - rolling counters, trial records, and run status

use crate::challenge::Challenge;
use crate::scoring::Evaluation;
use serde::{Deserialize, Serialize};

/// Mutable counters owned by a single evaluator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluatorState {
    /// Difficulty multiplier handed to the next challenge
    pub complexity_level: f64,
    /// Stability of recent composite scores, in [0, 1]
    pub consistency_score: f64,
    /// Trials whose composite fell below the error threshold
    pub error_count: u64,
    /// Trials completed
    pub total_trials: u64,
}

impl EvaluatorState {
    pub fn new(initial_complexity: f64) -> Self {
        Self {
            complexity_level: initial_complexity,
            consistency_score: 1.0,
            error_count: 0,
            total_trials: 0,
        }
    }

    /// Fraction of trials counted as errors (0 before any trial)
    pub fn error_rate(&self) -> f64 {
        if self.total_trials == 0 {
            0.0
        } else {
            self.error_count as f64 / self.total_trials as f64
        }
    }

    /// Get a summary for logging
    pub fn summary(&self) -> String {
        format!(
            "trials={} errors={} error_rate={:.2} consistency={:.3} complexity={:.2}",
            self.total_trials,
            self.error_count,
            self.error_rate(),
            self.consistency_score,
            self.complexity_level,
        )
    }
}

/// One completed challenge/response/evaluation cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialRecord {
    /// Which trial this was (1-indexed)
    pub iteration: u64,
    pub challenge: Challenge,
    pub response: String,
    pub evaluation: Evaluation,
}

/// What `run_trial` hands back: the new record plus a state snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialResult {
    pub record: TrialRecord,
    pub state: EvaluatorState,
}

impl TrialResult {
    pub fn iteration(&self) -> u64 {
        self.record.iteration
    }

    pub fn composite_score(&self) -> f64 {
        self.record.evaluation.composite_score
    }
}

/// Lifecycle of an evaluator run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    /// Still accepting trials
    Running,
    /// Iteration budget used up
    HaltedByBudget,
    /// Error rate crossed the failure threshold
    HaltedByFailureRate,
}

impl RunStatus {
    pub fn is_halted(&self) -> bool {
        !matches!(self, Self::Running)
    }
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Running => write!(f, "running"),
            Self::HaltedByBudget => write!(f, "halted_by_budget"),
            Self::HaltedByFailureRate => write!(f, "halted_by_failure_rate"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state() {
        let state = EvaluatorState::new(1.5);
        assert_eq!(state.complexity_level, 1.5);
        assert_eq!(state.consistency_score, 1.0);
        assert_eq!(state.total_trials, 0);
        assert_eq!(state.error_rate(), 0.0);
    }

    #[test]
    fn test_error_rate() {
        let state = EvaluatorState {
            complexity_level: 1.0,
            consistency_score: 1.0,
            error_count: 3,
            total_trials: 4,
        };
        assert!((state.error_rate() - 0.75).abs() < 1e-9);
        assert!(state.summary().contains("error_rate=0.75"));
    }

    #[test]
    fn test_run_status() {
        assert!(!RunStatus::Running.is_halted());
        assert!(RunStatus::HaltedByBudget.is_halted());
        assert_eq!(
            RunStatus::HaltedByFailureRate.to_string(),
            "halted_by_failure_rate"
        );
    }
}
