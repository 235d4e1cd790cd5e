//! Escalation Evaluator - stateful trial loop with escalating difficulty
//!
//! Each trial runs generate → respond → evaluate → update. The evaluator owns
//! its history and counters exclusively; callers that want parallel trial
//! streams run independent evaluators and combine their statistics.

use crate::challenge::ChallengeSource;
use crate::config::EvaluatorConfig;
use crate::error::{EvaluatorError, EvaluatorResult};
use crate::history::TrialHistory;
use crate::responder::Responder;
use crate::scoring;
use crate::state::{EvaluatorState, RunStatus, TrialRecord, TrialResult};
use crate::statistics::Statistics;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Outcome of a complete run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Why the run stopped
    pub status: RunStatus,
    /// Trials executed by this run
    pub trials_run: u64,
    /// State after the last trial
    pub state: EvaluatorState,
}

/// Escalating stress-test evaluator.
///
/// Owns the bounded trial history and rolling counters. Every successful
/// trial multiplies the complexity level by the configured escalation
/// factor until the next step would overflow, so later challenges are
/// generated at higher difficulty.
pub struct EscalationEvaluator {
    config: EvaluatorConfig,
    history: TrialHistory,
    state: EvaluatorState,
    status: RunStatus,
}

impl EscalationEvaluator {
    /// Create an evaluator with default config
    pub fn new() -> Self {
        Self::build(EvaluatorConfig::default())
    }

    /// Create with custom config, rejecting values it cannot run with
    pub fn with_config(config: EvaluatorConfig) -> EvaluatorResult<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: EvaluatorConfig) -> Self {
        Self {
            history: TrialHistory::new(config.history_capacity),
            state: EvaluatorState::new(config.initial_complexity),
            status: RunStatus::Running,
            config,
        }
    }

    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    pub fn state(&self) -> &EvaluatorState {
        &self.state
    }

    pub fn history(&self) -> &TrialHistory {
        &self.history
    }

    pub fn status(&self) -> RunStatus {
        self.status
    }

    /// Run one trial at the current complexity level.
    ///
    /// On error nothing is recorded: the history, counters and complexity
    /// level are exactly as before the call.
    pub fn run_trial<S, R>(&mut self, source: &mut S, responder: &mut R) -> EvaluatorResult<TrialResult>
    where
        S: ChallengeSource + ?Sized,
        R: Responder + ?Sized,
    {
        let level = self.state.complexity_level;
        if !level.is_finite() || level <= 0.0 {
            return Err(EvaluatorError::InvalidComplexity { value: level });
        }

        let challenge = source.next_challenge(level);
        challenge.validate()?;

        let response = responder.respond(&challenge);
        let evaluation = scoring::evaluate(&challenge, &response);
        let composite = evaluation.composite_score;

        self.state.total_trials += 1;
        let record = TrialRecord {
            iteration: self.state.total_trials,
            challenge,
            response,
            evaluation,
        };
        self.history.push(record.clone());

        if composite < self.config.error_score_threshold {
            self.state.error_count += 1;
            warn!(
                iteration = record.iteration,
                kind = %record.challenge.kind,
                score = composite,
                "Trial scored below error threshold"
            );
        }

        self.state.consistency_score = self.consistency_score();
        self.escalate();

        debug!(
            iteration = record.iteration,
            challenge_id = %record.challenge.id,
            kind = %record.challenge.kind,
            score = composite,
            "{}",
            self.state.summary()
        );

        Ok(TrialResult {
            record,
            state: self.state.clone(),
        })
    }

    /// True once the error rate exceeds the configured failure threshold
    pub fn should_halt(&self) -> bool {
        self.state.total_trials > 0 && self.state.error_rate() > self.config.failure_rate_threshold
    }

    /// Aggregate statistics over the retained history.
    ///
    /// Returns `EmptyHistory` before the first trial.
    pub fn final_statistics(&self) -> EvaluatorResult<Statistics> {
        Statistics::compute(&self.history, &self.state)
    }

    /// Drive trials until the budget runs out or the failure rate trips.
    ///
    /// `observer` sees every trial result as it lands. Any trial error aborts
    /// the run and is returned; the status stays `Running` in that case.
    pub fn run<S, R, F>(
        &mut self,
        budget: u64,
        source: &mut S,
        responder: &mut R,
        mut observer: F,
    ) -> EvaluatorResult<RunSummary>
    where
        S: ChallengeSource + ?Sized,
        R: Responder + ?Sized,
        F: FnMut(&TrialResult),
    {
        info!(
            budget,
            escalation_factor = self.config.escalation_factor,
            complexity = self.state.complexity_level,
            "Starting stress run"
        );
        self.status = RunStatus::Running;

        let mut trials_run = 0;
        while trials_run < budget {
            let result = self.run_trial(source, responder)?;
            trials_run += 1;
            observer(&result);

            if self.should_halt() {
                self.status = RunStatus::HaltedByFailureRate;
                warn!(
                    error_rate = self.state.error_rate(),
                    threshold = self.config.failure_rate_threshold,
                    "Critical failure rate exceeded"
                );
                break;
            }
        }

        if !self.status.is_halted() {
            self.status = RunStatus::HaltedByBudget;
        }

        info!(status = %self.status, trials_run, "{}", self.state.summary());

        Ok(RunSummary {
            status: self.status,
            trials_run,
            state: self.state.clone(),
        })
    }

    /// Multiply the level by the escalation factor.
    ///
    /// The level holds at its last finite value once the next step would
    /// overflow, so state always serializes as a plain number.
    fn escalate(&mut self) {
        let next = self.state.complexity_level * self.config.escalation_factor;
        if next.is_finite() {
            self.state.complexity_level = next;
        } else {
            debug!(
                complexity = self.state.complexity_level,
                "Complexity at f64 ceiling, holding level"
            );
        }
    }

    /// `1 - 2 * variance` of the most recent composites, clamped to [0, 1].
    fn consistency_score(&self) -> f64 {
        if self.history.len() < 2 {
            return 1.0;
        }
        let scores = self.history.recent_composites(self.config.consistency_window);
        if scores.len() < 2 {
            return 1.0;
        }
        let n = scores.len() as f64;
        let mean = scores.iter().sum::<f64>() / n;
        let variance = scores.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / n;
        (1.0 - variance * 2.0).clamp(0.0, 1.0)
    }
}

impl Default for EscalationEvaluator {
    fn default() -> Self {
        Self::new()
    }
}
