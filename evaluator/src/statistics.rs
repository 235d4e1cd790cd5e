//! Aggregate statistics over the retained trial history

use crate::challenge::ChallengeKind;
use crate::error::{EvaluatorError, EvaluatorResult};
use crate::history::TrialHistory;
use crate::state::EvaluatorState;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Quality band of a composite score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBucket {
    /// `>= 0.8`
    Excellent,
    /// `[0.6, 0.8)`
    Good,
    /// `[0.4, 0.6)`
    Fair,
    /// `< 0.4`
    Poor,
}

impl ScoreBucket {
    pub fn from_score(score: f64) -> Self {
        if score >= 0.8 {
            Self::Excellent
        } else if score >= 0.6 {
            Self::Good
        } else if score >= 0.4 {
            Self::Fair
        } else {
            Self::Poor
        }
    }
}

impl std::fmt::Display for ScoreBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Excellent => write!(f, "excellent"),
            Self::Good => write!(f, "good"),
            Self::Fair => write!(f, "fair"),
            Self::Poor => write!(f, "poor"),
        }
    }
}

/// Count of trials per score bucket
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreDistribution {
    pub excellent: usize,
    pub good: usize,
    pub fair: usize,
    pub poor: usize,
}

impl ScoreDistribution {
    pub fn record(&mut self, score: f64) {
        match ScoreBucket::from_score(score) {
            ScoreBucket::Excellent => self.excellent += 1,
            ScoreBucket::Good => self.good += 1,
            ScoreBucket::Fair => self.fair += 1,
            ScoreBucket::Poor => self.poor += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.excellent + self.good + self.fair + self.poor
    }
}

/// Score summary for one challenge kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KindPerformance {
    pub test_count: usize,
    pub average_score: f64,
    pub best_score: f64,
    pub worst_score: f64,
}

/// Final statistics for an evaluator.
///
/// Counts and scores cover the retained history; the totals and final
/// levels come from the evaluator state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub total_trials: u64,
    pub error_count: u64,
    pub error_rate: f64,
    pub final_complexity_level: f64,
    pub final_consistency_score: f64,
    /// Records the averages below were computed over
    pub retained_trials: usize,
    pub average_composite_score: f64,
    pub score_distribution: ScoreDistribution,
    pub by_kind: BTreeMap<ChallengeKind, KindPerformance>,
}

impl Statistics {
    /// Aggregate the retained history. Fails with `EmptyHistory` when no
    /// trial has been recorded.
    pub fn compute(history: &TrialHistory, state: &EvaluatorState) -> EvaluatorResult<Self> {
        if history.is_empty() {
            return Err(EvaluatorError::EmptyHistory);
        }

        let mut distribution = ScoreDistribution::default();
        let mut per_kind: BTreeMap<ChallengeKind, Vec<f64>> = BTreeMap::new();
        let mut sum = 0.0;

        for record in history.iter() {
            let score = record.evaluation.composite_score;
            sum += score;
            distribution.record(score);
            per_kind
                .entry(record.challenge.kind)
                .or_default()
                .push(score);
        }

        let by_kind = per_kind
            .into_iter()
            .map(|(kind, scores)| {
                let performance = KindPerformance {
                    test_count: scores.len(),
                    average_score: scores.iter().sum::<f64>() / scores.len() as f64,
                    best_score: scores.iter().copied().fold(f64::MIN, f64::max),
                    worst_score: scores.iter().copied().fold(f64::MAX, f64::min),
                };
                (kind, performance)
            })
            .collect();

        Ok(Self {
            total_trials: state.total_trials,
            error_count: state.error_count,
            error_rate: state.error_rate(),
            final_complexity_level: state.complexity_level,
            final_consistency_score: state.consistency_score,
            retained_trials: history.len(),
            average_composite_score: sum / history.len() as f64,
            score_distribution: distribution,
            by_kind,
        })
    }

    /// Format as a markdown summary report
    pub fn format_report(&self) -> String {
        let mut report = String::new();

        report.push_str("# Stress Test Results\n\n");

        report.push_str("## Summary\n\n");
        report.push_str(&format!(
            "| Metric | Value |\n\
             |--------|-------|\n\
             | Total Trials | {} |\n\
             | Errors | {} |\n\
             | Error Rate | {:.2}% |\n\
             | Average Score | {:.3} |\n\
             | Final Complexity | {:.2} |\n\
             | Consistency | {:.3} |\n\n",
            self.total_trials,
            self.error_count,
            self.error_rate * 100.0,
            self.average_composite_score,
            self.final_complexity_level,
            self.final_consistency_score
        ));

        report.push_str("## Score Distribution\n\n");
        let d = &self.score_distribution;
        report.push_str(&format!(
            "| Band | Trials |\n\
             |------|--------|\n\
             | Excellent (>=0.8) | {} |\n\
             | Good (0.6-0.8) | {} |\n\
             | Fair (0.4-0.6) | {} |\n\
             | Poor (<0.4) | {} |\n\n",
            d.excellent, d.good, d.fair, d.poor
        ));

        if !self.by_kind.is_empty() {
            report.push_str("## By Challenge Kind\n\n");
            report.push_str("| Kind | Trials | Average | Best | Worst |\n");
            report.push_str("|------|--------|---------|------|-------|\n");
            for (kind, perf) in &self.by_kind {
                report.push_str(&format!(
                    "| {} | {} | {:.3} | {:.3} | {:.3} |\n",
                    kind, perf.test_count, perf.average_score, perf.best_score, perf.worst_score
                ));
            }
            report.push('\n');
        }

        report
    }

    /// Get statistics as JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
