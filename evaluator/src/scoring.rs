//! Response scoring heuristics
//!
//! Four text heuristics, each in `[0, 1]`, averaged into a composite score.
//! All matching is case-insensitive substring matching; there is no language
//! understanding here. An empty response scores low instead of failing.

use crate::challenge::{Challenge, ChallengeKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const PATTERN_MATCH: &str = "pattern_match";
pub const FAILURE_RESISTANCE: &str = "failure_resistance";
pub const LOGICAL_STRUCTURE: &str = "logical_structure";
pub const COHERENCE: &str = "coherence";

/// Phrases that suggest the responder gave up.
pub const FAILURE_INDICATORS: [&str; 5] = [
    "i don't know",
    "cannot answer",
    "undefined",
    "error",
    "unable to",
];

/// Connectives that suggest an argued answer.
pub const LOGIC_INDICATORS: [&str; 5] = [
    "because",
    "therefore",
    "however",
    "although",
    "consequently",
];

const INDICATOR_WEIGHT: f64 = 0.2;
const IDEAL_SENTENCE_WORDS: f64 = 15.0;
const SENTENCE_TOLERANCE: f64 = 30.0;
const COHERENCE_FLOOR: f64 = 0.1;

/// Score sheet for one response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    /// Challenge this evaluation belongs to
    pub challenge_id: String,
    /// Kind of the evaluated challenge
    pub challenge_kind: ChallengeKind,
    /// Response length in bytes
    pub response_length: usize,
    /// Per-metric scores, each in [0, 1]
    pub scores: BTreeMap<String, f64>,
    /// Mean of `scores`
    pub composite_score: f64,
    /// When the evaluation was produced
    pub evaluated_at: DateTime<Utc>,
}

impl Evaluation {
    /// Look up a single metric
    pub fn score(&self, metric: &str) -> Option<f64> {
        self.scores.get(metric).copied()
    }
}

/// Score a response against the challenge that prompted it.
///
/// `pattern_match` is only present when the challenge lists expected
/// patterns; edge cases are judged on the remaining three metrics.
pub fn evaluate(challenge: &Challenge, response: &str) -> Evaluation {
    let lowered = response.to_lowercase();
    let mut scores = BTreeMap::new();

    if !challenge.expected_patterns.is_empty() {
        scores.insert(
            PATTERN_MATCH.to_string(),
            pattern_match(&challenge.expected_patterns, &lowered),
        );
    }
    scores.insert(FAILURE_RESISTANCE.to_string(), failure_resistance(&lowered));
    scores.insert(LOGICAL_STRUCTURE.to_string(), logical_structure(&lowered));
    scores.insert(COHERENCE.to_string(), coherence(response));

    let composite_score = scores.values().sum::<f64>() / scores.len() as f64;

    Evaluation {
        challenge_id: challenge.id.clone(),
        challenge_kind: challenge.kind,
        response_length: response.len(),
        scores,
        composite_score,
        evaluated_at: Utc::now(),
    }
}

/// Fraction of expected patterns present in the (lowercased) response
pub fn pattern_match(patterns: &[String], lowered: &str) -> f64 {
    if patterns.is_empty() {
        return 0.0;
    }
    let hits = patterns
        .iter()
        .filter(|p| lowered.contains(&p.to_lowercase()))
        .count();
    hits as f64 / patterns.len() as f64
}

/// `1 - 0.2` per failure indicator present, floored at zero
pub fn failure_resistance(lowered: &str) -> f64 {
    let hits = count_present(&FAILURE_INDICATORS, lowered);
    (1.0 - hits as f64 * INDICATOR_WEIGHT).max(0.0)
}

/// `0.2` per logical connective present, capped at one
pub fn logical_structure(lowered: &str) -> f64 {
    let hits = count_present(&LOGIC_INDICATORS, lowered);
    (hits as f64 * INDICATOR_WEIGHT).min(1.0)
}

/// Sentence-length heuristic: best near 15 words per sentence.
///
/// Sentences are counted by terminal punctuation; text without any scores
/// the floor value.
pub fn coherence(response: &str) -> f64 {
    let sentences = response
        .chars()
        .filter(|c| matches!(c, '.' | '!' | '?'))
        .count();
    if sentences == 0 {
        return COHERENCE_FLOOR;
    }
    let words = response.split_whitespace().count();
    let avg = words as f64 / sentences as f64;
    (1.0 - (avg - IDEAL_SENTENCE_WORDS).abs() / SENTENCE_TOLERANCE).clamp(COHERENCE_FLOOR, 1.0)
}

fn count_present(indicators: &[&str], lowered: &str) -> usize {
    indicators.iter().filter(|i| lowered.contains(*i)).count()
}
