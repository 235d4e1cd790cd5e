//! Challenge data model

use crate::error::{EvaluatorError, EvaluatorResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Category of a challenge put to the responder
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChallengeKind {
    /// Chained implications, modus tollens
    LogicalReasoning,
    /// Quadratic solving with verification
    MathematicalReasoning,
    /// Explain a topic from two personas in turn
    ContextSwitching,
    /// Hold a list in mind while solving a riddle
    MemoryStress,
    /// Resolve a set of conflicting statements
    ContradictionHandling,
    /// Self-referential definition that must stay non-circular
    RecursiveReasoning,
    /// Compare several ethical frameworks
    EthicalReasoning,
    /// Liar's paradox
    Paradox,
    /// Division by zero
    UndefinedOperation,
    /// Creator-of-the-creator chains
    InfiniteRegress,
    /// Analysis of an analysis of a sentence about itself
    SelfReference,
    /// Properties applied to the wrong domain
    CategoryError,
}

impl ChallengeKind {
    /// Kinds drawn from the escalating reasoning catalog
    pub const REASONING: [ChallengeKind; 7] = [
        Self::LogicalReasoning,
        Self::MathematicalReasoning,
        Self::ContextSwitching,
        Self::MemoryStress,
        Self::ContradictionHandling,
        Self::RecursiveReasoning,
        Self::EthicalReasoning,
    ];

    /// Kinds drawn from the fixed edge-case catalog
    pub const EDGE_CASES: [ChallengeKind; 5] = [
        Self::Paradox,
        Self::UndefinedOperation,
        Self::InfiniteRegress,
        Self::SelfReference,
        Self::CategoryError,
    ];

    /// Whether this kind belongs to the edge-case catalog
    pub fn is_edge_case(&self) -> bool {
        Self::EDGE_CASES.contains(self)
    }

    /// Stable snake_case name, matching the serialized form
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LogicalReasoning => "logical_reasoning",
            Self::MathematicalReasoning => "mathematical_reasoning",
            Self::ContextSwitching => "context_switching",
            Self::MemoryStress => "memory_stress",
            Self::ContradictionHandling => "contradiction_handling",
            Self::RecursiveReasoning => "recursive_reasoning",
            Self::EthicalReasoning => "ethical_reasoning",
            Self::Paradox => "paradox",
            Self::UndefinedOperation => "undefined_operation",
            Self::InfiniteRegress => "infinite_regress",
            Self::SelfReference => "self_reference",
            Self::CategoryError => "category_error",
        }
    }
}

impl std::fmt::Display for ChallengeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single prompt issued to the responder.
///
/// Built once by a [`ChallengeSource`](super::ChallengeSource) and never
/// mutated afterwards; the evaluator only reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Challenge {
    /// Unique identifier within a session
    pub id: String,
    /// Challenge category
    pub kind: ChallengeKind,
    /// Prompt text handed to the responder
    pub prompt: String,
    /// Phrases a good response is expected to contain (empty for edge cases)
    pub expected_patterns: Vec<String>,
    /// Difficulty multiplier the challenge was generated at
    pub difficulty: f64,
    /// Free-text description of the desired behaviour (edge cases only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_behavior: Option<String>,
    /// Creation time
    pub created_at: DateTime<Utc>,
}

impl Challenge {
    /// Create a challenge with no expected behaviour note
    pub fn new(
        id: impl Into<String>,
        kind: ChallengeKind,
        prompt: impl Into<String>,
        expected_patterns: Vec<String>,
        difficulty: f64,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            prompt: prompt.into(),
            expected_patterns,
            difficulty,
            expected_behavior: None,
            created_at: Utc::now(),
        }
    }

    /// Attach an expected behaviour note
    pub fn with_expected_behavior(mut self, behavior: impl Into<String>) -> Self {
        self.expected_behavior = Some(behavior.into());
        self
    }

    /// Check that the challenge is well formed.
    pub fn validate(&self) -> EvaluatorResult<()> {
        let reason = if self.id.trim().is_empty() {
            Some("id is empty".to_string())
        } else if self.prompt.trim().is_empty() {
            Some("prompt is empty".to_string())
        } else if !self.difficulty.is_finite() || self.difficulty <= 0.0 {
            Some(format!("difficulty must be positive, got {}", self.difficulty))
        } else {
            None
        };

        match reason {
            Some(reason) => Err(EvaluatorError::InvalidChallenge {
                challenge_id: self.id.clone(),
                reason,
            }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Challenge {
        Challenge::new(
            "s_1",
            ChallengeKind::LogicalReasoning,
            "If A implies B...",
            vec!["modus tollens".to_string()],
            1.0,
        )
    }

    #[test]
    fn test_kind_display_matches_serde() {
        for kind in ChallengeKind::REASONING
            .iter()
            .chain(ChallengeKind::EDGE_CASES.iter())
        {
            let json = serde_json::to_string(kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind));
        }
    }

    #[test]
    fn test_edge_case_partition() {
        assert!(ChallengeKind::Paradox.is_edge_case());
        assert!(!ChallengeKind::MemoryStress.is_edge_case());
    }

    #[test]
    fn test_validate_accepts_well_formed() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_blank_prompt() {
        let mut c = sample();
        c.prompt = "   ".to_string();
        let err = c.validate().unwrap_err();
        assert!(matches!(err, EvaluatorError::InvalidChallenge { .. }));
    }

    #[test]
    fn test_validate_rejects_bad_difficulty() {
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let mut c = sample();
            c.difficulty = bad;
            assert!(c.validate().is_err(), "difficulty {} should be rejected", bad);
        }
    }
}
