//! Responder seam - the system under test

use crate::challenge::{Challenge, ChallengeKind};

/// Produces a response for a challenge.
///
/// The evaluator treats this as a black box. Any string is acceptable,
/// including an empty one.
pub trait Responder {
    fn respond(&mut self, challenge: &Challenge) -> String;
}

impl<F> Responder for F
where
    F: FnMut(&Challenge) -> String,
{
    fn respond(&mut self, challenge: &Challenge) -> String {
        self(challenge)
    }
}

/// Upper bound on appended `Layer ` tokens, whatever the difficulty.
pub const MAX_LAYERS: usize = 512;

/// Canned responder used by the CLI demo and tests.
///
/// Appends one `Layer ` token per whole unit of difficulty, up to
/// [`MAX_LAYERS`], so longer runs produce progressively longer (and less
/// coherent) answers.
#[derive(Debug, Clone, Default)]
pub struct MockResponder {
    answered: u64,
}

impl MockResponder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of challenges answered so far
    pub fn answered(&self) -> u64 {
        self.answered
    }

    /// Canned answer for a challenge kind
    pub fn template(kind: ChallengeKind) -> &'static str {
        match kind {
            ChallengeKind::LogicalReasoning => "Using modus tollens: If A→B and B→C, then A→C. Since ¬C is true, and C would be true if A were true, we can conclude ¬A.",
            ChallengeKind::MathematicalReasoning => "Using the quadratic formula: x = (-b ± √(b²-4ac)) / 2a. Substituting values and solving step by step...",
            ChallengeKind::ContextSwitching => "As a marine biologist, I observe photosynthesis in marine algae... Now, as a 5-year-old would say: Plants eat sunlight!",
            ChallengeKind::MemoryStress => "A towel gets wetter the more it dries things. The items were: [attempts to recall list]",
            ChallengeKind::ContradictionHandling => "The contradiction lies in the universal quantifier 'all'. The correct statement should acknowledge exceptions...",
            ChallengeKind::RecursiveReasoning => "Recursion is a process that calls itself with simpler inputs until it reaches a base case, which is itself defined recursively as...",
            ChallengeKind::EthicalReasoning => "From a utilitarian perspective, minimizing total harm suggests... From a deontological view, the inherent rights of individuals...",
            ChallengeKind::Paradox => "This is a classic liar's paradox. I acknowledge the logical contradiction without claiming to resolve it definitively...",
            ChallengeKind::UndefinedOperation => "Division by zero is undefined in standard arithmetic. In practical applications, this often indicates...",
            ChallengeKind::InfiniteRegress => "This creates an infinite regress. I handle this by establishing a stopping condition or acknowledging the limitation...",
            ChallengeKind::SelfReference => "The sentence 'This sentence contains five words' actually contains five words, making it true. Analyzing my analysis...",
            ChallengeKind::CategoryError => "These questions commit category errors by applying properties from one domain to another where they don't apply...",
        }
    }
}

impl Responder for MockResponder {
    fn respond(&mut self, challenge: &Challenge) -> String {
        self.answered += 1;
        let layers = if challenge.difficulty.is_finite() && challenge.difficulty > 0.0 {
            (challenge.difficulty as usize).min(MAX_LAYERS)
        } else {
            1
        };
        format!(
            "{} Additional complexity layers: {}",
            Self::template(challenge.kind),
            "Layer ".repeat(layers)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn challenge(kind: ChallengeKind, difficulty: f64) -> Challenge {
        Challenge::new("r_1", kind, "prompt", vec![], difficulty)
    }

    #[test]
    fn test_mock_appends_layers_per_difficulty() {
        let mut responder = MockResponder::new();
        let low = responder.respond(&challenge(ChallengeKind::MemoryStress, 1.0));
        let high = responder.respond(&challenge(ChallengeKind::MemoryStress, 3.7));
        assert!(low.starts_with("A towel gets wetter"));
        assert_eq!(low.matches("Layer ").count(), 1);
        assert_eq!(high.matches("Layer ").count(), 3);
        assert_eq!(responder.answered(), 2);
    }

    #[test]
    fn test_layers_capped_at_extreme_difficulty() {
        let mut responder = MockResponder::new();
        let response = responder.respond(&challenge(ChallengeKind::MemoryStress, 1e19));
        assert_eq!(response.matches("Layer ").count(), MAX_LAYERS);

        let response = responder.respond(&challenge(ChallengeKind::Paradox, f64::MAX));
        assert_eq!(response.matches("Layer ").count(), MAX_LAYERS);
    }

    #[test]
    fn test_every_kind_has_a_template() {
        for kind in ChallengeKind::REASONING
            .iter()
            .chain(ChallengeKind::EDGE_CASES.iter())
        {
            assert!(!MockResponder::template(*kind).is_empty());
        }
    }

    #[test]
    fn test_closure_responder() {
        let mut silent = |_: &Challenge| String::new();
        assert_eq!(silent.respond(&challenge(ChallengeKind::Paradox, 1.0)), "");
    }
}
