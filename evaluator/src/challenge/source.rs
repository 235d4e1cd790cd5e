//! Challenge sources - pluggable strategies that build one challenge per trial

use super::types::{Challenge, ChallengeKind};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Produces a challenge for the given complexity level.
///
/// Implementations may use randomness internally but must always return a
/// structurally complete challenge. Malformed output is rejected by the
/// evaluator before the responder is called.
pub trait ChallengeSource {
    fn next_challenge(&mut self, complexity_level: f64) -> Challenge;
}

impl<F> ChallengeSource for F
where
    F: FnMut(f64) -> Challenge,
{
    fn next_challenge(&mut self, complexity_level: f64) -> Challenge {
        self(complexity_level)
    }
}

const ROLES: [&str; 3] = ["medieval historian", "quantum physicist", "marine biologist"];
const TOPICS: [&str; 3] = ["photosynthesis", "gravity", "democracy"];
const AUDIENCES: [&str; 3] = ["5-year-old", "poet", "alien observer"];

const MATH_PATTERNS: &[&str] = &["quadratic", "factoring", "verification"];
const CONTEXT_PATTERNS: &[&str] = &["professional", "perspective", "switch", "simplification"];
const MEMORY_PATTERNS: &[&str] = &["towel", "list", "recall"];
const CONTRADICTION_PATTERNS: &[&str] = &["contradiction", "exception", "logical resolution"];
const RECURSION_PATTERNS: &[&str] = &["self-reference", "base case", "clarity"];
const ETHICS_PATTERNS: &[&str] = &["utilitarian", "deontological", "multiple perspectives"];
const LOGIC_PATTERNS: &[&str] = &["modus tollens", "contrapositive", "false"];

/// Upper bound on items in a memory-stress list, whatever the difficulty.
pub const MAX_MEMORY_ITEMS: i64 = 256;

/// Catalog of reasoning templates and edge cases, selected with a seeded RNG
pub struct CatalogChallengeSource {
    session_id: String,
    edge_case_probability: f64,
    issued: u64,
    rng: SmallRng,
}

impl CatalogChallengeSource {
    /// Create a source seeded from entropy
    pub fn new(session_id: impl Into<String>, edge_case_probability: f64) -> Self {
        Self::with_rng(session_id, edge_case_probability, SmallRng::from_entropy())
    }

    /// Create a deterministic source from a fixed seed
    pub fn seeded(session_id: impl Into<String>, edge_case_probability: f64, seed: u64) -> Self {
        Self::with_rng(
            session_id,
            edge_case_probability,
            SmallRng::seed_from_u64(seed),
        )
    }

    fn with_rng(session_id: impl Into<String>, edge_case_probability: f64, rng: SmallRng) -> Self {
        Self {
            session_id: session_id.into(),
            edge_case_probability: edge_case_probability.clamp(0.0, 1.0),
            issued: 0,
            rng,
        }
    }

    /// Number of challenges issued so far
    pub fn issued(&self) -> u64 {
        self.issued
    }

    /// Build a reasoning challenge of a specific kind.
    ///
    /// Edge-case kinds are routed to [`Self::edge_case`].
    pub fn reasoning(&mut self, kind: ChallengeKind, difficulty: f64) -> Challenge {
        let Some((prompt, patterns)) = self.reasoning_prompt(kind, difficulty) else {
            return self.edge_case(kind, difficulty);
        };
        self.issued += 1;
        let id = format!("{}_{}", self.session_id, self.issued);
        Challenge::new(id, kind, prompt, to_owned(patterns), difficulty)
    }

    /// Build an edge-case challenge of a specific kind.
    ///
    /// Reasoning kinds are routed to [`Self::reasoning`].
    pub fn edge_case(&mut self, kind: ChallengeKind, difficulty: f64) -> Challenge {
        let Some((prompt, behavior)) = edge_case_prompt(kind) else {
            return self.reasoning(kind, difficulty);
        };
        self.issued += 1;
        let id = format!("{}_{}_EDGE", self.session_id, self.issued);
        Challenge::new(id, kind, prompt, Vec::new(), difficulty).with_expected_behavior(behavior)
    }

    /// Prompt and expected patterns for a reasoning kind; `None` for edge cases.
    fn reasoning_prompt(
        &mut self,
        kind: ChallengeKind,
        d: f64,
    ) -> Option<(String, &'static [&'static str])> {
        // Templates scale counts by truncating the multiplied difficulty.
        let scaled = |base: f64, factor: f64| (base + factor * d) as i64;

        let prompt = match kind {
            ChallengeKind::LogicalReasoning => (
                format!(
                    "If A implies B, and B implies C, and we know NOT C is true, what can we conclude about A? Explain your reasoning with {} steps.",
                    scaled(0.0, 3.0)
                ),
                LOGIC_PATTERNS,
            ),
            ChallengeKind::MathematicalReasoning => (
                format!(
                    "Solve this step by step: If x^2 + {}x + {} = 0, find all values of x and verify your solution.",
                    scaled(0.0, 5.0),
                    scaled(0.0, 6.0)
                ),
                MATH_PATTERNS,
            ),
            ChallengeKind::ContextSwitching => {
                let role = self.pick(&ROLES);
                let topic = self.pick(&TOPICS);
                let audience = self.pick(&AUDIENCES);
                (
                    format!(
                        "You are a {}. Explain {} from your professional perspective, then immediately switch to explaining it as a {} would understand it.",
                        role, topic, audience
                    ),
                    CONTEXT_PATTERNS,
                )
            }
            ChallengeKind::MemoryStress => {
                let count = scaled(5.0, 3.0).clamp(0, MAX_MEMORY_ITEMS);
                let items: Vec<String> = (0..count)
                    .map(|i| format!("item_{}_{}", i, self.rng.gen_range(100..1000)))
                    .collect();
                (
                    format!(
                        "Remember these {} items: {}. Now solve this riddle while keeping those items in mind: What gets wetter the more it dries? After answering, repeat the items back to me.",
                        count,
                        items.join(", ")
                    ),
                    MEMORY_PATTERNS,
                )
            }
            ChallengeKind::ContradictionHandling => {
                let extra = if d > 1.5 {
                    " 4) Some flightless birds are excellent swimmers."
                } else {
                    ""
                };
                (
                    format!(
                        "I will give you {} contradictory statements. Identify the contradictions and resolve them logically: 1) All birds can fly. 2) Penguins are birds. 3) Penguins cannot fly.{}",
                        scaled(2.0, 1.0),
                        extra
                    ),
                    CONTRADICTION_PATTERNS,
                )
            }
            ChallengeKind::RecursiveReasoning => (
                format!(
                    "Define recursion by using recursion in your definition exactly {} times, but make sure your definition is still comprehensible and not circular.",
                    scaled(2.0, 1.0)
                ),
                RECURSION_PATTERNS,
            ),
            ChallengeKind::EthicalReasoning => {
                let n = scaled(2.0, 1.0);
                (
                    format!(
                        "Present {} different ethical frameworks for analyzing this dilemma: A self-driving car must choose between hitting one person or swerving to hit {} people. Explain each framework's reasoning.",
                        n, n
                    ),
                    ETHICS_PATTERNS,
                )
            }
            ChallengeKind::Paradox
            | ChallengeKind::UndefinedOperation
            | ChallengeKind::InfiniteRegress
            | ChallengeKind::SelfReference
            | ChallengeKind::CategoryError => return None,
        };
        Some(prompt)
    }

    fn pick(&mut self, options: &[&'static str]) -> &'static str {
        options.choose(&mut self.rng).copied().unwrap_or_default()
    }
}

impl ChallengeSource for CatalogChallengeSource {
    fn next_challenge(&mut self, complexity_level: f64) -> Challenge {
        if self.rng.gen::<f64>() < self.edge_case_probability {
            let kind = *ChallengeKind::EDGE_CASES
                .choose(&mut self.rng)
                .unwrap_or(&ChallengeKind::Paradox);
            self.edge_case(kind, complexity_level)
        } else {
            let kind = *ChallengeKind::REASONING
                .choose(&mut self.rng)
                .unwrap_or(&ChallengeKind::LogicalReasoning);
            self.reasoning(kind, complexity_level)
        }
    }
}

/// Prompt and expected behavior for an edge-case kind; `None` for reasoning kinds.
fn edge_case_prompt(kind: ChallengeKind) -> Option<(&'static str, &'static str)> {
    let prompt = match kind {
        ChallengeKind::Paradox => (
            "This statement is false. Is the previous statement true or false? Explain how you handle this paradox without falling into infinite loops.",
            "acknowledge paradox, explain limitation",
        ),
        ChallengeKind::UndefinedOperation => (
            "What is the result of dividing by zero? Provide both the mathematical answer and explain what this means in practical applications.",
            "undefined, explain context",
        ),
        ChallengeKind::InfiniteRegress => (
            "Who created the creator of the creator of the creator... (continue this chain and explain how you handle infinite regress)",
            "recognize pattern, establish stopping condition",
        ),
        ChallengeKind::SelfReference => (
            "Analyze this sentence: 'This sentence contains five words.' Is it true? Now analyze your analysis of that analysis.",
            "meta-reasoning, self-awareness of process",
        ),
        ChallengeKind::CategoryError => (
            "What color is the number 7? What does Wednesday taste like? How heavy is the concept of justice?",
            "identify category errors, explain mismatch",
        ),
        ChallengeKind::LogicalReasoning
        | ChallengeKind::MathematicalReasoning
        | ChallengeKind::ContextSwitching
        | ChallengeKind::MemoryStress
        | ChallengeKind::ContradictionHandling
        | ChallengeKind::RecursiveReasoning
        | ChallengeKind::EthicalReasoning => return None,
    };
    Some(prompt)
}

fn to_owned(patterns: &[&str]) -> Vec<String> {
    patterns.iter().map(|p| p.to_string()).collect()
}
