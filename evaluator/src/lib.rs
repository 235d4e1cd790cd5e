//! Escalating stress-test evaluator
//!
//! Runs a sequence of trials against a black-box responder at steadily
//! increasing difficulty:
//!
//! ```text
//! ChallengeSource ──(complexity)──▶ Challenge
//!                                      │
//!                                      ▼
//!                                  Responder ──▶ response text
//!                                      │
//!                                      ▼
//!                        scoring::evaluate (4 heuristics → composite)
//!                                      │
//!                                      ▼
//!     TrialHistory (bounded) + EvaluatorState (errors, consistency)
//!                                      │
//!                                      ▼
//!              complexity *= escalation_factor, should_halt()?
//! ```
//!
//! The run ends when the iteration budget is spent or the error rate
//! exceeds the failure threshold. Everything is synchronous and
//! single-threaded; an evaluator is owned by one caller.
//!
//! # Usage
//!
//! ```no_run
//! use evaluator::{CatalogChallengeSource, EscalationEvaluator, MockResponder};
//!
//! let mut evaluator = EscalationEvaluator::new();
//! let mut source = CatalogChallengeSource::seeded("demo", 0.3, 7);
//! let mut responder = MockResponder::new();
//! let summary = evaluator
//!     .run(15, &mut source, &mut responder, |r| println!("{:.3}", r.composite_score()))
//!     .unwrap();
//! println!("{}", summary.status);
//! ```

pub mod challenge;
pub mod config;
pub mod engine;
pub mod error;
pub mod export;
pub mod history;
pub mod responder;
pub mod scoring;
pub mod state;
pub mod statistics;

pub use challenge::{CatalogChallengeSource, Challenge, ChallengeKind, ChallengeSource};
pub use config::EvaluatorConfig;
pub use engine::{EscalationEvaluator, RunSummary};
pub use error::{EvaluatorError, EvaluatorResult};
pub use export::SessionExport;
pub use history::TrialHistory;
pub use responder::{MockResponder, Responder};
pub use scoring::Evaluation;
pub use state::{EvaluatorState, RunStatus, TrialRecord, TrialResult};
pub use statistics::{KindPerformance, ScoreBucket, ScoreDistribution, Statistics};

/// Generate a fresh session identifier
pub fn new_session_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}
