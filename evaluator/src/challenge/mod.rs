//! Challenges and the sources that produce them
//!
//! A [`ChallengeSource`] is asked for one challenge per trial at the
//! evaluator's current complexity level. The built-in
//! [`CatalogChallengeSource`] mixes escalating reasoning templates with a
//! fixed set of edge cases, driven by a seedable RNG so runs are repeatable.

pub mod source;
pub mod types;

pub use source::{CatalogChallengeSource, ChallengeSource};
pub use types::{Challenge, ChallengeKind};
