//! Integration tests for the Escalation Evaluator
//!
//! Drives the evaluator through the public API with the catalog source and
//! scripted responders, checking the counting, eviction, escalation and
//! halting guarantees end to end.

use evaluator::{
    CatalogChallengeSource, Challenge, ChallengeKind, EscalationEvaluator, EvaluatorConfig,
    EvaluatorError, MockResponder, RunStatus, SessionExport,
};

/// Scores well on every heuristic for logical-reasoning challenges
const STRONG: &str = "Using modus tollens we conclude A is false, because C is false. Therefore the chain breaks and A cannot hold either way.";

fn logic_source() -> impl FnMut(f64) -> Challenge {
    let mut n = 0;
    move |level| {
        n += 1;
        Challenge::new(
            format!("it_{}", n),
            ChallengeKind::LogicalReasoning,
            "If A implies B, and B implies C, and NOT C, what about A?",
            vec!["modus tollens".to_string(), "false".to_string()],
            level,
        )
    }
}

/// Responder that replays a fixed script, answering good/bad per entry
fn scripted(script: Vec<bool>) -> impl FnMut(&Challenge) -> String {
    let mut idx = 0;
    move |_| {
        let good = script.get(idx).copied().unwrap_or(true);
        idx += 1;
        if good {
            STRONG.to_string()
        } else {
            String::new()
        }
    }
}

fn config(capacity: usize, factor: f64) -> EvaluatorConfig {
    EvaluatorConfig {
        history_capacity: capacity,
        escalation_factor: factor,
        initial_complexity: 1.0,
        ..Default::default()
    }
}

/// Test: capacity 3, factor 2.0 - after 4 trials complexity is 16 and only
/// trials 2..=4 remain
#[test]
fn test_capacity_three_doubling_example() {
    let mut evaluator = EscalationEvaluator::with_config(config(3, 2.0)).unwrap();
    let mut source = logic_source();
    let mut responder = scripted(vec![true; 4]);

    for _ in 0..4 {
        evaluator.run_trial(&mut source, &mut responder).unwrap();
    }

    assert!((evaluator.state().complexity_level - 16.0).abs() < 1e-9);
    let kept: Vec<u64> = evaluator.history().iter().map(|r| r.iteration).collect();
    assert_eq!(kept, vec![2, 3, 4]);
    assert_eq!(evaluator.state().total_trials, 4);
}

/// Test: complexity after k trials equals c0 * f^k
#[test]
fn test_complexity_follows_geometric_growth() {
    let factor = 1.3;
    let mut evaluator = EscalationEvaluator::with_config(config(1000, factor)).unwrap();
    let mut source = CatalogChallengeSource::seeded("geo", 0.3, 5);
    let mut responder = MockResponder::new();

    for k in 1..=25 {
        evaluator.run_trial(&mut source, &mut responder).unwrap();
        let expected = factor.powi(k);
        let actual = evaluator.state().complexity_level;
        assert!(
            ((actual - expected) / expected).abs() < 1e-9,
            "k={}: expected {}, got {}",
            k,
            expected,
            actual
        );
    }
}

/// Test: total_trials tracks calls, error_count never exceeds it, history
/// stays within capacity and consistency stays in range
#[test]
fn test_counters_and_bounds_hold_every_trial() {
    let mut evaluator = EscalationEvaluator::with_config(config(4, 1.1)).unwrap();
    let mut source = CatalogChallengeSource::seeded("bounds", 0.5, 1234);
    let pattern: Vec<bool> = (0..30).map(|i| i % 3 != 0).collect();
    let mut responder = scripted(pattern);

    for calls in 1..=30u64 {
        let result = evaluator.run_trial(&mut source, &mut responder).unwrap();
        let state = evaluator.state();
        assert_eq!(state.total_trials, calls);
        assert_eq!(result.state, *state);
        assert!(state.error_count <= state.total_trials);
        assert!(evaluator.history().len() <= 4);
        assert!((0.0..=1.0).contains(&state.consistency_score));
    }
}

/// Test: after capacity + 1 trials the oldest record is gone
#[test]
fn test_oldest_record_evicted_after_capacity_plus_one() {
    let capacity = 5;
    let mut evaluator = EscalationEvaluator::with_config(config(capacity, 1.2)).unwrap();
    let mut source = logic_source();
    let mut responder = scripted(vec![]);

    for _ in 0..=capacity {
        evaluator.run_trial(&mut source, &mut responder).unwrap();
    }

    let history = evaluator.history();
    assert_eq!(history.len(), capacity);
    assert!(history.iter().all(|r| r.challenge.id != "it_1"));
    assert_eq!(history.latest().map(|r| r.challenge.id.as_str()), Some("it_6"));
}

/// Test: 8 failures in 10 trials trips the halt (0.8 > 0.7)
#[test]
fn test_eight_of_ten_failures_halts() {
    let mut evaluator = EscalationEvaluator::new();
    let mut source = logic_source();
    let mut script = vec![true, true];
    script.extend(std::iter::repeat(false).take(8));
    let mut responder = scripted(script);

    for _ in 0..10 {
        evaluator.run_trial(&mut source, &mut responder).unwrap();
    }

    assert_eq!(evaluator.state().error_count, 8);
    assert!(evaluator.should_halt());
}

/// Test: exactly 70% failures does not halt - the threshold is strict
#[test]
fn test_threshold_is_strict() {
    let mut evaluator = EscalationEvaluator::new();
    let mut source = logic_source();
    let mut script = vec![true; 3];
    script.extend(std::iter::repeat(false).take(7));
    let mut responder = scripted(script);

    for _ in 0..10 {
        evaluator.run_trial(&mut source, &mut responder).unwrap();
    }

    assert_eq!(evaluator.state().error_count, 7);
    assert!(!evaluator.should_halt());
}

/// Test: a fresh evaluator never asks to halt and has no statistics
#[test]
fn test_empty_evaluator() {
    let evaluator = EscalationEvaluator::new();
    assert!(!evaluator.should_halt());
    let err = evaluator.final_statistics().unwrap_err();
    assert!(matches!(err, EvaluatorError::EmptyHistory));
}

/// Test: statistics are a pure query
#[test]
fn test_final_statistics_idempotent() {
    let mut evaluator = EscalationEvaluator::new();
    let mut source = CatalogChallengeSource::seeded("idem", 0.3, 77);
    let mut responder = MockResponder::new();
    for _ in 0..12 {
        evaluator.run_trial(&mut source, &mut responder).unwrap();
    }

    let first = evaluator.final_statistics().unwrap();
    let second = evaluator.final_statistics().unwrap();
    assert_eq!(first, second);
    assert_eq!(first.score_distribution.total(), 12);
    assert_eq!(
        first.by_kind.values().map(|k| k.test_count).sum::<usize>(),
        12
    );
}

/// Test: a malformed challenge aborts the trial without touching state
#[test]
fn test_invalid_challenge_is_surfaced() {
    let mut evaluator = EscalationEvaluator::new();
    let mut good = logic_source();
    let mut responder = scripted(vec![]);
    evaluator.run_trial(&mut good, &mut responder).unwrap();

    let before_state = evaluator.state().clone();
    let before_len = evaluator.history().len();

    let mut zero_difficulty =
        |_: f64| Challenge::new("z_1", ChallengeKind::Paradox, "This statement is false.", vec![], 0.0);
    let err = evaluator
        .run_trial(&mut zero_difficulty, &mut responder)
        .unwrap_err();

    assert!(matches!(err, EvaluatorError::InvalidChallenge { .. }));
    assert!(err.leaves_state_unchanged());
    assert_eq!(evaluator.state(), &before_state);
    assert_eq!(evaluator.history().len(), before_len);
}

/// Test: full run with the mock responder is deterministic under a seed
#[test]
fn test_seeded_runs_are_reproducible() {
    let run = || {
        let mut evaluator = EscalationEvaluator::new();
        let mut source = CatalogChallengeSource::seeded("repro", 0.3, 2024);
        let mut responder = MockResponder::new();
        let mut kinds = Vec::new();
        let summary = evaluator
            .run(15, &mut source, &mut responder, |r| {
                kinds.push(r.record.challenge.kind)
            })
            .unwrap();
        (summary.status, summary.trials_run, kinds)
    };

    assert_eq!(run(), run());
}

/// Test: run stops on failure rate before the budget is spent
#[test]
fn test_run_reports_failure_halt() {
    let mut evaluator = EscalationEvaluator::new();
    let mut source = logic_source();
    let mut responder = scripted(vec![false; 20]);

    let summary = evaluator.run(20, &mut source, &mut responder, |_| {}).unwrap();
    assert_eq!(summary.status, RunStatus::HaltedByFailureRate);
    assert!(summary.trials_run < 20);
    assert_eq!(evaluator.status(), RunStatus::HaltedByFailureRate);
}

/// Test: session export survives a write/read cycle
#[test]
fn test_session_export_round_trip() {
    let mut evaluator = EscalationEvaluator::with_config(config(8, 1.2)).unwrap();
    let mut source = CatalogChallengeSource::seeded("export", 0.3, 9);
    let mut responder = MockResponder::new();
    evaluator
        .run(10, &mut source, &mut responder, |_| {})
        .unwrap();

    let temp = tempfile::TempDir::new().expect("Failed to create temp dir");
    let path = temp.path().join("session.json");

    let export = SessionExport::capture("export", &evaluator);
    export.write_to(&path).unwrap();
    let loaded = SessionExport::read_from(&path).unwrap();

    assert_eq!(loaded.session_id, "export");
    assert_eq!(loaded.status, export.status);
    assert_eq!(loaded.state.total_trials, 10);
    assert_eq!(loaded.trials.len(), 8);
    let ids: Vec<&str> = loaded.trials.iter().map(|t| t.challenge.id.as_str()).collect();
    let expected: Vec<&str> = export.trials.iter().map(|t| t.challenge.id.as_str()).collect();
    assert_eq!(ids, expected);
    assert!(loaded.statistics.is_some());
}

/// Composite of `STRONG` against `logic_source`: (1 + 1 + 0.4 + (1 - 4/30)) / 4
const STRONG_COMPOSITE: f64 = 49.0 / 60.0;
/// Composite of an empty response: (0 + 1 + 0 + 0.1) / 4
const EMPTY_COMPOSITE: f64 = 0.275;

fn consistency_after(script: Vec<bool>) -> (EscalationEvaluator, f64) {
    let trials = script.len();
    let mut evaluator = EscalationEvaluator::with_config(config(1000, 1.2)).unwrap();
    let mut source = logic_source();
    let mut responder = scripted(script);
    for _ in 0..trials {
        evaluator.run_trial(&mut source, &mut responder).unwrap();
    }
    let consistency = evaluator.state().consistency_score;
    (evaluator, consistency)
}

/// Test: consistency is 1 - 2 * population variance of the last five composites
#[test]
fn test_consistency_matches_windowed_variance() {
    let (evaluator, consistency) =
        consistency_after(vec![true, false, true, false, true, false, true]);

    let composites: Vec<f64> = evaluator
        .history()
        .iter()
        .map(|r| r.evaluation.composite_score)
        .collect();
    assert!((composites[0] - STRONG_COMPOSITE).abs() < 1e-12);
    assert!((composites[1] - EMPTY_COMPOSITE).abs() < 1e-12);

    // Window G B G B G: mean 0.6, variance 253.5 / 3600
    assert!((consistency - 3093.0 / 3600.0).abs() < 1e-9);
}

/// Test: trials older than the window do not affect consistency
#[test]
fn test_consistency_ignores_trials_outside_window() {
    let (_, alternating) = consistency_after(vec![true, false, true, false, true, false, true]);
    let (_, bad_start) = consistency_after(vec![false, false, true, false, true, false, true]);
    let (_, good_start) = consistency_after(vec![true, true, true, false, true, false, true]);

    assert_eq!(alternating, bad_start);
    assert_eq!(alternating, good_start);
}

/// Test: two records use both; a uniform window is perfectly consistent
#[test]
fn test_consistency_small_and_uniform_windows() {
    let (_, two) = consistency_after(vec![true, false]);
    let half_gap = (STRONG_COMPOSITE - EMPTY_COMPOSITE) / 2.0;
    assert!((two - (1.0 - 2.0 * half_gap * half_gap)).abs() < 1e-9);

    let (_, uniform) = consistency_after(vec![false, true, true, true, true, true]);
    assert!((uniform - 1.0).abs() < 1e-12);
}
