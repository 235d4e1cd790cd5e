//! Console rendering for trial progress and final results

use evaluator::{RunStatus, RunSummary, ScoreBucket, Statistics, TrialResult};

const RULE_WIDTH: usize = 80;
const PROMPT_PREVIEW_CHARS: usize = 100;

pub fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

/// Header printed before the first trial
pub fn banner(session_id: &str, iterations: u64, escalation_factor: f64) -> String {
    format!(
        "🧠 Stress Test Session {}\n📊 Running {} iterations with {}x difficulty escalation\n{}",
        session_id,
        iterations,
        escalation_factor,
        rule()
    )
}

/// Block printed after each trial
pub fn trial_block(result: &TrialResult) -> String {
    let challenge = &result.record.challenge;
    let score = result.composite_score();
    let mut out = format!(
        "\n🔬 TEST {:2} │ {}\n   Difficulty: {:.2}\n   Score: {:.3}\n   System Consistency: {:.3}\n   Error Rate: {:.2}%\n   Challenge: {}",
        result.iteration(),
        challenge.kind.as_str().to_uppercase(),
        challenge.difficulty,
        score,
        result.state.consistency_score,
        result.state.error_rate() * 100.0,
        preview(&challenge.prompt, PROMPT_PREVIEW_CHARS),
    );

    match ScoreBucket::from_score(score) {
        ScoreBucket::Poor => out.push_str("\n   ⚠️  LOW PERFORMANCE DETECTED"),
        ScoreBucket::Excellent => out.push_str("\n   ✅ EXCELLENT PERFORMANCE"),
        _ => {}
    }
    out
}

/// Closing block for a finished run
pub fn final_block(summary: &RunSummary, statistics: Option<&Statistics>) -> String {
    let mut out = String::new();
    match summary.status {
        RunStatus::HaltedByFailureRate => {
            out.push_str(&format!(
                "\n🚨 Critical failure rate exceeded after {} trials (error rate {:.2}%)\n",
                summary.trials_run,
                summary.state.error_rate() * 100.0
            ));
        }
        _ => out.push_str("\n🏁 TEST COMPLETED SUCCESSFULLY\n"),
    }

    match statistics {
        Some(stats) => {
            out.push('\n');
            out.push_str(&stats.format_report());
        }
        None => out.push_str("\nNo trials recorded.\n"),
    }
    out.push_str(&rule());
    out
}

/// First `max` characters of `text`, with an ellipsis when cut
fn preview(text: &str, max: usize) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(max).collect();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}
