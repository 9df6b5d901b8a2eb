//! Mastery Evaluation
//!
//! Derives learner signals from an append-only score history:
//! - rounded average score
//! - mastery over the most recent answers
//! - difficulty tier
//!
//! Mastery looks only at the trailing `MASTERY_WINDOW` scores. A strong
//! start followed by a miss does not count, and an early miss does not
//! block a later streak.

use rayon::prelude::*;

use crate::types::{
    DifficultyLevel, EvaluationScore, MasteryReport, ADVANCED_THRESHOLD, INTERMEDIATE_THRESHOLD,
    MASTERY_WINDOW,
};

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Mean score rounded to one decimal, 0 for an empty history.
pub fn average_score(scores: &[EvaluationScore]) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }
    let sum: u32 = scores.iter().map(|s| s.get() as u32).sum();
    round_one_decimal(sum as f64 / scores.len() as f64)
}

/// True when the last `MASTERY_WINDOW` scores are all top scores.
pub fn has_mastered(scores: &[EvaluationScore]) -> bool {
    if scores.len() < MASTERY_WINDOW {
        return false;
    }
    scores[scores.len() - MASTERY_WINDOW..]
        .iter()
        .all(|s| s.is_max())
}

/// Difficulty tier for the learner's next question.
pub fn difficulty_level(scores: &[EvaluationScore]) -> DifficultyLevel {
    let avg = average_score(scores);
    if avg >= ADVANCED_THRESHOLD {
        DifficultyLevel::Advanced
    } else if avg >= INTERMEDIATE_THRESHOLD {
        DifficultyLevel::Intermediate
    } else {
        DifficultyLevel::Basic
    }
}

pub fn mastery_report(scores: &[EvaluationScore]) -> MasteryReport {
    MasteryReport {
        average_score: average_score(scores),
        mastered: has_mastered(scores),
        difficulty: difficulty_level(scores),
        attempts: scores.len(),
    }
}

/// Compute reports for many learners in parallel. Output order matches input.
pub fn batch_mastery_reports(histories: &[Vec<EvaluationScore>]) -> Vec<MasteryReport> {
    histories
        .par_iter()
        .map(|scores| mastery_report(scores))
        .collect()
}

/// Average of per-session means across a learner's sessions.
///
/// Sessions without scores are skipped. Returns `None` when no session
/// has been scored yet.
pub fn average_across_sessions(histories: &[Vec<EvaluationScore>]) -> Option<f64> {
    let means: Vec<f64> = histories
        .iter()
        .filter(|h| !h.is_empty())
        .map(|h| {
            let sum: u32 = h.iter().map(|s| s.get() as u32).sum();
            sum as f64 / h.len() as f64
        })
        .collect();

    if means.is_empty() {
        return None;
    }
    Some(round_one_decimal(means.iter().sum::<f64>() / means.len() as f64))
}
