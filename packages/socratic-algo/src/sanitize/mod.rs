//! Score Sanitization
//!
//! Every raw evaluation score passes through here before it reaches the
//! transition function or a score history.
//!
//! Functions:
//! - Numeric score normalization
//! - JSON value normalization
//! - Stored history sanitization

use serde_json::Value;

use crate::types::{EvaluationScore, MAX_SCORE, MIN_SCORE};

/// Normalize a raw score into [0, 3].
///
/// Missing, NaN and infinite input yields 0. Halves round up.
pub fn normalize_score(raw: Option<f64>) -> EvaluationScore {
    let value = match raw {
        Some(v) if v.is_finite() => v,
        _ => return EvaluationScore::ZERO,
    };

    let rounded = (value + 0.5).floor();
    let clamped = rounded.clamp(MIN_SCORE as f64, MAX_SCORE as f64);
    EvaluationScore::saturating(clamped as u8)
}

/// Normalize a score that arrived as untyped JSON.
pub fn normalize_score_value(raw: &Value) -> EvaluationScore {
    match raw {
        Value::Number(n) => normalize_score(n.as_f64()),
        Value::String(s) => normalize_score(s.trim().parse::<f64>().ok()),
        _ => EvaluationScore::ZERO,
    }
}

/// Normalize every entry of a stored history, keeping order.
pub fn sanitize_history(raw: &[f64]) -> Vec<EvaluationScore> {
    raw.iter().map(|&v| normalize_score(Some(v))).collect()
}
