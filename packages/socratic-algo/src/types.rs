//! Common Types and Constants
//!
//! Shared data structures used across all tutoring modules.

use std::fmt;

use serde::{Deserialize, Serialize};

// ==================== Constants ====================

/// Lowest evaluation score
pub const MIN_SCORE: u8 = 0;

/// Highest evaluation score, a fully satisfying answer
pub const MAX_SCORE: u8 = 3;

/// Default number of hints before the dialogue moves on
pub const DEFAULT_MAX_NUDGES: u32 = 3;

/// Number of trailing scores examined for mastery
pub const MASTERY_WINDOW: usize = 3;

/// Average score at or above which the learner works at the advanced tier
pub const ADVANCED_THRESHOLD: f64 = 2.5;

/// Average score at or above which the learner works at the intermediate tier
pub const INTERMEDIATE_THRESHOLD: f64 = 1.5;

// ==================== Dialogue Types ====================

/// Position of a single tutoring turn in its lifecycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DialogueState {
    #[default]
    Ask,
    Wait,
    Evaluate,
    Nudge,
    Next,
    Completed,
}

impl DialogueState {
    pub const ALL: [DialogueState; 6] = [
        DialogueState::Ask,
        DialogueState::Wait,
        DialogueState::Evaluate,
        DialogueState::Nudge,
        DialogueState::Next,
        DialogueState::Completed,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            DialogueState::Ask => "ASK",
            DialogueState::Wait => "WAIT",
            DialogueState::Evaluate => "EVALUATE",
            DialogueState::Nudge => "NUDGE",
            DialogueState::Next => "NEXT",
            DialogueState::Completed => "COMPLETED",
        }
    }

    /// Parse a canonical tag. Tags are case-sensitive.
    pub fn parse(tag: &str) -> Option<Self> {
        match tag.trim() {
            "ASK" => Some(DialogueState::Ask),
            "WAIT" => Some(DialogueState::Wait),
            "EVALUATE" => Some(DialogueState::Evaluate),
            "NUDGE" => Some(DialogueState::Nudge),
            "NEXT" => Some(DialogueState::Next),
            "COMPLETED" => Some(DialogueState::Completed),
            _ => None,
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, DialogueState::Completed)
    }
}

impl fmt::Display for DialogueState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inputs consulted by the transition function
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TransitionInput {
    /// Raw evaluation score, normalized before use
    pub score: Option<f64>,
    /// Hints already given for the current question
    pub nudge_count: u32,
    /// Hint budget per question
    pub max_nudges: u32,
}

impl Default for TransitionInput {
    fn default() -> Self {
        Self {
            score: None,
            nudge_count: 0,
            max_nudges: DEFAULT_MAX_NUDGES,
        }
    }
}

impl TransitionInput {
    pub fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }

    pub fn with_nudges(mut self, nudge_count: u32) -> Self {
        self.nudge_count = nudge_count;
        self
    }

    pub fn with_max_nudges(mut self, max_nudges: u32) -> Self {
        self.max_nudges = max_nudges;
        self
    }
}

// ==================== Scoring Types ====================

/// Evaluation score, always within [MIN_SCORE, MAX_SCORE]
///
/// Scores come from [`normalize_score`](crate::sanitize::normalize_score) or
/// deserialization; there is no public raw constructor.
///
/// ```compile_fail
/// let _ = socratic_algo::EvaluationScore::saturating(2);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct EvaluationScore(u8);

impl EvaluationScore {
    pub const ZERO: EvaluationScore = EvaluationScore(MIN_SCORE);
    pub const MAX: EvaluationScore = EvaluationScore(MAX_SCORE);

    /// Saturates values above MAX_SCORE. Callers outside the crate go
    /// through the normalizer.
    pub(crate) const fn saturating(value: u8) -> Self {
        if value > MAX_SCORE {
            EvaluationScore(MAX_SCORE)
        } else {
            EvaluationScore(value)
        }
    }

    pub const fn get(self) -> u8 {
        self.0
    }

    pub const fn is_max(self) -> bool {
        self.0 >= MAX_SCORE
    }
}

impl From<EvaluationScore> for f64 {
    fn from(score: EvaluationScore) -> Self {
        score.0 as f64
    }
}

impl<'de> Deserialize<'de> for EvaluationScore {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = serde_json::Value::deserialize(deserializer)?;
        Ok(crate::sanitize::normalize_score_value(&raw))
    }
}

impl fmt::Display for EvaluationScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Difficulty tier derived from the score history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyLevel {
    Basic,
    Intermediate,
    Advanced,
}

impl DifficultyLevel {
    pub const fn as_str(self) -> &'static str {
        match self {
            DifficultyLevel::Basic => "basic",
            DifficultyLevel::Intermediate => "intermediate",
            DifficultyLevel::Advanced => "advanced",
        }
    }
}

/// Derived mastery signals for one score history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MasteryReport {
    /// Mean score rounded to one decimal
    pub average_score: f64,
    pub mastered: bool,
    pub difficulty: DifficultyLevel,
    /// Number of evaluated answers
    pub attempts: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dialogue_state_tags_roundtrip() {
        for state in DialogueState::ALL {
            assert_eq!(DialogueState::parse(state.as_str()), Some(state));
        }
    }

    #[test]
    fn test_dialogue_state_parse_rejects_unknown() {
        assert_eq!(DialogueState::parse("ask"), None);
        assert_eq!(DialogueState::parse("DONE"), None);
        assert_eq!(DialogueState::parse(""), None);
        assert_eq!(DialogueState::parse(" WAIT "), Some(DialogueState::Wait));
    }

    #[test]
    fn test_dialogue_state_serde_uses_tags() {
        let json = serde_json::to_string(&DialogueState::Evaluate).unwrap();
        assert_eq!(json, "\"EVALUATE\"");
        let state: DialogueState = serde_json::from_str("\"COMPLETED\"").unwrap();
        assert_eq!(state, DialogueState::Completed);
    }

    #[test]
    fn test_only_completed_is_terminal() {
        let terminal: Vec<_> = DialogueState::ALL
            .iter()
            .filter(|s| s.is_terminal())
            .collect();
        assert_eq!(terminal, vec![&DialogueState::Completed]);
    }

    #[test]
    fn test_transition_input_defaults() {
        let input = TransitionInput::default();
        assert_eq!(input.score, None);
        assert_eq!(input.nudge_count, 0);
        assert_eq!(input.max_nudges, DEFAULT_MAX_NUDGES);
    }

    #[test]
    fn test_transition_input_deserialize_partial() {
        let input: TransitionInput = serde_json::from_str(r#"{"score": 2}"#).unwrap();
        assert_eq!(input.score, Some(2.0));
        assert_eq!(input.max_nudges, DEFAULT_MAX_NUDGES);
    }

    #[test]
    fn test_evaluation_score_saturates() {
        assert_eq!(EvaluationScore::saturating(7).get(), MAX_SCORE);
        assert_eq!(EvaluationScore::saturating(2).get(), 2);
        assert!(EvaluationScore::saturating(3).is_max());
    }

    #[test]
    fn test_evaluation_score_deserialize_normalizes() {
        let scores: Vec<EvaluationScore> =
            serde_json::from_str(r#"[1, 2.6, -4, 9, null, "2"]"#).unwrap();
        let values: Vec<u8> = scores.iter().map(|s| s.get()).collect();
        assert_eq!(values, vec![1, 3, 0, 3, 0, 2]);
    }

    #[test]
    fn test_difficulty_serde_lowercase() {
        let json = serde_json::to_string(&DifficultyLevel::Intermediate).unwrap();
        assert_eq!(json, "\"intermediate\"");
    }
}
