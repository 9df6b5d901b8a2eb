use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use socratic_algo::{DialogueState, DifficultyLevel, EvaluationScore};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    Coach,
    Student,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Turn {
    pub role: TurnRole,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<EvaluationScore>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub misconception: Option<String>,
    pub at: DateTime<Utc>,
}

impl Turn {
    pub(crate) fn new(role: TurnRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            score: None,
            misconception: None,
            at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateTransition {
    pub from: DialogueState,
    pub to: DialogueState,
    pub reason: String,
    pub timestamp_ms: u64,
}

/// Result of evaluating one learner answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnOutcome {
    pub state: DialogueState,
    pub score: EvaluationScore,
    pub nudge_count: u32,
    pub is_complete: bool,
    pub average_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub id: Uuid,
    pub topic: String,
    pub state: DialogueState,
    pub average_score: f64,
    pub mastered: bool,
    pub difficulty: DifficultyLevel,
    pub questions_asked: u32,
    pub nudges_given: u32,
    pub turn_count: usize,
}
