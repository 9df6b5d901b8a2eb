//! Socratic session lifecycle.
//!
//! A session walks the dialogue state machine one turn at a time and owns
//! everything the pure transition function leaves to its caller: the score
//! history, the per-question nudge counter, question pacing and completion.

mod types;

pub use types::{SessionSummary, StateTransition, Turn, TurnOutcome, TurnRole};

use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use socratic_algo::{
    average_score, difficulty_level, has_mastered, next_state, normalize_score,
    normalize_score_value, DialogueState, EvaluationScore, TransitionInput,
};
use thiserror::Error;
use uuid::Uuid;

use crate::config::SessionConfig;

const HISTORY_LIMIT: usize = 100;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocraticSession {
    id: Uuid,
    topic: String,
    objective: String,
    state: DialogueState,
    score_history: Vec<EvaluationScore>,
    nudge_count: u32,
    total_nudges: u32,
    questions_asked: u32,
    turns: Vec<Turn>,
    transitions: Vec<StateTransition>,
    config: SessionConfig,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl SocraticSession {
    pub fn start(
        topic: impl Into<String>,
        objective: impl Into<String>,
        config: &SessionConfig,
    ) -> Result<Self, SessionError> {
        let topic = topic.into().trim().to_string();
        if topic.is_empty() {
            return Err(SessionError::EmptyTopic);
        }

        let now = Utc::now();
        let session = Self {
            id: Uuid::new_v4(),
            topic,
            objective: objective.into(),
            state: DialogueState::Ask,
            score_history: Vec::new(),
            nudge_count: 0,
            total_nudges: 0,
            questions_asked: 0,
            turns: Vec::new(),
            transitions: Vec::new(),
            config: SessionConfig {
                max_questions: config.max_questions.max(1),
                ..config.clone()
            },
            created_at: now,
            updated_at: now,
        };

        tracing::info!(session_id = %session.id, topic = %session.topic, "socratic session started");
        Ok(session)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn objective(&self) -> &str {
        &self.objective
    }

    pub fn state(&self) -> DialogueState {
        self.state
    }

    pub fn is_complete(&self) -> bool {
        self.state.is_terminal()
    }

    pub fn score_history(&self) -> &[EvaluationScore] {
        &self.score_history
    }

    /// Hints given for the current question
    pub fn nudge_count(&self) -> u32 {
        self.nudge_count
    }

    pub fn questions_asked(&self) -> u32 {
        self.questions_asked
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn transitions(&self) -> &[StateTransition] {
        &self.transitions
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Record a coach message: the opening question, a hint, or the next
    /// question. The dialogue then waits for the learner.
    pub fn coach_says(&mut self, content: impl Into<String>) -> Result<DialogueState, SessionError> {
        self.ensure_active()?;
        let reason = match self.state {
            DialogueState::Ask => "question posed",
            DialogueState::Nudge => "hint given",
            DialogueState::Next => "next question posed",
            state => {
                return Err(SessionError::InvalidAction {
                    action: "coach_says",
                    state,
                })
            }
        };

        match self.state {
            DialogueState::Ask => self.questions_asked += 1,
            DialogueState::Next => {
                self.questions_asked += 1;
                self.nudge_count = 0;
            }
            _ => {}
        }

        self.turns.push(Turn::new(TurnRole::Coach, content));
        let to = next_state(self.state, &self.transition_input(None));
        self.transition(to, reason);
        Ok(self.state)
    }

    /// Record the learner's answer; it awaits evaluation.
    pub fn student_says(&mut self, content: impl Into<String>) -> Result<DialogueState, SessionError> {
        self.ensure_active()?;
        if self.state != DialogueState::Wait {
            return Err(SessionError::InvalidAction {
                action: "student_says",
                state: self.state,
            });
        }

        self.turns.push(Turn::new(TurnRole::Student, content));
        let to = next_state(self.state, &self.transition_input(None));
        self.transition(to, "answer received");
        Ok(self.state)
    }

    /// Score the latest answer. Missing or invalid scores count as 0.
    pub fn evaluate(
        &mut self,
        raw_score: Option<f64>,
        misconception: Option<String>,
    ) -> Result<TurnOutcome, SessionError> {
        self.apply_score(normalize_score(raw_score), misconception)
    }

    /// Score the latest answer from an untyped JSON value.
    pub fn evaluate_value(
        &mut self,
        raw_score: &Value,
        misconception: Option<String>,
    ) -> Result<TurnOutcome, SessionError> {
        self.apply_score(normalize_score_value(raw_score), misconception)
    }

    /// End the session regardless of where the dialogue stands.
    pub fn complete(&mut self, reason: impl Into<String>) -> Result<(), SessionError> {
        self.ensure_active()?;
        self.transition(DialogueState::Completed, reason);
        Ok(())
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            id: self.id,
            topic: self.topic.clone(),
            state: self.state,
            average_score: average_score(&self.score_history),
            mastered: has_mastered(&self.score_history),
            difficulty: difficulty_level(&self.score_history),
            questions_asked: self.questions_asked,
            nudges_given: self.total_nudges,
            turn_count: self.turns.len(),
        }
    }

    fn apply_score(
        &mut self,
        score: EvaluationScore,
        misconception: Option<String>,
    ) -> Result<TurnOutcome, SessionError> {
        self.ensure_active()?;
        if self.state != DialogueState::Evaluate {
            return Err(SessionError::InvalidAction {
                action: "evaluate",
                state: self.state,
            });
        }

        self.score_history.push(score);
        if let Some(turn) = self
            .turns
            .iter_mut()
            .rev()
            .find(|t| t.role == TurnRole::Student)
        {
            turn.score = Some(score);
            turn.misconception = misconception;
        }

        let to = next_state(self.state, &self.transition_input(Some(score)));
        match to {
            DialogueState::Nudge => {
                self.nudge_count += 1;
                self.total_nudges += 1;
                self.transition(to, format!("score {score}, hint {}", self.nudge_count));
            }
            DialogueState::Next => {
                let reason = if score.is_max() {
                    "answer accepted"
                } else {
                    "hint budget spent"
                };
                self.transition(to, reason);

                if has_mastered(&self.score_history) {
                    self.transition(DialogueState::Completed, "topic mastered");
                } else if self.questions_asked >= self.config.max_questions {
                    self.transition(DialogueState::Completed, "question limit reached");
                }
            }
            other => self.transition(other, "evaluated"),
        }

        Ok(TurnOutcome {
            state: self.state,
            score,
            nudge_count: self.nudge_count,
            is_complete: self.is_complete(),
            average_score: average_score(&self.score_history),
        })
    }

    fn transition_input(&self, score: Option<EvaluationScore>) -> TransitionInput {
        TransitionInput {
            score: score.map(f64::from),
            nudge_count: self.nudge_count,
            max_nudges: self.config.max_nudges,
        }
    }

    fn ensure_active(&self) -> Result<(), SessionError> {
        if self.state.is_terminal() {
            return Err(SessionError::AlreadyCompleted { id: self.id });
        }
        Ok(())
    }

    fn transition(&mut self, to: DialogueState, reason: impl Into<String>) {
        let transition = StateTransition {
            from: self.state,
            to,
            reason: reason.into(),
            timestamp_ms: now_ms(),
        };

        tracing::debug!(
            session_id = %self.id,
            from = %transition.from,
            to = %transition.to,
            reason = %transition.reason,
            "dialogue transition"
        );
        if to.is_terminal() {
            tracing::info!(
                session_id = %self.id,
                reason = %transition.reason,
                average_score = average_score(&self.score_history),
                "socratic session completed"
            );
        }

        self.state = to;
        self.updated_at = Utc::now();
        self.transitions.push(transition);

        if self.transitions.len() > HISTORY_LIMIT {
            let extra = self.transitions.len() - HISTORY_LIMIT;
            self.transitions.drain(0..extra);
        }
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session topic must not be empty")]
    EmptyTopic,
    #[error("session {id} is already completed")]
    AlreadyCompleted { id: Uuid },
    #[error("cannot {action} while dialogue is in state {state}")]
    InvalidAction {
        action: &'static str,
        state: DialogueState,
    },
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
