//! Drive a session from a recorded transcript.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::config::SessionConfig;
use crate::session::{SessionError, SocraticSession};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TranscriptEvent {
    Coach {
        content: String,
    },
    Student {
        content: String,
    },
    Evaluation {
        #[serde(default)]
        score: Value,
        #[serde(default)]
        misconception: Option<String>,
    },
    Complete {
        reason: String,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    pub topic: String,
    #[serde(default)]
    pub objective: String,
    pub events: Vec<TranscriptEvent>,
}

impl Transcript {
    pub fn from_json_str(raw: &str) -> Result<Self, ReplayError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ReplayError> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&raw)
    }
}

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid transcript: {0}")]
    Json(#[from] serde_json::Error),
    #[error("session error: {0}")]
    Start(SessionError),
    #[error("event {index} rejected: {source}")]
    Event {
        index: usize,
        #[source]
        source: SessionError,
    },
}

/// Replay every event against a fresh session.
pub fn replay(
    transcript: &Transcript,
    config: &SessionConfig,
) -> Result<SocraticSession, ReplayError> {
    let mut session = SocraticSession::start(
        transcript.topic.as_str(),
        transcript.objective.as_str(),
        config,
    )
    .map_err(ReplayError::Start)?;

    for (index, event) in transcript.events.iter().enumerate() {
        let result = match event {
            TranscriptEvent::Coach { content } => session.coach_says(content.as_str()).map(|_| ()),
            TranscriptEvent::Student { content } => {
                session.student_says(content.as_str()).map(|_| ())
            }
            TranscriptEvent::Evaluation {
                score,
                misconception,
            } => session
                .evaluate_value(score, misconception.clone())
                .map(|_| ()),
            TranscriptEvent::Complete { reason } => session.complete(reason.as_str()),
        };
        result.map_err(|source| ReplayError::Event { index, source })?;
    }

    tracing::debug!(
        session_id = %session.id(),
        events = transcript.events.len(),
        state = %session.state(),
        "transcript replayed"
    );

    Ok(session)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tagged_events() {
        let transcript = Transcript::from_json_str(
            r#"{
                "topic": "Gravity",
                "events": [
                    {"type": "coach", "content": "Why do things fall?"},
                    {"type": "student", "content": "Mass attracts mass"},
                    {"type": "evaluation", "score": "3"},
                    {"type": "complete", "reason": "done"}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(transcript.objective, "");
        assert_eq!(transcript.events.len(), 4);
        assert!(matches!(
            transcript.events[2],
            TranscriptEvent::Evaluation { misconception: None, .. }
        ));
    }

    #[test]
    fn test_evaluation_without_score_is_null() {
        let transcript = Transcript::from_json_str(
            r#"{"topic": "t", "events": [{"type": "evaluation"}]}"#,
        )
        .unwrap();
        match &transcript.events[0] {
            TranscriptEvent::Evaluation { score, .. } => assert!(score.is_null()),
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn test_unknown_event_type_rejected() {
        let err = Transcript::from_json_str(
            r#"{"topic": "t", "events": [{"type": "shout", "content": "!"}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ReplayError::Json(_)));
    }

    #[test]
    fn test_out_of_order_event_reports_index() {
        let transcript = Transcript::from_json_str(
            r#"{"topic": "t", "events": [
                {"type": "coach", "content": "Q"},
                {"type": "evaluation", "score": 3}
            ]}"#,
        )
        .unwrap();
        let err = replay(&transcript, &SessionConfig::default()).unwrap_err();
        assert!(matches!(err, ReplayError::Event { index: 1, .. }));
    }
}
