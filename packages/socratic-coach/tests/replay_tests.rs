mod common;

use std::io::Write;

use common::transcript_json;
use socratic_algo::DialogueState;
use socratic_coach::{replay, ReplayError, SessionConfig, Transcript};

#[test]
fn replay_transcript_reaches_mastery() {
    let transcript = Transcript::from_json_str(&transcript_json(&["3", "3", "\"3\""])).unwrap();
    let session = replay(&transcript, &SessionConfig::default()).unwrap();
    let summary = session.summary();
    assert_eq!(summary.state, DialogueState::Completed);
    assert!(summary.mastered);
    assert_eq!(summary.turn_count, 6);
}

#[test]
fn replay_loads_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(transcript_json(&["3"]).as_bytes()).unwrap();

    let transcript = Transcript::load(file.path()).unwrap();
    assert_eq!(transcript.topic, "Supply and Demand");

    let session = replay(&transcript, &SessionConfig::default()).unwrap();
    assert_eq!(session.state(), DialogueState::Next);
    assert_eq!(session.score_history().len(), 1);
}

#[test]
fn replay_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Transcript::load(dir.path().join("missing.json")).unwrap_err();
    assert!(matches!(err, ReplayError::Io(_)));
}

#[test]
fn replay_empty_topic_rejected() {
    let transcript = Transcript::from_json_str(r#"{"topic": " ", "events": []}"#).unwrap();
    let err = replay(&transcript, &SessionConfig::default()).unwrap_err();
    assert!(matches!(err, ReplayError::Start(_)));
}

#[test]
fn replay_events_after_completion_rejected() {
    let transcript = Transcript::from_json_str(
        r#"{"topic": "t", "events": [
            {"type": "complete", "reason": "stop"},
            {"type": "coach", "content": "Q"}
        ]}"#,
    )
    .unwrap();
    let err = replay(&transcript, &SessionConfig::default()).unwrap_err();
    assert!(matches!(err, ReplayError::Event { index: 1, .. }));
}
