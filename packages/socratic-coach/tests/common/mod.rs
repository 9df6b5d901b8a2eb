#![allow(dead_code)]

use socratic_coach::{SessionConfig, SocraticSession, TurnOutcome};

pub fn start_session(config: &SessionConfig) -> SocraticSession {
    SocraticSession::start("Supply and Demand", "Explain price equilibrium", config)
        .expect("session should start")
}

/// Answer the pending question and evaluate it with `score`.
pub fn answer(session: &mut SocraticSession, score: f64) -> TurnOutcome {
    session.student_says("student answer").expect("waiting for answer");
    session.evaluate(Some(score), None).expect("evaluating answer")
}

pub fn transcript_json(scores: &[&str]) -> String {
    let mut events = vec![r#"{"type": "coach", "content": "Opening question"}"#.to_string()];
    for (i, score) in scores.iter().enumerate() {
        if i > 0 {
            events.push(format!(r#"{{"type": "coach", "content": "Follow-up {i}"}}"#));
        }
        events.push(format!(r#"{{"type": "student", "content": "Answer {i}"}}"#));
        events.push(format!(r#"{{"type": "evaluation", "score": {score}}}"#));
    }
    format!(
        r#"{{"topic": "Supply and Demand", "objective": "equilibrium", "events": [{}]}}"#,
        events.join(",")
    )
}
