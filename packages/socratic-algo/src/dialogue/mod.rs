//! Dialogue State Transitions
//!
//! Pure mapping from the current turn state and the latest evaluation to
//! the next turn state.
//!
//! ```text
//! ASK -> WAIT -> EVALUATE -+-> NEXT  -> WAIT ...
//!                          +-> NUDGE -> WAIT ...
//! COMPLETED -> COMPLETED
//! ```
//!
//! EVALUATE is the only branching state. It moves on to NEXT when the answer
//! earned the top score or when the hint budget for the question is spent,
//! so a learner can never be nudged forever.

use crate::sanitize::normalize_score;
use crate::types::{DialogueState, TransitionInput};

/// Compute the state that follows `state`.
pub fn next_state(state: DialogueState, input: &TransitionInput) -> DialogueState {
    match state {
        DialogueState::Ask => DialogueState::Wait,
        DialogueState::Wait => DialogueState::Evaluate,
        DialogueState::Evaluate => {
            let score = normalize_score(input.score);
            if score.is_max() || input.nudge_count >= input.max_nudges {
                DialogueState::Next
            } else {
                DialogueState::Nudge
            }
        }
        DialogueState::Nudge => DialogueState::Wait,
        DialogueState::Next => DialogueState::Wait,
        DialogueState::Completed => DialogueState::Completed,
    }
}

/// Tag-level entry point for states read from storage or the wire.
///
/// An unrecognized tag resets the dialogue to ASK.
pub fn next_state_tag(tag: &str, input: &TransitionInput) -> DialogueState {
    match DialogueState::parse(tag) {
        Some(state) => next_state(state, input),
        None => {
            tracing::warn!(state = %tag, "unrecognized dialogue state, resetting to ASK");
            DialogueState::Ask
        }
    }
}
