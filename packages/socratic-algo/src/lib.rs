//! # socratic-algo - Socratic tutoring core algorithms
//!
//! Pure Rust building blocks for a guided-question tutoring dialogue:
//!
//! - **Score Normalization** - clamp raw evaluation scores into [0, 3]
//! - **Dialogue Transitions** - ASK / WAIT / EVALUATE / NUDGE / NEXT / COMPLETED
//! - **Mastery Evaluation** - recency-windowed mastery and difficulty tiers
//! - **Persona Routing** - which tutor persona answers a classified message
//!
//! ## Module layout
//!
//! - [`sanitize`] - score normalization
//! - [`dialogue`] - state transition function
//! - [`mastery`] - average, mastery and difficulty
//! - [`conductor`] - persona routing with periodic interjections
//! - [`types`] - shared types and constants
//!
//! ## Example
//!
//! ```rust
//! use socratic_algo::{next_state, normalize_score, has_mastered, DialogueState, TransitionInput};
//!
//! let input = TransitionInput::default().with_score(3.0);
//! assert_eq!(next_state(DialogueState::Evaluate, &input), DialogueState::Next);
//!
//! let history: Vec<_> = [2.0, 3.0, 3.0, 3.0].iter().map(|&s| normalize_score(Some(s))).collect();
//! assert!(has_mastered(&history));
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod sanitize;
pub mod types;
pub mod dialogue;
pub mod mastery;
pub mod conductor;

// ============================================================================
// Re-exports
// ============================================================================

pub use types::*;

pub use sanitize::{normalize_score, normalize_score_value, sanitize_history};

pub use dialogue::{next_state, next_state_tag};

pub use mastery::{
    average_across_sessions, average_score, batch_mastery_reports, difficulty_level,
    has_mastered, mastery_report,
};

pub use conductor::{Conductor, ConductorState, Intent, Persona, RoutingDecision};
