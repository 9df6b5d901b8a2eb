//! Persona Routing
//!
//! Chooses which tutor persona answers a learner message, given the
//! message's classified intent. Three personas share a conversation:
//!
//! - **Guide** asks Socratic questions and never gives direct answers
//! - **Expert** answers factual and platform questions directly
//! - **FunFacts** interjects every few guided turns with a related fact
//!
//! Intent classification happens upstream; only the routing policy is here.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// First interjection happens after this many guided turns
pub const INITIAL_INTERJECTION_RANGE: (u32, u32) = (4, 6);

/// Later interjections are drawn from this range
pub const INTERJECTION_RANGE: (u32, u32) = (3, 6);

pub const FUN_FACTS_MAX_TOKENS: u32 = 200;
pub const HANDOFF_MAX_TOKENS: u32 = 300;
pub const DEFAULT_MAX_TOKENS: u32 = 500;

/// Classified intent of a learner message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    SocraticGuidance,
    DirectAnswer,
    RequestForClarification,
    QueryUserData,
    PlatformQuestion,
}

impl Intent {
    /// Unknown labels fall back to `DirectAnswer`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "socratic_guidance" => Intent::SocraticGuidance,
            "request_for_clarification" => Intent::RequestForClarification,
            "query_user_data" => Intent::QueryUserData,
            "platform_question" => Intent::PlatformQuestion,
            _ => Intent::DirectAnswer,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Persona {
    Guide,
    Expert,
    FunFacts,
}

/// Per-conversation routing counters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConductorState {
    /// Guided turns since the last interjection
    pub turn_counter: u32,
    pub next_interjection_point: u32,
    pub total_guide_turns: u32,
    /// Learner messages routed so far in this conversation
    #[serde(default)]
    pub user_messages: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutingDecision {
    pub persona: Persona,
    /// Expert is briefly standing in for the Guide
    pub socratic_handoff: bool,
    /// Reply should be personalized with the learner's progress
    pub needs_student_context: bool,
    pub max_tokens: u32,
}

impl RoutingDecision {
    fn new(persona: Persona) -> Self {
        let max_tokens = match persona {
            Persona::FunFacts => FUN_FACTS_MAX_TOKENS,
            _ => DEFAULT_MAX_TOKENS,
        };
        Self {
            persona,
            socratic_handoff: false,
            needs_student_context: false,
            max_tokens,
        }
    }
}

pub struct Conductor {
    rng: ChaCha8Rng,
}

impl Default for Conductor {
    fn default() -> Self {
        Self::new()
    }
}

impl Conductor {
    pub fn new() -> Self {
        use std::time::{SystemTime, UNIX_EPOCH};
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(42);
        Self::with_seed(seed)
    }

    /// Create a conductor with a specific seed (for testing)
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Fresh counters for a new conversation.
    pub fn new_state(&mut self) -> ConductorState {
        let (lo, hi) = INITIAL_INTERJECTION_RANGE;
        ConductorState {
            turn_counter: 0,
            next_interjection_point: self.rng.gen_range(lo..=hi),
            total_guide_turns: 0,
            user_messages: 0,
        }
    }

    /// Route one message and advance the counters.
    ///
    /// An interjection takes priority over everything else and leaves the
    /// guide counters untouched apart from the reset. The first message of a
    /// conversation always asks for student context so the reply can pick up
    /// where the learner left off; the persona choice is unaffected.
    pub fn route(
        &mut self,
        intent: Intent,
        in_guided_session: bool,
        state: &mut ConductorState,
    ) -> RoutingDecision {
        let first_message = state.user_messages == 0;
        state.user_messages = state.user_messages.saturating_add(1);

        let mut decision = if in_guided_session
            && intent == Intent::SocraticGuidance
            && state.turn_counter >= state.next_interjection_point
        {
            let (lo, hi) = INTERJECTION_RANGE;
            state.turn_counter = 0;
            state.next_interjection_point = self.rng.gen_range(lo..=hi);
            RoutingDecision::new(Persona::FunFacts)
        } else if intent == Intent::RequestForClarification && in_guided_session {
            RoutingDecision {
                socratic_handoff: true,
                max_tokens: HANDOFF_MAX_TOKENS,
                ..RoutingDecision::new(Persona::Expert)
            }
        } else if matches!(intent, Intent::QueryUserData | Intent::PlatformQuestion) {
            RoutingDecision {
                needs_student_context: true,
                ..RoutingDecision::new(Persona::Expert)
            }
        } else if intent == Intent::SocraticGuidance {
            state.turn_counter = state.turn_counter.saturating_add(1);
            state.total_guide_turns = state.total_guide_turns.saturating_add(1);
            RoutingDecision::new(Persona::Guide)
        } else {
            RoutingDecision::new(Persona::Expert)
        };
        if first_message {
            decision.needs_student_context = true;
        }

        tracing::debug!(
            ?intent,
            persona = ?decision.persona,
            handoff = decision.socratic_handoff,
            first_message,
            turn_counter = state.turn_counter,
            next_interjection = state.next_interjection_point,
            "routed message"
        );

        decision
    }
}
