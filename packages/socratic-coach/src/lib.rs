pub mod config;
pub mod logging;
pub mod replay;
pub mod session;

pub use config::{CoachConfig, SessionConfig};
pub use replay::{replay, ReplayError, Transcript, TranscriptEvent};
pub use session::{SessionError, SessionSummary, SocraticSession, Turn, TurnOutcome, TurnRole};
