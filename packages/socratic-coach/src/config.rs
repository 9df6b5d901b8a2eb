use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use socratic_algo::DEFAULT_MAX_NUDGES;

const DEFAULT_MAX_QUESTIONS: u32 = 5;
const DEFAULT_LOG_DIR: &str = "./logs";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SessionConfig {
    /// Hints allowed per question before the dialogue moves on
    pub max_nudges: u32,
    /// Questions per session, always at least one
    pub max_questions: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_nudges: DEFAULT_MAX_NUDGES,
            max_questions: DEFAULT_MAX_QUESTIONS,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CoachConfig {
    pub log_level: String,
    /// Also write daily rolling log files
    pub file_logs: bool,
    pub log_dir: PathBuf,
    pub session: SessionConfig,
    pub transcript_path: Option<PathBuf>,
}

impl CoachConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key lookup; unset or invalid values fall
    /// back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let max_nudges = lookup("SOCRATIC_MAX_NUDGES")
            .and_then(|value| value.trim().parse::<u32>().ok())
            .unwrap_or(DEFAULT_MAX_NUDGES);

        let max_questions = lookup("SOCRATIC_MAX_QUESTIONS")
            .and_then(|value| value.trim().parse::<u32>().ok())
            .unwrap_or(DEFAULT_MAX_QUESTIONS)
            .max(1);

        let log_level = lookup("RUST_LOG").unwrap_or_else(|| "info".to_string());

        let file_logs = lookup("ENABLE_FILE_LOGS")
            .map(|v| parse_flag(&v))
            .unwrap_or(false);

        let log_dir = lookup("LOG_DIR")
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_DIR));

        let transcript_path = lookup("TRANSCRIPT_PATH")
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        Self {
            log_level,
            file_logs,
            log_dir,
            session: SessionConfig {
                max_nudges,
                max_questions,
            },
            transcript_path,
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim(), "true" | "1")
}
