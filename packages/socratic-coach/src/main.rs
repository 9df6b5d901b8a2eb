use std::path::PathBuf;
use std::process::ExitCode;

use socratic_coach::config::CoachConfig;
use socratic_coach::logging::init_tracing;
use socratic_coach::replay::{replay, Transcript};

fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let config = CoachConfig::from_env();
    let _log_guard = init_tracing(&config);

    let path = match std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| config.transcript_path.clone())
    {
        Some(path) => path,
        None => {
            tracing::error!("no transcript given; pass a path or set TRANSCRIPT_PATH");
            return ExitCode::FAILURE;
        }
    };

    let transcript = match Transcript::load(&path) {
        Ok(transcript) => transcript,
        Err(e) => {
            tracing::error!(error = %e, path = %path.display(), "failed to load transcript");
            return ExitCode::FAILURE;
        }
    };

    let session = match replay(&transcript, &config.session) {
        Ok(session) => session,
        Err(e) => {
            tracing::error!(error = %e, "replay failed");
            return ExitCode::FAILURE;
        }
    };

    match serde_json::to_string_pretty(&session.summary()) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to encode summary");
            ExitCode::FAILURE
        }
    }
}
