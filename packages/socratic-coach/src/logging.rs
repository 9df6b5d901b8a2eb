use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::CoachConfig;

const LOG_FILE_PREFIX: &str = "socratic-coach.log";

/// Keeps the background file writer alive; hold it until exit.
pub struct FileLogGuard {
    _guard: WorkerGuard,
}

fn session_filter(log_level: &str) -> EnvFilter {
    EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"))
}

fn open_log_dir(dir: &Path) -> Option<RollingFileAppender> {
    match std::fs::create_dir_all(dir) {
        Ok(()) => Some(RollingFileAppender::new(Rotation::DAILY, dir, LOG_FILE_PREFIX)),
        Err(err) => {
            eprintln!("failed to create log directory {}: {err}", dir.display());
            None
        }
    }
}

/// Install the global subscriber for the replay binary.
///
/// Console output goes to stderr so the session summary on stdout stays
/// machine-readable. File output is added when `config.file_logs` is set
/// and the log directory can be created.
pub fn init_tracing(config: &CoachConfig) -> Option<FileLogGuard> {
    let stderr_layer = fmt::layer().with_writer(std::io::stderr).with_target(true);
    let appender = if config.file_logs {
        open_log_dir(&config.log_dir)
    } else {
        None
    };

    let guard = match appender {
        Some(appender) => {
            let (file_writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(session_filter(&config.log_level))
                .with(stderr_layer)
                .with(fmt::layer().with_writer(file_writer).with_ansi(false).with_target(true))
                .init();
            Some(FileLogGuard { _guard: guard })
        }
        None => {
            tracing_subscriber::registry()
                .with(session_filter(&config.log_level))
                .with(stderr_layer)
                .init();
            None
        }
    };

    tracing::debug!(
        max_nudges = config.session.max_nudges,
        max_questions = config.session.max_questions,
        file_logs = guard.is_some(),
        log_dir = %config.log_dir.display(),
        "coach logging initialised"
    );

    guard
}
