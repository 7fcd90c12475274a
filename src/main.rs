mod error;
mod model;
mod reporter;

use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;

use model::config::{APP_NAME, AppConfig};
use model::report::Report;

const DEFAULT_FILTER: &str = "installer_version=info";

/// Where tracing output ended up.
enum LogSink {
    /// Rolling file; the guard flushes buffered lines when dropped.
    File(WorkerGuard),
    /// No writable log directory. Only errors reach stderr.
    Stderr,
}

fn main() -> ExitCode {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => return fail(&e, None),
    };

    // Held for the whole run so buffered log lines are flushed on exit.
    let sink = init_logging(&config);

    tracing::info!("installer-version starting");

    match run(&config) {
        Ok(report) => {
            println!("{report}");
            ExitCode::SUCCESS
        }
        Err(e) => fail(&e, Some(&sink)),
    }
}

fn run(config: &AppConfig) -> Result<Report> {
    let path = config.info_plist_path();
    reporter::installer_version(&path)
        .with_context(|| format!("failed to read installer version from {}", path.display()))
}

/// Print the single diagnostic line. The error is logged too, unless the log
/// itself is stderr.
fn fail(e: &anyhow::Error, sink: Option<&LogSink>) -> ExitCode {
    if let Some(LogSink::File(_)) = sink {
        tracing::error!("{e:#}");
    }
    eprintln!("installer-version error: {e:#}");
    ExitCode::FAILURE
}

/// Initialize logging to file (never stdout). Tries the data directory, then
/// the temp directory, then falls back to stderr.
fn init_logging(config: &AppConfig) -> LogSink {
    let (filter, bad_filter) = match EnvFilter::try_new(&config.logging.filter) {
        Ok(filter) => (filter, None),
        Err(err) => (EnvFilter::new(DEFAULT_FILTER), Some(err)),
    };

    let candidates = config
        .log_dir()
        .into_iter()
        .chain(Some(std::env::temp_dir().join(APP_NAME)));

    let mut skipped = Vec::new();
    for dir in candidates {
        let appender = match open_appender(&dir, config) {
            Ok(appender) => appender,
            Err(err) => {
                skipped.push(err);
                continue;
            }
        };

        let (non_blocking, guard) = tracing_appender::non_blocking(appender);
        tracing_subscriber::fmt()
            .with_writer(non_blocking)
            .with_ansi(false)
            .with_env_filter(filter)
            .init();

        if let Some(err) = bad_filter {
            tracing::warn!(
                "invalid log filter {:?}, using {DEFAULT_FILTER}: {err}",
                config.logging.filter
            );
        }
        for err in &skipped {
            tracing::warn!("log directory unavailable: {err:#}");
        }
        tracing::debug!("logging to {}", dir.display());

        return LogSink::File(guard);
    }

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_max_level(Level::ERROR)
        .init();

    LogSink::Stderr
}

fn open_appender(dir: &Path, config: &AppConfig) -> Result<RollingFileAppender> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("cannot create {}", dir.display()))?;

    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(config.logging.file_name.clone())
        .max_log_files(config.logging.max_log_files)
        .build(dir)
        .with_context(|| format!("cannot open log file in {}", dir.display()))
}
