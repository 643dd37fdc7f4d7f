//! Logging and tracing initialization.
//!
//! Console output goes to stderr in human-readable form; when a log path
//! or directory is configured, structured JSONL events are additionally
//! written through a non-blocking appender. The returned guard must stay
//! alive for the duration of the process so buffered events are flushed.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Where log files should go, resolved from environment and config.
#[derive(Debug, Clone, Default)]
pub struct ObservabilityConfig {
    /// Explicit log file path (`LESBAR_LOG_PATH`). Wins over `log_dir`.
    pub log_path: Option<PathBuf>,
    /// Log directory (`LESBAR_LOG_DIR`, or `log_dir` from config).
    pub log_dir: Option<PathBuf>,
}

impl ObservabilityConfig {
    /// Resolve from environment variables, with the config file's
    /// `log_dir` as the fallback directory.
    pub fn from_env_with_overrides(config_log_dir: Option<PathBuf>) -> Self {
        Self {
            log_path: std::env::var_os("LESBAR_LOG_PATH").map(PathBuf::from),
            log_dir: std::env::var_os("LESBAR_LOG_DIR")
                .map(PathBuf::from)
                .or(config_log_dir),
        }
    }
}

/// Build the filter from CLI verbosity flags and the configured level.
///
/// `RUST_LOG` wins when set; otherwise `-q` forces `error`, `-v` maps to
/// `debug`, `-vv` and beyond to `trace`, and the config level applies
/// when no flag is given.
pub fn env_filter(quiet: bool, verbose: u8, config_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(directive(quiet, verbose, config_level)))
}

/// Map CLI flags and the configured level to a filter directive.
fn directive<'a>(quiet: bool, verbose: u8, config_level: &'a str) -> &'a str {
    if quiet {
        "error"
    } else {
        match verbose {
            0 => config_level,
            1 => "debug",
            _ => "trace",
        }
    }
}

/// Install the global tracing subscriber.
///
/// Returns the appender guard when file logging is active; dropping it
/// flushes and stops the background writer.
pub fn init_observability(
    config: &ObservabilityConfig,
    filter: EnvFilter,
) -> anyhow::Result<Option<WorkerGuard>> {
    let console = fmt::layer().with_writer(std::io::stderr).with_target(false);

    let appender = file_appender(config)?;

    if let Some(appender) = appender {
        let (writer, guard) = tracing_appender::non_blocking(appender);
        let file = fmt::layer().json().with_writer(writer);

        tracing_subscriber::registry()
            .with(filter)
            .with(console)
            .with(file)
            .try_init()
            .context("failed to set global tracing subscriber")?;
        Ok(Some(guard))
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(console)
            .try_init()
            .context("failed to set global tracing subscriber")?;
        Ok(None)
    }
}

/// Build the rolling file appender, creating directories as needed.
fn file_appender(
    config: &ObservabilityConfig,
) -> anyhow::Result<Option<tracing_appender::rolling::RollingFileAppender>> {
    if let Some(ref path) = config.log_path {
        let dir = path.parent().unwrap_or_else(|| Path::new("."));
        let file_name = path
            .file_name()
            .context("LESBAR_LOG_PATH has no file name")?;
        ensure_dir(dir)?;
        return Ok(Some(tracing_appender::rolling::never(dir, file_name)));
    }

    if let Some(ref dir) = config.log_dir {
        ensure_dir(dir)?;
        return Ok(Some(tracing_appender::rolling::daily(dir, "lesbar.jsonl")));
    }

    Ok(None)
}

fn ensure_dir(dir: &Path) -> anyhow::Result<()> {
    if !dir.as_os_str().is_empty() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create log directory {}", dir.display()))?;
    }
    Ok(())
}
