// src/logging.rs

//! Logging setup for `sitewatch` using `tracing` + `tracing-subscriber`.
//!
//! Priority for determining the log level:
//! 1. `--log-level` CLI flag (if provided)
//! 2. `SITEWATCH_LOG` environment variable (e.g. "info", "debug")
//! 3. `debug` when `--verbose` is set, otherwise `info`
//!
//! Logs are sent to STDERR so that build command output on stdout stays
//! readable.
//!
//! The watch core never looks at the environment itself. Everything it needs
//! to know about diagnostics is carried in a [`Diagnostics`] value that the
//! binary builds once at startup.

use anyhow::Result;
use tracing_subscriber::fmt;

use crate::cli::LogLevel;

/// Environment variable consulted for the default log level.
pub const LOG_ENV_VAR: &str = "SITEWATCH_LOG";

/// Diagnostics settings injected into the watch lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Diagnostics {
    /// Log every changed path and the resolved ignore patterns.
    pub verbose: bool,
    /// Full error traces were requested (`--trace`).
    pub trace: bool,
}

impl Diagnostics {
    pub fn new(verbose: bool, trace: bool) -> Self {
        Self { verbose, trace }
    }

    /// Second line emitted after a failed rebuild.
    pub fn failure_hint(&self) -> &'static str {
        if self.trace {
            "See the error output above for the full trace."
        } else {
            "Run with --trace for more information."
        }
    }
}

/// Initialise global logging subscriber.
///
/// Safe to call once at startup.
pub fn init_logging(cli_level: Option<LogLevel>, verbose: bool) -> Result<()> {
    let env_level = std::env::var(LOG_ENV_VAR).ok();
    let level = resolve_level(cli_level, env_level.as_deref(), verbose);

    fmt()
        .with_max_level(level)
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

/// Pick the effective level from the CLI flag, the env value and `--verbose`.
pub fn resolve_level(
    cli_level: Option<LogLevel>,
    env_level: Option<&str>,
    verbose: bool,
) -> tracing::Level {
    if let Some(lvl) = cli_level {
        return level_from_log_level(lvl);
    }
    if let Some(lvl) = env_level.and_then(parse_level_str) {
        return lvl;
    }
    if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    }
}

fn level_from_log_level(lvl: LogLevel) -> tracing::Level {
    match lvl {
        LogLevel::Error => tracing::Level::ERROR,
        LogLevel::Warn => tracing::Level::WARN,
        LogLevel::Info => tracing::Level::INFO,
        LogLevel::Debug => tracing::Level::DEBUG,
        LogLevel::Trace => tracing::Level::TRACE,
    }
}

fn parse_level_str(s: &str) -> Option<tracing::Level> {
    match s.trim().to_lowercase().as_str() {
        "error" => Some(tracing::Level::ERROR),
        "warn" | "warning" => Some(tracing::Level::WARN),
        "info" => Some(tracing::Level::INFO),
        "debug" => Some(tracing::Level::DEBUG),
        "trace" => Some(tracing::Level::TRACE),
        _ => None,
    }
}
