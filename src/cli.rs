// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Command-line arguments for `sitewatch`.
#[derive(Debug, Clone, Default, Parser)]
#[command(
    name = "sitewatch",
    version,
    about = "Rebuild a site whenever its source files change.",
    long_about = None
)]
pub struct CliArgs {
    /// Site source directory.
    ///
    /// Default: the current working directory.
    #[arg(short, long, value_name = "DIR")]
    pub source: Option<PathBuf>,

    /// Build output directory, relative to the source unless absolute.
    ///
    /// Default: `destination` from the site config, else `_site`.
    #[arg(short, long, value_name = "DIR")]
    pub destination: Option<PathBuf>,

    /// Site config file. Default: `<source>/_config.toml` if present.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Extra directory to watch (repeatable).
    #[arg(long, value_name = "DIR")]
    pub watch_dir: Vec<PathBuf>,

    /// Path that must not trigger a rebuild (repeatable).
    #[arg(long, value_name = "PATH")]
    pub exclude: Vec<PathBuf>,

    /// Shell command that renders the site.
    #[arg(long, value_name = "CMD")]
    pub build_cmd: Option<String>,

    /// Poll for changes instead of using native filesystem events.
    #[arg(long)]
    pub force_polling: bool,

    /// Print every changed path and the resolved watch setup.
    #[arg(short, long)]
    pub verbose: bool,

    /// Show full error traces for failed rebuilds.
    #[arg(long)]
    pub trace: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `SITEWATCH_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
