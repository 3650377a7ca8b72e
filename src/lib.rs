// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod fs;
pub mod logging;
pub mod shutdown;
pub mod site;
pub mod subscription;
pub mod types;
pub mod watch;

use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;

use crate::cli::CliArgs;
use crate::config::{
    load_site_config, resolve_watch_config, validate_build_cmd, validate_watch_config,
    WatchConfig,
};
use crate::fs::{FileSystem, RealFileSystem};
use crate::logging::Diagnostics;
use crate::shutdown::ShutdownSignal;
use crate::site::{CommandSite, Site};
use crate::subscription::{NotifySubscriber, Subscriber};
use crate::watch::{dispatch, WatchLifecycle, WatchOutcome};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - site config loading and CLI merging
/// - an initial build
/// - the watch session (notify subscription + rebuild handler)
/// - Ctrl-C handling
///
/// Returns once the session has been interrupted and torn down.
pub async fn run(args: CliArgs) -> Result<()> {
    let diagnostics = Diagnostics::new(args.verbose, args.trace);

    let source_hint = args.source.clone().unwrap_or_else(|| ".".into());
    let site_config = load_site_config(&source_hint, args.config.as_deref())?;
    let config = resolve_watch_config(&args, &site_config)?;
    validate_watch_config(&config)?;

    let build_cmd = validate_build_cmd(args.build_cmd.as_deref(), site_config.build_cmd.as_deref())?;
    let site: Box<dyn Site> = Box::new(CommandSite::new(
        config.source.clone(),
        site_config,
        build_cmd,
    ));

    // Listen before building so an early Ctrl-C still exits cleanly.
    let signal = ShutdownSignal::ctrl_c().await;

    let outcome = build_and_watch(
        config,
        site,
        diagnostics,
        &RealFileSystem,
        &NotifySubscriber::default(),
        signal,
    )
    .await?;

    match outcome {
        WatchOutcome::Halted => Ok(()),
        // The CLI never sets `serving`; a host embedding the library does.
        WatchOutcome::Serving(mut session) => {
            session.stop();
            Ok(())
        }
    }
}

/// Run the initial build, then watch until `signal` fires.
///
/// The build runs on a blocking worker while `signal` keeps listening. If
/// shutdown was requested during the build, nothing is subscribed and the
/// session halts straight away.
pub async fn build_and_watch(
    config: WatchConfig,
    site: Box<dyn Site>,
    diagnostics: Diagnostics,
    fs: &dyn FileSystem,
    subscriber: &dyn Subscriber,
    signal: ShutdownSignal,
) -> Result<WatchOutcome> {
    info!(target: "sitewatch::build", "Source: {}", config.source.display());
    info!(target: "sitewatch::build", "Destination: {}", config.destination.display());
    info!(target: "sitewatch::build", "Generating...");

    let site = tokio::task::spawn_blocking(move || {
        let mut site = site;
        dispatch(site.as_mut(), Instant::now(), &diagnostics);
        site
    })
    .await
    .context("initial build did not return")?;

    if signal.is_triggered() {
        info!(target: "sitewatch::watcher", "Interrupted during the initial build; not watching.");
        return Ok(WatchOutcome::Halted);
    }

    let lifecycle = WatchLifecycle::new(config, diagnostics);
    let outcome = lifecycle
        .watch(site, fs, subscriber, move || signal)
        .await?;
    Ok(outcome)
}
