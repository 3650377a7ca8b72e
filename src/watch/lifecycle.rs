// src/watch/lifecycle.rs

//! Start, run and stop one watch session.
//!
//! ```text
//! Idle --start()--> Watching --stop()--> Stopped
//! ```
//!
//! [`WatchLifecycle::watch`] drives the whole thing: it starts the
//! subscription and then, unless the session is serving, waits for an
//! interrupt and tears the subscription down. In serving mode it returns the
//! running session to the caller instead.

use anyhow::anyhow;
use tracing::{debug, info};

use crate::config::WatchConfig;
use crate::errors::{Result, SitewatchError};
use crate::fs::FileSystem;
use crate::logging::Diagnostics;
use crate::shutdown::ShutdownSignal;
use crate::site::Site;
use crate::subscription::{SubscribeRequest, Subscriber, SubscriptionHandle};
use crate::watch::event_handler::RebuildHandler;
use crate::watch::patterns::{IgnorePatternSet, PathMatcher, WatchRootSet};
use crate::watch::theme;

const WATCHER_TARGET: &str = "sitewatch::watcher";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Idle,
    Watching,
    Stopped,
}

/// How [`WatchLifecycle::watch`] returned.
#[derive(Debug)]
pub enum WatchOutcome {
    /// Interrupted and torn down; the caller should exit successfully.
    Halted,
    /// Serving mode: the session is still running and now belongs to the
    /// caller, who must `stop()` it (or drop it) when done.
    Serving(WatchLifecycle),
}

#[derive(Debug)]
pub struct WatchLifecycle {
    config: WatchConfig,
    diagnostics: Diagnostics,
    state: LifecycleState,
    roots: WatchRootSet,
    ignore: IgnorePatternSet,
    subscription: Option<Box<dyn SubscriptionHandle>>,
}

impl WatchLifecycle {
    pub fn new(config: WatchConfig, diagnostics: Diagnostics) -> Self {
        Self {
            config,
            diagnostics,
            state: LifecycleState::Idle,
            roots: WatchRootSet::default(),
            ignore: IgnorePatternSet::default(),
            subscription: None,
        }
    }

    pub fn config(&self) -> &WatchConfig {
        &self.config
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// Roots handed to the subscriber (empty until started).
    pub fn watch_roots(&self) -> &WatchRootSet {
        &self.roots
    }

    /// Ignore patterns handed to the subscriber (empty until started).
    pub fn ignore_patterns(&self) -> &IgnorePatternSet {
        &self.ignore
    }

    /// Idle → Watching: compute roots and patterns and open the subscription.
    ///
    /// The site moves into the rebuild handler and lives as long as the
    /// subscription does.
    pub fn start(
        &mut self,
        site: Box<dyn Site>,
        fs: &dyn FileSystem,
        subscriber: &dyn Subscriber,
    ) -> Result<()> {
        if self.state != LifecycleState::Idle {
            return Err(SitewatchError::Other(anyhow!(
                "watch session cannot start from state {:?}",
                self.state
            )));
        }

        let theme_root = theme::locate(site.as_ref());
        let site_watch_dirs = site.watch_dirs();

        let matcher = PathMatcher::new(fs);
        let roots = matcher.compute_watch_roots(&self.config, &site_watch_dirs, theme_root.as_deref());
        let ignore = matcher.compute_ignore_patterns(&self.config);
        self.log_setup(&roots, &ignore);

        let request = SubscribeRequest {
            roots: roots.clone(),
            ignore: ignore.clone(),
            source: self.config.source.clone(),
            force_polling: self.config.force_polling,
        };

        let mut handler = RebuildHandler::new(self.config.source.clone(), site, self.diagnostics);
        let subscription = subscriber.subscribe(
            request,
            Box::new(move |batch| {
                handler.handle(batch);
            }),
        )?;

        info!(
            target: WATCHER_TARGET,
            "Auto-regeneration: enabled for '{}'",
            self.config.source.display()
        );

        self.roots = roots;
        self.ignore = ignore;
        self.subscription = Some(subscription);
        self.state = LifecycleState::Watching;
        Ok(())
    }

    /// → Stopped. Safe to call more than once.
    pub fn stop(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.stop();
        }
        if self.state == LifecycleState::Watching {
            info!(target: WATCHER_TARGET, "Halting auto-regeneration.");
        }
        self.state = LifecycleState::Stopped;
    }

    /// Start watching and, unless serving, block until interrupted.
    ///
    /// `interrupt` is only called outside serving mode; a serving host keeps
    /// its own signal handling.
    pub async fn watch<F>(
        mut self,
        site: Box<dyn Site>,
        fs: &dyn FileSystem,
        subscriber: &dyn Subscriber,
        interrupt: F,
    ) -> Result<WatchOutcome>
    where
        F: FnOnce() -> ShutdownSignal,
    {
        self.start(site, fs, subscriber)?;

        if self.config.serving {
            debug!(target: WATCHER_TARGET, "serving mode; returning control to the host");
            return Ok(WatchOutcome::Serving(self));
        }

        let mut signal = interrupt();
        signal.wait().await;

        self.stop();
        Ok(WatchOutcome::Halted)
    }

    fn log_setup(&self, roots: &WatchRootSet, ignore: &IgnorePatternSet) {
        let verbose = self.diagnostics.verbose || self.config.verbose;
        if self.config.force_polling {
            info!(target: WATCHER_TARGET, "forcing polling for file changes");
        }
        for root in roots.iter() {
            if verbose {
                info!(target: WATCHER_TARGET, "watching {}", root.display());
            } else {
                debug!(target: WATCHER_TARGET, "watching {}", root.display());
            }
        }
        for pattern in ignore.iter() {
            if verbose {
                info!(target: WATCHER_TARGET, "ignoring {}", pattern.prefix());
            } else {
                debug!(target: WATCHER_TARGET, "ignoring {}", pattern.prefix());
            }
        }
    }
}
