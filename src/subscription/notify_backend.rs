// src/subscription/notify_backend.rs

use std::path::PathBuf;
use std::time::Duration;

use notify::{Config, Event, PollWatcher, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{timeout_at, Instant};
use tracing::{debug, error, info, warn};

use crate::errors::Result;
use crate::subscription::{
    BatchCollector, BatchHandler, SubscribeRequest, Subscriber, SubscriptionHandle,
};
use crate::watch::patterns::IgnorePatternSet;

const WATCHER_TARGET: &str = "sitewatch::watcher";

/// Subscriber backed by a cross-platform filesystem watcher (`notify`).
///
/// Must be used from inside a Tokio runtime: events are collected on an
/// async task and every batch is handled on the blocking pool.
#[derive(Debug, Clone)]
pub struct NotifySubscriber {
    /// Quiet period that closes a batch.
    pub debounce: Duration,
    /// Scan interval when polling is forced.
    pub poll_interval: Duration,
}

impl Default for NotifySubscriber {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(100),
            poll_interval: Duration::from_secs(1),
        }
    }
}

/// Keeps the underlying watcher and event loop alive.
pub struct NotifyHandle {
    watcher: Box<dyn Watcher + Send>,
    task: JoinHandle<()>,
}

impl std::fmt::Debug for NotifyHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotifyHandle").finish_non_exhaustive()
    }
}

impl SubscriptionHandle for NotifyHandle {
    fn stop(self: Box<Self>) {
        let NotifyHandle { watcher, task } = *self;
        drop(watcher);
        // A handler already on the blocking pool keeps running to completion.
        task.abort();
        debug!(target: WATCHER_TARGET, "subscription stopped");
    }
}

impl Subscriber for NotifySubscriber {
    fn subscribe(
        &self,
        request: SubscribeRequest,
        handler: BatchHandler,
    ) -> Result<Box<dyn SubscriptionHandle>> {
        // Channel from the blocking notify callback into the async world.
        let (event_tx, event_rx) = mpsc::unbounded_channel::<Event>();

        let callback = move |res: notify::Result<Event>| match res {
            Ok(event) => {
                if let Err(err) = event_tx.send(event) {
                    eprintln!("sitewatch: failed to forward notify event: {err}");
                }
            }
            Err(err) => {
                eprintln!("sitewatch: file watch error: {err}");
            }
        };

        let mut watcher: Box<dyn Watcher + Send> = if request.force_polling {
            info!(target: WATCHER_TARGET, "polling for changes every {:?}", self.poll_interval);
            Box::new(PollWatcher::new(
                callback,
                Config::default().with_poll_interval(self.poll_interval),
            )?)
        } else {
            Box::new(RecommendedWatcher::new(callback, Config::default())?)
        };

        for root in request.roots.iter() {
            if !root.is_dir() {
                warn!(target: WATCHER_TARGET, "watch root {} does not exist; skipping", root.display());
                continue;
            }
            watcher.watch(root, RecursiveMode::Recursive)?;
            debug!(target: WATCHER_TARGET, "watching {}", root.display());
        }

        let task = tokio::spawn(event_loop(
            event_rx,
            request.source,
            request.ignore,
            self.debounce,
            handler,
        ));

        Ok(Box::new(NotifyHandle { watcher, task }))
    }
}

/// Collect events into debounced batches and hand each to `handler`.
///
/// The handler runs on the blocking pool and is moved back out when it
/// finishes, so the next batch waits for the previous rebuild.
async fn event_loop(
    mut event_rx: mpsc::UnboundedReceiver<Event>,
    source: PathBuf,
    ignore: IgnorePatternSet,
    debounce: Duration,
    mut handler: BatchHandler,
) {
    while let Some(first) = event_rx.recv().await {
        let mut collector = BatchCollector::new(&source, &ignore);
        collector.push(first);

        let mut closed = false;
        let deadline = Instant::now() + debounce;
        loop {
            match timeout_at(deadline, event_rx.recv()).await {
                Ok(Some(event)) => collector.push(event),
                Ok(None) => {
                    closed = true;
                    break;
                }
                Err(_elapsed) => break,
            }
        }

        if !collector.is_empty() {
            let batch = collector.finish();
            debug!(target: WATCHER_TARGET, ?batch, "dispatching change batch");

            handler = match tokio::task::spawn_blocking(move || {
                handler(batch);
                handler
            })
            .await
            {
                Ok(handler) => handler,
                Err(err) => {
                    error!(target: WATCHER_TARGET, "rebuild handler did not return: {err}");
                    return;
                }
            };
        }

        if closed {
            break;
        }
    }
    debug!(target: WATCHER_TARGET, "watcher event loop finished");
}
