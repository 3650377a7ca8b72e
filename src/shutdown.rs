// src/shutdown.rs

//! Interrupt handling as a cancellation token.
//!
//! Ctrl-C only flips a flag. Whoever is waiting on the [`ShutdownSignal`]
//! wakes up and performs the teardown (stop the subscription, log, return
//! from `main`), so nothing exits the process from inside a signal handler.

use tokio::sync::{oneshot, watch};
use tracing::debug;

/// Receiving side: resolves once shutdown has been requested.
#[derive(Debug, Clone)]
pub struct ShutdownSignal {
    rx: watch::Receiver<bool>,
}

/// Sending side: requests shutdown.
#[derive(Debug, Clone)]
pub struct ShutdownTrigger {
    tx: watch::Sender<bool>,
}

impl ShutdownTrigger {
    pub fn trigger(&self) {
        // No receivers left means nobody is waiting; nothing to do.
        let _ = self.tx.send(true);
    }
}

impl ShutdownSignal {
    /// A signal fired only through the returned trigger.
    pub fn manual() -> (ShutdownTrigger, ShutdownSignal) {
        let (tx, rx) = watch::channel(false);
        (ShutdownTrigger { tx }, ShutdownSignal { rx })
    }

    /// A signal fired by Ctrl-C. Must be called inside a Tokio runtime.
    ///
    /// Resolves once the handler is installed, so an interrupt arriving
    /// right after this returns is caught instead of killing the process.
    pub async fn ctrl_c() -> ShutdownSignal {
        let (trigger, signal) = Self::manual();
        let (ready_tx, ready_rx) = oneshot::channel();
        tokio::spawn(async move {
            let interrupted = tokio::signal::ctrl_c();
            tokio::pin!(interrupted);

            // The first poll installs the handler.
            let early = tokio::select! {
                biased;
                res = &mut interrupted => Some(res),
                () = std::future::ready(()) => None,
            };
            let _ = ready_tx.send(());

            let result = match early {
                Some(res) => res,
                None => interrupted.await,
            };
            if let Err(err) = result {
                // Without a working listener there is nothing left to wait
                // for; treat it like an interrupt.
                debug!("interrupt listener failed: {err}");
            }
            trigger.trigger();
        });
        let _ = ready_rx.await;
        signal
    }

    pub fn is_triggered(&self) -> bool {
        *self.rx.borrow()
    }

    /// Wait until shutdown is requested.
    ///
    /// If every trigger is dropped the wait can never end normally, so that
    /// also counts as a shutdown request.
    pub async fn wait(&mut self) {
        loop {
            if *self.rx.borrow_and_update() {
                return;
            }
            if self.rx.changed().await.is_err() {
                debug!("shutdown trigger dropped; stopping");
                return;
            }
        }
    }
}
