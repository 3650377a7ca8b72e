// src/subscription/mod.rs

//! Change-event subscriptions.
//!
//! The watch lifecycle talks to a [`Subscriber`] instead of `notify`
//! directly. Production code uses [`NotifySubscriber`]; tests can provide an
//! implementation that records the request and pushes batches by hand.
//!
//! Contract every implementation honours:
//! - the handler is invoked with non-empty batches only;
//! - invocations never overlap: one batch is fully handled (including the
//!   rebuild) before the next is delivered;
//! - paths matching the ignore set, relative to `source`, are never
//!   delivered.

pub mod batch;
pub mod notify_backend;

use std::fmt::Debug;
use std::path::PathBuf;

use crate::errors::Result;
use crate::types::ChangeBatch;
use crate::watch::patterns::{IgnorePatternSet, WatchRootSet};

pub use batch::BatchCollector;
pub use notify_backend::NotifySubscriber;

/// Callback receiving one batch at a time.
pub type BatchHandler = Box<dyn FnMut(ChangeBatch) + Send + 'static>;

/// Everything a subscriber needs to start watching.
#[derive(Debug, Clone)]
pub struct SubscribeRequest {
    pub roots: WatchRootSet,
    pub ignore: IgnorePatternSet,
    /// Root the ignore patterns are relative to.
    pub source: PathBuf,
    pub force_polling: bool,
}

/// Something that can open a change-event subscription.
pub trait Subscriber {
    fn subscribe(
        &self,
        request: SubscribeRequest,
        handler: BatchHandler,
    ) -> Result<Box<dyn SubscriptionHandle>>;
}

/// A live subscription. Dropping it without `stop` also ends it.
pub trait SubscriptionHandle: Send + Debug {
    /// Stop delivering events. A rebuild already running is not interrupted.
    fn stop(self: Box<Self>);
}
