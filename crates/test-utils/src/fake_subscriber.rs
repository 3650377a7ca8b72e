use std::sync::{Arc, Mutex};

use sitewatch::errors::Result;
use sitewatch::subscription::{BatchHandler, SubscribeRequest, Subscriber, SubscriptionHandle};
use sitewatch::types::ChangeBatch;

#[derive(Default)]
struct FakeState {
    requests: Vec<SubscribeRequest>,
    handler: Option<BatchHandler>,
    stopped: bool,
}

/// A fake subscriber that:
/// - records every subscribe request
/// - keeps the handler so tests can push batches with [`FakeSubscriber::emit`]
/// - remembers whether the handle was stopped.
#[derive(Clone, Default)]
pub struct FakeSubscriber {
    state: Arc<Mutex<FakeState>>,
}

impl FakeSubscriber {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver a batch synchronously. Returns false if nothing is subscribed.
    pub fn emit(&self, batch: ChangeBatch) -> bool {
        // Take the handler out so it runs without the lock held.
        let handler = self.state.lock().unwrap().handler.take();
        let Some(mut handler) = handler else {
            return false;
        };
        handler(batch);

        let mut state = self.state.lock().unwrap();
        if !state.stopped {
            state.handler = Some(handler);
        }
        true
    }

    pub fn subscribe_count(&self) -> usize {
        self.state.lock().unwrap().requests.len()
    }

    pub fn last_request(&self) -> Option<SubscribeRequest> {
        self.state.lock().unwrap().requests.last().cloned()
    }

    pub fn is_stopped(&self) -> bool {
        self.state.lock().unwrap().stopped
    }
}

impl Subscriber for FakeSubscriber {
    fn subscribe(
        &self,
        request: SubscribeRequest,
        handler: BatchHandler,
    ) -> Result<Box<dyn SubscriptionHandle>> {
        let mut state = self.state.lock().unwrap();
        state.requests.push(request);
        state.handler = Some(handler);
        state.stopped = false;
        Ok(Box::new(FakeHandle {
            state: Arc::clone(&self.state),
        }))
    }
}

struct FakeHandle {
    state: Arc<Mutex<FakeState>>,
}

impl std::fmt::Debug for FakeHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FakeHandle").finish()
    }
}

impl SubscriptionHandle for FakeHandle {
    fn stop(self: Box<Self>) {
        let mut state = self.state.lock().unwrap();
        state.stopped = true;
        state.handler = None;
    }
}
