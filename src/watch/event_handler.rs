// src/watch/event_handler.rs

//! Turns change batches into rebuilds.

use std::path::PathBuf;

use tracing::debug;

use crate::logging::Diagnostics;
use crate::site::Site;
use crate::types::{ChangeBatch, RebuildOutcome};
use crate::watch::coalesce::{coalesce, report};
use crate::watch::dispatch::dispatch;

/// Owns the site for the lifetime of a watch session.
///
/// The subscription layer calls [`RebuildHandler::handle`] once per batch and
/// never concurrently, so no locking is needed around the site.
pub struct RebuildHandler {
    source: PathBuf,
    site: Box<dyn Site>,
    diagnostics: Diagnostics,
}

impl std::fmt::Debug for RebuildHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RebuildHandler")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

impl RebuildHandler {
    pub fn new(source: impl Into<PathBuf>, site: Box<dyn Site>, diagnostics: Diagnostics) -> Self {
        Self {
            source: source.into(),
            site,
            diagnostics,
        }
    }

    /// Coalesce, report and rebuild. Always returns; failures are logged.
    pub fn handle(&mut self, batch: ChangeBatch) -> RebuildOutcome {
        let changes = coalesce(batch);
        report(&self.source, &changes);
        let outcome = dispatch(self.site.as_mut(), changes.started, &self.diagnostics);
        debug!(success = outcome.is_success(), "rebuild handled");
        outcome
    }
}
