// src/watch/coalesce.rs

//! Merge one change batch into a single rebuild request.

use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::{DateTime, Local};
use tracing::info;

use crate::types::ChangeBatch;
use crate::watch::path_utils::display_path;

pub(crate) const REGENERATING_TARGET: &str = "sitewatch::regenerating";

/// All paths from one batch, in report order, plus when handling began.
#[derive(Debug, Clone)]
pub struct CoalescedChanges {
    /// Modified, then added, then removed. Not re-sorted.
    pub paths: Vec<PathBuf>,
    /// Monotonic start, used to time the rebuild.
    pub started: Instant,
    /// Wall-clock start, used for display.
    pub timestamp: DateTime<Local>,
}

impl CoalescedChanges {
    pub fn count(&self) -> usize {
        self.paths.len()
    }

    /// Paths as shown to the user, relative to `source`.
    pub fn display_paths(&self, source: &Path) -> Vec<String> {
        self.paths.iter().map(|p| display_path(source, p)).collect()
    }
}

/// Merge a batch. The timestamp is taken once, before anything else.
pub fn coalesce(batch: ChangeBatch) -> CoalescedChanges {
    let started = Instant::now();
    let timestamp = Local::now();

    let ChangeBatch {
        modified,
        added,
        removed,
    } = batch;

    let mut paths = modified;
    paths.extend(added);
    paths.extend(removed);

    CoalescedChanges {
        paths,
        started,
        timestamp,
    }
}

/// Summary line plus one line per changed path.
pub fn report(source: &Path, changes: &CoalescedChanges) {
    info!(
        target: REGENERATING_TARGET,
        "{} file(s) changed at {}",
        changes.count(),
        changes.timestamp.format("%Y-%m-%d %H:%M:%S")
    );
    for path in changes.display_paths(source) {
        info!(target: REGENERATING_TARGET, "    {}", path);
    }
}
