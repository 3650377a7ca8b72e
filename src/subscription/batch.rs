// src/subscription/batch.rs

//! Fold raw `notify` events into a [`ChangeBatch`].

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use notify::event::{ModifyKind, RenameMode};
use notify::{Event, EventKind};
use tracing::trace;

use crate::types::ChangeBatch;
use crate::watch::path_utils::relative_str;
use crate::watch::patterns::IgnorePatternSet;

#[derive(Debug, Clone, Copy)]
enum Bucket {
    Modified,
    Added,
    Removed,
}

/// Accumulates events for one debounce window.
///
/// - `Create` → added, `Remove` → removed, other `Modify` → modified.
/// - Renames count as a removal of the old name and an addition of the new.
/// - `Access` events are dropped.
/// - A path is recorded once per batch, in the bucket it first landed in.
/// - Paths matching the ignore set are dropped.
#[derive(Debug)]
pub struct BatchCollector<'a> {
    source: &'a Path,
    ignore: &'a IgnorePatternSet,
    seen: HashSet<PathBuf>,
    batch: ChangeBatch,
}

impl<'a> BatchCollector<'a> {
    pub fn new(source: &'a Path, ignore: &'a IgnorePatternSet) -> Self {
        Self {
            source,
            ignore,
            seen: HashSet::new(),
            batch: ChangeBatch::default(),
        }
    }

    pub fn push(&mut self, event: Event) {
        match event.kind {
            EventKind::Access(_) => {}
            EventKind::Create(_) => self.record_all(event.paths, Bucket::Added),
            EventKind::Remove(_) => self.record_all(event.paths, Bucket::Removed),
            EventKind::Modify(ModifyKind::Name(RenameMode::From)) => {
                self.record_all(event.paths, Bucket::Removed)
            }
            EventKind::Modify(ModifyKind::Name(RenameMode::To)) => {
                self.record_all(event.paths, Bucket::Added)
            }
            EventKind::Modify(ModifyKind::Name(RenameMode::Both)) => {
                let mut paths = event.paths.into_iter();
                if let Some(from) = paths.next() {
                    self.record(from, Bucket::Removed);
                }
                self.record_all(paths, Bucket::Added);
            }
            EventKind::Modify(_) | EventKind::Any | EventKind::Other => {
                self.record_all(event.paths, Bucket::Modified)
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.batch.is_empty()
    }

    pub fn finish(self) -> ChangeBatch {
        self.batch
    }

    fn record_all(&mut self, paths: impl IntoIterator<Item = PathBuf>, bucket: Bucket) {
        for path in paths {
            self.record(path, bucket);
        }
    }

    fn record(&mut self, path: PathBuf, bucket: Bucket) {
        if self.is_ignored(&path) {
            trace!(?path, "ignored change");
            return;
        }
        if !self.seen.insert(path.clone()) {
            return;
        }
        match bucket {
            Bucket::Modified => self.batch.modified.push(path),
            Bucket::Added => self.batch.added.push(path),
            Bucket::Removed => self.batch.removed.push(path),
        }
    }

    /// Paths outside the source (extra watch dirs, themes) are never ignored.
    fn is_ignored(&self, path: &Path) -> bool {
        match relative_str(self.source, path) {
            Some(rel) => self.ignore.is_match(&rel),
            None => false,
        }
    }
}
