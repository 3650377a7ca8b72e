use std::path::PathBuf;
use std::time::Duration;

/// One batch of changes delivered by the subscription layer.
///
/// All paths are absolute. A batch is consumed synchronously by the rebuild
/// handler and never retained.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeBatch {
    pub modified: Vec<PathBuf>,
    pub added: Vec<PathBuf>,
    pub removed: Vec<PathBuf>,
}

impl ChangeBatch {
    pub fn new(modified: Vec<PathBuf>, added: Vec<PathBuf>, removed: Vec<PathBuf>) -> Self {
        Self {
            modified,
            added,
            removed,
        }
    }

    /// Total number of entries across all three categories.
    pub fn len(&self) -> usize {
        self.modified.len() + self.added.len() + self.removed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Result of one rebuild attempt.
///
/// Never raised to the caller; the dispatcher turns it into log lines and
/// hands it back for inspection.
#[derive(Debug, Clone, PartialEq)]
pub enum RebuildOutcome {
    Success { elapsed: Duration },
    Failed { message: String },
}

impl RebuildOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, RebuildOutcome::Success { .. })
    }
}
