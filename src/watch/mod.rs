// src/watch/mod.rs

//! Watch session core.
//!
//! This module is responsible for:
//! - Turning the config into watch roots and ignore patterns (`patterns`).
//! - Deciding whether a theme directory is watchable (`theme`).
//! - Merging a change batch and reporting it (`coalesce`).
//! - Running a rebuild with its failures contained (`dispatch`).
//! - Owning the subscription from start to interrupt (`lifecycle`).
//!
//! It does **not** talk to `notify` directly; see [`crate::subscription`].

pub mod coalesce;
pub mod dispatch;
pub mod event_handler;
pub mod lifecycle;
pub mod path_utils;
pub mod patterns;
pub mod theme;

pub use coalesce::{coalesce, CoalescedChanges};
pub use dispatch::dispatch;
pub use event_handler::RebuildHandler;
pub use lifecycle::{LifecycleState, WatchLifecycle, WatchOutcome};
pub use patterns::{IgnorePattern, IgnorePatternSet, PathMatcher, WatchRootSet, METADATA_FILE};
