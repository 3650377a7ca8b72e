// src/watch/patterns.rs

//! Watch roots and ignore patterns for a watch session.
//!
//! Ignore patterns are regexes anchored at the start of a path relative to
//! the source root, e.g. `^_site(?:/|$)` for the destination directory. The
//! subscription layer relativizes each changed path against the source and
//! drops it when any pattern matches.

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use regex::Regex;
use tracing::debug;

use crate::config::{WatchConfig, CONFIG_FILE_NAMES};
use crate::fs::FileSystem;
use crate::watch::path_utils::normalize_encoding;

/// Metadata file the site generator writes at the source root.
pub const METADATA_FILE: &str = ".sitewatch-metadata";

const EXCLUDE_TARGET: &str = "sitewatch::exclude";

/// A single relative-path prefix that suppresses rebuilds.
#[derive(Clone)]
pub struct IgnorePattern {
    /// Human-readable prefix; directories carry a trailing `/`.
    prefix: String,
    regex: Regex,
}

impl fmt::Debug for IgnorePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IgnorePattern").field(&self.regex.as_str()).finish()
    }
}

impl IgnorePattern {
    /// Pattern for a file: plain anchored prefix.
    pub fn file(rel: &str) -> std::result::Result<Self, regex::Error> {
        let regex = Regex::new(&format!("^{}", regex::escape(rel)))?;
        Ok(Self {
            prefix: rel.to_string(),
            regex,
        })
    }

    /// Pattern for a directory: matches the directory itself and everything
    /// beneath it, but not a sibling that merely shares the name as a prefix.
    pub fn directory(rel: &str) -> std::result::Result<Self, regex::Error> {
        let rel = rel.trim_end_matches('/');
        let regex = Regex::new(&format!("^{}(?:/|$)", regex::escape(rel)))?;
        Ok(Self {
            prefix: format!("{rel}/"),
            regex,
        })
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    pub fn is_match(&self, rel_path: &str) -> bool {
        self.regex.is_match(rel_path)
    }
}

/// Ignore patterns for one watch session. Immutable once computed.
#[derive(Debug, Clone, Default)]
pub struct IgnorePatternSet {
    patterns: Vec<IgnorePattern>,
}

impl IgnorePatternSet {
    pub fn new(patterns: Vec<IgnorePattern>) -> Self {
        Self { patterns }
    }

    pub fn iter(&self) -> impl Iterator<Item = &IgnorePattern> {
        self.patterns.iter()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn prefixes(&self) -> Vec<&str> {
        self.patterns.iter().map(IgnorePattern::prefix).collect()
    }

    /// True if `rel_path` (relative to the source, forward slashes) is ignored.
    pub fn is_match(&self, rel_path: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(rel_path))
    }
}

/// Directories to subscribe to, in order, without duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WatchRootSet {
    roots: Vec<PathBuf>,
}

impl WatchRootSet {
    pub fn iter(&self) -> impl Iterator<Item = &PathBuf> {
        self.roots.iter()
    }

    pub fn as_slice(&self) -> &[PathBuf] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    fn push(&mut self, root: PathBuf) {
        if !self.roots.contains(&root) {
            self.roots.push(root);
        }
    }
}

impl From<Vec<PathBuf>> for WatchRootSet {
    fn from(paths: Vec<PathBuf>) -> Self {
        let mut set = WatchRootSet::default();
        for path in paths {
            set.push(path);
        }
        set
    }
}

/// Computes watch roots and ignore patterns from a [`WatchConfig`].
#[derive(Debug, Clone, Copy)]
pub struct PathMatcher<'a> {
    fs: &'a dyn FileSystem,
}

impl<'a> PathMatcher<'a> {
    pub fn new(fs: &'a dyn FileSystem) -> Self {
        Self { fs }
    }

    /// `{source} ∪ watch_dirs ∪ site_watch_dirs ∪ {theme_root}`.
    ///
    /// Relative entries are resolved against the source.
    pub fn compute_watch_roots(
        &self,
        config: &WatchConfig,
        site_watch_dirs: &[PathBuf],
        theme_root: Option<&Path>,
    ) -> WatchRootSet {
        let mut roots = WatchRootSet::default();
        roots.push(config.source.clone());

        let extra = config
            .watch_dirs
            .iter()
            .chain(site_watch_dirs.iter())
            .map(PathBuf::as_path)
            .chain(theme_root);

        for dir in extra {
            roots.push(config.source.join(dir));
        }
        roots
    }

    /// Ignore patterns for every excluded path that exists under the source,
    /// plus the metadata file.
    ///
    /// Never fails: a path that cannot be resolved is dropped.
    pub fn compute_ignore_patterns(&self, config: &WatchConfig) -> IgnorePatternSet {
        let source = self
            .fs
            .canonicalize(&config.source)
            .unwrap_or_else(|_| config.source.clone());

        let mut patterns = Vec::new();
        for excluded in excluded_paths(config) {
            match self.pattern_for(config, &source, &excluded) {
                Ok(Some(pattern)) => {
                    debug!(target: EXCLUDE_TARGET, path = ?excluded, pattern = pattern.as_str(), "excluding");
                    patterns.push(pattern);
                }
                Ok(None) => {}
                Err(err) => {
                    debug!(target: EXCLUDE_TARGET, path = ?excluded, error = %err, "dropping unresolvable exclude");
                }
            }
        }

        match IgnorePattern::file(METADATA_FILE) {
            Ok(pattern) => patterns.push(pattern),
            Err(err) => debug!(target: EXCLUDE_TARGET, error = %err, "metadata pattern failed to compile"),
        }

        IgnorePatternSet::new(patterns)
    }

    fn pattern_for(
        &self,
        config: &WatchConfig,
        source: &Path,
        excluded: &Path,
    ) -> Result<Option<IgnorePattern>> {
        let absolute = config.source.join(excluded);

        if !self.fs.exists(&absolute) {
            debug!(target: EXCLUDE_TARGET, path = ?absolute, "exclude does not exist; skipping");
            return Ok(None);
        }

        let canonical = self.fs.canonicalize(&absolute)?;
        let rel = match canonical.strip_prefix(source) {
            Ok(rel) => rel,
            Err(_) => {
                debug!(target: EXCLUDE_TARGET, path = ?canonical, "exclude is outside the source; skipping");
                return Ok(None);
            }
        };

        // Excluding the source itself would silence every change.
        if rel.as_os_str().is_empty() {
            debug!(target: EXCLUDE_TARGET, path = ?canonical, "exclude is the source itself; skipping");
            return Ok(None);
        }

        let rel_str = normalize_encoding(rel);

        let pattern = if self.fs.is_dir(&canonical) {
            IgnorePattern::directory(&rel_str)
        } else {
            IgnorePattern::file(&rel_str)
        }
        .with_context(|| format!("building ignore pattern for {rel_str}"))?;

        Ok(Some(pattern))
    }
}

/// Config files, then the destination, then user excludes.
fn excluded_paths(config: &WatchConfig) -> Vec<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| config.source.join(name))
        .chain(std::iter::once(config.destination.clone()))
        .chain(config.excludes.iter().map(|p| config.source.join(p)))
        .collect()
}
