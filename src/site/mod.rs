// src/site/mod.rs

//! The site being rebuilt.
//!
//! The watcher only needs a handful of things from a site: where it lives,
//! its parsed config, its theme, and a way to rebuild it. [`Site`] captures
//! exactly that so the rendering pipeline stays pluggable; [`CommandSite`]
//! is the implementation the binary uses.

pub mod command;

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::SiteConfigFile;

pub use command::CommandSite;

/// Failure raised by [`Site::process`].
///
/// The rebuild dispatcher turns this into warnings; it never reaches the
/// watch loop.
#[derive(Error, Debug)]
pub enum BuildError {
    #[error("build command exited with status {code}: {detail}")]
    CommandFailed { code: i32, detail: String },

    #[error("failed to run build command: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("{0}")]
    Message(String),
}

/// Theme attached to a site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub name: String,
    /// Directory holding the theme's files, when it has one.
    pub root: Option<PathBuf>,
}

pub trait Site: Send {
    /// Absolute source directory.
    fn source(&self) -> &Path;

    fn config(&self) -> &SiteConfigFile;

    fn theme(&self) -> Option<&Theme>;

    /// Watch roots contributed by the site config, resolved against the
    /// source.
    fn watch_dirs(&self) -> Vec<PathBuf> {
        self.config()
            .watch_dirs
            .iter()
            .map(|dir| self.source().join(dir))
            .collect()
    }

    /// Rebuild the whole site. May be called any number of times.
    fn process(&mut self) -> Result<(), BuildError>;
}
