use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use sitewatch::config::SiteConfigFile;
use sitewatch::site::{BuildError, Site, Theme};

/// What the next `process()` call should do.
#[derive(Debug, Clone)]
pub enum Scripted {
    Fail(String),
    Panic(String),
}

/// A site that counts rebuilds and fails on demand.
///
/// Clones share the call counter and script, so a test can keep one copy
/// after handing the other to the watcher.
#[derive(Debug, Clone)]
pub struct RecordingSite {
    source: PathBuf,
    config: SiteConfigFile,
    theme: Option<Theme>,
    calls: Arc<AtomicUsize>,
    script: Arc<Mutex<VecDeque<Scripted>>>,
}

impl RecordingSite {
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            config: SiteConfigFile::default(),
            theme: None,
            calls: Arc::new(AtomicUsize::new(0)),
            script: Arc::new(Mutex::new(VecDeque::new())),
        }
    }

    pub fn with_config(mut self, config: SiteConfigFile) -> Self {
        self.config = config;
        self
    }

    pub fn with_theme(mut self, name: &str, root: Option<PathBuf>) -> Self {
        self.theme = Some(Theme {
            name: name.to_string(),
            root,
        });
        self
    }

    pub fn fail_next(&self, message: &str) {
        self.script
            .lock()
            .unwrap()
            .push_back(Scripted::Fail(message.to_string()));
    }

    pub fn panic_next(&self, message: &str) {
        self.script
            .lock()
            .unwrap()
            .push_back(Scripted::Panic(message.to_string()));
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Site for RecordingSite {
    fn source(&self) -> &Path {
        &self.source
    }

    fn config(&self) -> &SiteConfigFile {
        &self.config
    }

    fn theme(&self) -> Option<&Theme> {
        self.theme.as_ref()
    }

    fn process(&mut self) -> Result<(), BuildError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = self.script.lock().unwrap().pop_front();
        match next {
            None => Ok(()),
            Some(Scripted::Fail(message)) => Err(BuildError::Message(message)),
            Some(Scripted::Panic(message)) => panic!("{message}"),
        }
    }
}
