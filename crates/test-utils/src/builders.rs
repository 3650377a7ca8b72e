#![allow(dead_code)]

use std::path::PathBuf;

use sitewatch::config::WatchConfig;

/// Builder for `WatchConfig` to simplify test setup.
pub struct WatchConfigBuilder {
    config: WatchConfig,
}

impl WatchConfigBuilder {
    /// Source and destination (`<source>/_site`).
    pub fn new(source: impl Into<PathBuf>) -> Self {
        let source = source.into();
        let destination = source.join("_site");
        Self {
            config: WatchConfig::new(source, destination),
        }
    }

    pub fn destination(mut self, destination: impl Into<PathBuf>) -> Self {
        self.config.destination = destination.into();
        self
    }

    pub fn exclude(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.excludes.push(path.into());
        self
    }

    pub fn watch_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.watch_dirs.push(dir.into());
        self
    }

    pub fn force_polling(mut self, val: bool) -> Self {
        self.config.force_polling = val;
        self
    }

    pub fn verbose(mut self, val: bool) -> Self {
        self.config.verbose = val;
        self
    }

    pub fn serving(mut self, val: bool) -> Self {
        self.config.serving = val;
        self
    }

    pub fn build(self) -> WatchConfig {
        self.config
    }
}
