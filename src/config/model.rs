// src/config/model.rs

use std::path::PathBuf;

use serde::Deserialize;

/// Site config filenames recognised at the source root.
///
/// All three are excluded from triggering rebuilds; only the TOML flavour is
/// actually parsed.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["_config.yml", "_config.yaml", "_config.toml"];

/// Destination directory name used when neither the CLI nor the config
/// names one.
pub const DEFAULT_DESTINATION: &str = "_site";

/// Site configuration as read from `_config.toml`.
///
/// ```toml
/// destination = "public"
/// exclude = ["drafts", "node_modules"]
/// watch_dirs = ["../shared-assets"]
/// force_polling = false
/// build_cmd = "make site"
///
/// [theme]
/// name = "minimal"
/// root = "themes/minimal"
/// ```
///
/// Every key is optional. Unknown keys are ignored so the same file can carry
/// settings for the site generator itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SiteConfigFile {
    #[serde(default)]
    pub destination: Option<PathBuf>,

    #[serde(default)]
    pub exclude: Vec<PathBuf>,

    /// Extra directories whose changes should also trigger a rebuild.
    #[serde(default)]
    pub watch_dirs: Vec<PathBuf>,

    #[serde(default)]
    pub force_polling: Option<bool>,

    /// Shell command that renders the site.
    #[serde(default)]
    pub build_cmd: Option<String>,

    #[serde(default)]
    pub theme: Option<ThemeSection>,
}

/// `[theme]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ThemeSection {
    pub name: String,

    #[serde(default)]
    pub root: Option<PathBuf>,
}

/// Immutable input to a watch session, merged from CLI flags and the site
/// config. Built once at startup and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchConfig {
    /// Absolute source directory; the root every ignore pattern is relative to.
    pub source: PathBuf,
    pub destination: PathBuf,
    /// Extra watch roots given on the command line.
    pub watch_dirs: Vec<PathBuf>,
    /// Excluded paths, absolute or relative to `source`.
    pub excludes: Vec<PathBuf>,
    pub force_polling: bool,
    pub verbose: bool,
    /// An embedding host owns the process lifecycle; do not block or trap
    /// interrupts.
    pub serving: bool,
}

impl WatchConfig {
    pub fn new(source: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            watch_dirs: Vec::new(),
            excludes: Vec::new(),
            force_polling: false,
            verbose: false,
            serving: false,
        }
    }
}
