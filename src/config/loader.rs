// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::CliArgs;
use crate::config::model::{SiteConfigFile, WatchConfig, DEFAULT_DESTINATION};
use crate::errors::{Result, SitewatchError};

/// Name of the only site config flavour that is parsed.
const TOML_CONFIG_FILE: &str = "_config.toml";

/// Load a site configuration file from a given path.
///
/// This only performs TOML deserialization; see [`resolve_watch_config`] for
/// merging and [`crate::config::validate_watch_config`] for validation.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<SiteConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let config: SiteConfigFile = toml::from_str(&contents)?;

    Ok(config)
}

/// Locate and load the site config for `source`.
///
/// - An explicit path (`--config`) must exist.
/// - Otherwise `<source>/_config.toml` is used when present.
/// - With neither, an empty config is returned.
pub fn load_site_config(source: &Path, explicit: Option<&Path>) -> Result<SiteConfigFile> {
    if let Some(path) = explicit {
        if !path.is_file() {
            return Err(SitewatchError::ConfigError(format!(
                "config file {:?} does not exist",
                path
            )));
        }
        return load_from_path(path);
    }

    let default_path = source.join(TOML_CONFIG_FILE);
    if default_path.is_file() {
        load_from_path(&default_path)
    } else {
        Ok(SiteConfigFile::default())
    }
}

/// Merge CLI flags over the site config into the immutable [`WatchConfig`].
///
/// - Scalars: the CLI wins over the file, the file wins over defaults.
/// - Lists: file entries first, CLI entries appended.
/// - `source` is canonicalized so every later prefix comparison sees the
///   same absolute, symlink-free form the watcher reports.
pub fn resolve_watch_config(args: &CliArgs, file: &SiteConfigFile) -> Result<WatchConfig> {
    let source = args.source.clone().unwrap_or_else(|| PathBuf::from("."));
    let source = source.canonicalize().map_err(|err| {
        SitewatchError::ConfigError(format!("source directory {:?}: {err}", source))
    })?;

    let destination = args
        .destination
        .clone()
        .or_else(|| file.destination.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DESTINATION));

    let excludes = file
        .exclude
        .iter()
        .chain(args.exclude.iter())
        .cloned()
        .collect();

    let watch_dirs = args.watch_dir.iter().map(|dir| source.join(dir)).collect();

    Ok(WatchConfig {
        destination: source.join(destination),
        watch_dirs,
        excludes,
        force_polling: args.force_polling || file.force_polling.unwrap_or(false),
        verbose: args.verbose,
        serving: false,
        source,
    })
}
