// src/config/mod.rs

//! Configuration loading and validation for sitewatch.
//!
//! Responsibilities:
//! - Define the TOML-backed site config and the merged `WatchConfig` (`model.rs`).
//! - Load the site config from disk and merge CLI flags over it (`loader.rs`).
//! - Validate basic invariants like the source being a directory (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_from_path, load_site_config, resolve_watch_config};
pub use model::{SiteConfigFile, ThemeSection, WatchConfig, CONFIG_FILE_NAMES, DEFAULT_DESTINATION};
pub use validate::{validate_build_cmd, validate_watch_config};
