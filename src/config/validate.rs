// src/config/validate.rs

use crate::config::model::WatchConfig;
use crate::errors::{Result, SitewatchError};

/// Check the invariants a watch session relies on.
pub fn validate_watch_config(cfg: &WatchConfig) -> Result<()> {
    if !cfg.source.is_absolute() {
        return Err(SitewatchError::ConfigError(format!(
            "source {:?} must be an absolute path",
            cfg.source
        )));
    }

    if !cfg.source.is_dir() {
        return Err(SitewatchError::ConfigError(format!(
            "source {:?} is not a directory",
            cfg.source
        )));
    }

    // Building into the source would make every rebuild trigger the next one.
    if cfg.destination == cfg.source {
        return Err(SitewatchError::ConfigError(
            "destination must not be the source directory".to_string(),
        ));
    }

    Ok(())
}

/// Resolve the build command from the CLI and the config file.
pub fn validate_build_cmd(cli: Option<&str>, file: Option<&str>) -> Result<String> {
    let cmd = cli.or(file).map(str::trim).unwrap_or_default();
    if cmd.is_empty() {
        return Err(SitewatchError::ConfigError(
            "no build command configured (use --build-cmd or `build_cmd` in _config.toml)"
                .to_string(),
        ));
    }
    Ok(cmd.to_string())
}
