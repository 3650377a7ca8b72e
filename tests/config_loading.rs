// tests/config_loading.rs
mod common;
use crate::common::{init_tracing, TestResult};

use std::fs;
use std::path::PathBuf;

use sitewatch::cli::{CliArgs, LogLevel};
use sitewatch::config::{
    load_from_path, load_site_config, resolve_watch_config, validate_build_cmd,
    validate_watch_config, SiteConfigFile, ThemeSection, WatchConfig,
};
use sitewatch::errors::SitewatchError;
use sitewatch::logging::resolve_level;

#[test]
fn site_config_is_parsed_and_unknown_keys_ignored() -> TestResult {
    init_tracing();

    let dir = tempfile::tempdir()?;
    let path = dir.path().join("_config.toml");
    fs::write(
        &path,
        r#"
title = "My blog"
destination = "public"
exclude = ["drafts", "README.md"]
watch_dirs = ["../shared"]
force_polling = true
build_cmd = "make site"

[theme]
name = "plain"
root = "themes/plain"
"#,
    )?;

    let cfg = load_from_path(&path)?;
    assert_eq!(
        cfg,
        SiteConfigFile {
            destination: Some(PathBuf::from("public")),
            exclude: vec![PathBuf::from("drafts"), PathBuf::from("README.md")],
            watch_dirs: vec![PathBuf::from("../shared")],
            force_polling: Some(true),
            build_cmd: Some("make site".to_string()),
            theme: Some(ThemeSection {
                name: "plain".to_string(),
                root: Some(PathBuf::from("themes/plain")),
            }),
        }
    );
    Ok(())
}

#[test]
fn invalid_toml_is_a_toml_error() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("_config.toml");
    fs::write(&path, "exclude = [unterminated")?;

    match load_from_path(&path) {
        Err(SitewatchError::TomlError(_)) => Ok(()),
        other => panic!("expected TomlError, got {other:?}"),
    }
}

#[test]
fn missing_default_config_yields_empty_config() -> TestResult {
    let dir = tempfile::tempdir()?;
    let cfg = load_site_config(dir.path(), None)?;
    assert_eq!(cfg, SiteConfigFile::default());
    Ok(())
}

#[test]
fn missing_explicit_config_is_an_error() -> TestResult {
    let dir = tempfile::tempdir()?;
    let explicit = dir.path().join("nope.toml");

    match load_site_config(dir.path(), Some(&explicit)) {
        Err(SitewatchError::ConfigError(msg)) => {
            assert!(msg.contains("does not exist"));
            Ok(())
        }
        other => panic!("expected ConfigError, got {other:?}"),
    }
}

#[test]
fn cli_flags_override_and_extend_the_site_config() -> TestResult {
    let dir = tempfile::tempdir()?;
    let source = dir.path().canonicalize()?;

    let file = SiteConfigFile {
        destination: Some(PathBuf::from("public")),
        exclude: vec![PathBuf::from("drafts")],
        force_polling: Some(true),
        ..Default::default()
    };
    let args = CliArgs {
        source: Some(source.clone()),
        destination: Some(PathBuf::from("out")),
        exclude: vec![PathBuf::from("tmp")],
        watch_dir: vec![PathBuf::from("partials")],
        verbose: true,
        ..Default::default()
    };

    let cfg = resolve_watch_config(&args, &file)?;
    assert_eq!(
        cfg,
        WatchConfig {
            source: source.clone(),
            destination: source.join("out"),
            watch_dirs: vec![source.join("partials")],
            excludes: vec![PathBuf::from("drafts"), PathBuf::from("tmp")],
            force_polling: true,
            verbose: true,
            serving: false,
        }
    );
    Ok(())
}

#[test]
fn destination_defaults_to_site_dir() -> TestResult {
    let dir = tempfile::tempdir()?;
    let source = dir.path().canonicalize()?;
    let args = CliArgs {
        source: Some(source.clone()),
        ..Default::default()
    };

    let cfg = resolve_watch_config(&args, &SiteConfigFile::default())?;
    assert_eq!(cfg.destination, source.join("_site"));
    assert!(!cfg.force_polling);
    validate_watch_config(&cfg)?;
    Ok(())
}

#[test]
fn nonexistent_source_is_a_config_error() {
    let args = CliArgs {
        source: Some(PathBuf::from("/definitely/not/here")),
        ..Default::default()
    };
    assert!(matches!(
        resolve_watch_config(&args, &SiteConfigFile::default()),
        Err(SitewatchError::ConfigError(_))
    ));
}

#[test]
fn destination_equal_to_source_is_rejected() -> TestResult {
    let dir = tempfile::tempdir()?;
    let source = dir.path().canonicalize()?;
    let cfg = WatchConfig::new(&source, &source);

    match validate_watch_config(&cfg) {
        Err(SitewatchError::ConfigError(msg)) => {
            assert!(msg.contains("destination"));
            Ok(())
        }
        other => panic!("expected ConfigError, got {other:?}"),
    }
}

#[test]
fn build_command_resolution() {
    assert_eq!(
        validate_build_cmd(Some("make"), Some("rake build")).unwrap(),
        "make"
    );
    assert_eq!(validate_build_cmd(None, Some(" rake build ")).unwrap(), "rake build");
}

#[test]
fn missing_or_blank_build_command_is_rejected() {
    match validate_build_cmd(None, None) {
        Err(SitewatchError::ConfigError(msg)) => assert!(msg.contains("--build-cmd")),
        other => panic!("expected ConfigError, got {other:?}"),
    }
    assert!(matches!(
        validate_build_cmd(Some("   "), None),
        Err(SitewatchError::ConfigError(_))
    ));
    assert!(matches!(
        validate_build_cmd(None, Some("")),
        Err(SitewatchError::ConfigError(_))
    ));
}

#[test]
fn log_level_priority() {
    assert_eq!(
        resolve_level(Some(LogLevel::Warn), Some("trace"), true),
        tracing::Level::WARN
    );
    assert_eq!(resolve_level(None, Some("trace"), false), tracing::Level::TRACE);
    assert_eq!(resolve_level(None, Some("bogus"), true), tracing::Level::DEBUG);
    assert_eq!(resolve_level(None, None, false), tracing::Level::INFO);
}
