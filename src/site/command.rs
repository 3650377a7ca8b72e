// src/site/command.rs

//! Site rebuilt by running a shell command.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::{debug, info};

use crate::config::SiteConfigFile;
use crate::site::{BuildError, Site, Theme};

/// How many trailing stderr lines to carry in a [`BuildError`].
const STDERR_TAIL_LINES: usize = 5;

const BUILD_TARGET: &str = "sitewatch::build";

/// A site whose `process()` runs a build command in the source directory.
#[derive(Debug, Clone)]
pub struct CommandSite {
    source: PathBuf,
    config: SiteConfigFile,
    theme: Option<Theme>,
    build_cmd: String,
}

impl CommandSite {
    pub fn new(source: impl Into<PathBuf>, config: SiteConfigFile, build_cmd: impl Into<String>) -> Self {
        let source = source.into();
        let theme = config.theme.as_ref().map(|section| Theme {
            name: section.name.clone(),
            root: section.root.as_ref().map(|root| source.join(root)),
        });

        Self {
            source,
            config,
            theme,
            build_cmd: build_cmd.into(),
        }
    }

    pub fn build_cmd(&self) -> &str {
        &self.build_cmd
    }

    fn shell_command(&self) -> Command {
        let mut cmd = if cfg!(windows) {
            let mut c = Command::new("cmd");
            c.arg("/C").arg(&self.build_cmd);
            c
        } else {
            let mut c = Command::new("sh");
            c.arg("-c").arg(&self.build_cmd);
            c
        };
        cmd.current_dir(&self.source)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        cmd
    }
}

impl Site for CommandSite {
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
        debug!(target: BUILD_TARGET, cmd = %self.build_cmd, "running build command");

        let output = self.shell_command().output()?;

        for line in String::from_utf8_lossy(&output.stdout).lines() {
            info!(target: BUILD_TARGET, "{}", line);
        }
        let stderr = String::from_utf8_lossy(&output.stderr);
        for line in stderr.lines() {
            debug!(target: BUILD_TARGET, "stderr: {}", line);
        }

        if output.status.success() {
            return Ok(());
        }

        let lines: Vec<&str> = stderr.lines().filter(|l| !l.trim().is_empty()).collect();
        let tail = lines[lines.len().saturating_sub(STDERR_TAIL_LINES)..].join("\n");
        Err(BuildError::CommandFailed {
            code: output.status.code().unwrap_or(-1),
            detail: if tail.is_empty() {
                "no error output".to_string()
            } else {
                tail
            },
        })
    }
}
