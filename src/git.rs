// src/git.rs
use std::path::PathBuf;
use std::process::{Command, Output};

use tracing::debug;

use crate::error::{Result, WhisperError};

// =============================================================================
// DIFF SOURCE
// =============================================================================

/// Where staged changes come from and where the final commit goes.
pub trait DiffSource {
    /// True iff the working directory is inside a work tree. Never fails.
    fn is_repository(&self) -> bool;

    /// Trimmed diff of the staged changes; empty when nothing is staged.
    fn staged_diff(&self) -> Result<String>;

    /// Commit the staged changes with `message`, passed through verbatim.
    fn commit(&self, message: &str) -> Result<()>;
}

/// [`DiffSource`] backed by the `git` executable.
#[derive(Debug, Default, Clone)]
pub struct GitCli {
    workdir: Option<PathBuf>,
}

impl GitCli {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run every git command inside `dir` instead of the process cwd.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self { workdir: Some(dir.into()) }
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new("git");
        cmd.args(args);
        if let Some(dir) = &self.workdir {
            cmd.current_dir(dir);
        }
        cmd
    }

    fn run(&self, args: &[&str]) -> Result<Output> {
        debug!(?args, "running git");
        self.command(args).output().map_err(WhisperError::GitUnavailable)
    }
}

/// stdout followed by stderr, lossily decoded.
fn combined_output(output: &Output) -> String {
    let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
    text.push_str(&String::from_utf8_lossy(&output.stderr));
    text
}

impl DiffSource for GitCli {
    fn is_repository(&self) -> bool {
        self.command(&["rev-parse", "--is-inside-work-tree"])
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }

    fn staged_diff(&self) -> Result<String> {
        let output = self.run(&["diff", "--staged"])?;
        let text = combined_output(&output);
        if !output.status.success() {
            return Err(WhisperError::DiffRetrievalFailed {
                status: output.status.to_string(),
                output: text,
            });
        }
        Ok(text.trim().to_string())
    }

    fn commit(&self, message: &str) -> Result<()> {
        let output = self.run(&["commit", "-m", message])?;
        if !output.status.success() {
            return Err(WhisperError::CommitFailed {
                status: output.status.to_string(),
                output: combined_output(&output),
            });
        }
        debug!(output = %combined_output(&output).trim(), "git commit succeeded");
        Ok(())
    }
}
