//! Execution of `git` subcommands.

use crate::Error;
use crate::Result;
use std::path::Path;
use std::process::Command;

/// Runs `git` with an argument vector.
///
/// [`SystemGit`] runs the real binary; tests substitute a mock to assert on
/// argument vectors without touching the network.
#[cfg_attr(test, mockall::automock)]
pub trait GitRunner {
    /// Runs `git <args>` in `dir` and returns its standard output.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Command`] on a non-zero exit and [`Error::Io`] if
    /// `git` cannot be launched.
    fn run(&self, dir: &Path, args: &[String]) -> Result<String>;
}

/// Runs the `git` found on `PATH`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemGit;

impl GitRunner for SystemGit {
    fn run(&self, dir: &Path, args: &[String]) -> Result<String> {
        let command = format!("git {}", args.join(" "));
        tracing::debug!(command = %command, dir = %dir.display(), "running git");

        let output = Command::new("git").args(args).current_dir(dir).output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            tracing::error!(
                command = %command,
                dir = %dir.display(),
                status = %output.status,
                "git exited with non-zero status"
            );
            return Err(Error::Command {
                command,
                status: output.status.to_string(),
                stderr,
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
