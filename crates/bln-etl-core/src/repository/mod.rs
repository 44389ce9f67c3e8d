//! Thin wrapper over the `git` command line.
//!
//! A [`Repository`] is a guard: entering it creates the directory if needed
//! and makes it the process working directory; dropping it restores the
//! previous one. The working directory is process-wide, so only one guard
//! should be alive at a time.

mod runner;

pub use runner::GitRunner;
pub use runner::SystemGit;

#[cfg(test)]
pub(crate) use runner::MockGitRunner;

use crate::Result;
use std::path::Path;
use std::path::PathBuf;

/// Default remote name.
pub const DEFAULT_REMOTE: &str = "origin";

/// Default branch pushed by [`Repository::push_default`].
pub const DEFAULT_BRANCH: &str = "main";

/// A local git repository entered as the working directory.
///
/// # Examples
///
/// ```no_run
/// use bln_etl_core::repository::Repository;
///
/// let repo = Repository::enter("/tmp/etl-output")?;
/// if !repo.initialized() {
///     repo.init()?;
/// }
/// repo.add()?;
/// repo.commit("Nightly export")?;
/// # Ok::<(), bln_etl_core::Error>(())
/// ```
#[derive(Debug)]
pub struct Repository<G: GitRunner = SystemGit> {
    path: PathBuf,
    previous_dir: PathBuf,
    runner: G,
}

impl Repository<SystemGit> {
    /// Enters `path` using the system `git`.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the directory cannot be created or entered.
    pub fn enter(path: impl AsRef<Path>) -> Result<Self> {
        Self::enter_with(path, SystemGit)
    }

    /// Clones `url` into `dir`, relative to the current directory.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Command`](crate::Error::Command) if `git clone`
    /// fails.
    pub fn clone_to_dir(url: &str, dir: impl AsRef<Path>) -> Result<String> {
        clone_into(&SystemGit, Path::new("."), url, dir.as_ref())
    }
}

impl<G: GitRunner> Repository<G> {
    /// Enters `path` using `runner` for git commands.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the directory cannot be created or entered.
    pub fn enter_with(path: impl AsRef<Path>, runner: G) -> Result<Self> {
        let previous_dir = std::env::current_dir()?;
        std::fs::create_dir_all(path.as_ref())?;
        let path = path.as_ref().canonicalize()?;
        std::env::set_current_dir(&path)?;

        tracing::debug!(
            path = %path.display(),
            previous = %previous_dir.display(),
            "entered repository directory"
        );

        Ok(Self {
            path,
            previous_dir,
            runner,
        })
    }

    /// Absolute repository directory.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the directory contains a `.git` entry.
    #[must_use]
    pub fn initialized(&self) -> bool {
        self.path.join(".git").exists()
    }

    /// `git init`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Command`](crate::Error::Command) on failure, as do
    /// all other commands.
    pub fn init(&self) -> Result<String> {
        self.git(&["init"])
    }

    /// `git clone <url> .`
    ///
    /// # Errors
    ///
    /// See [`init`](Self::init).
    #[allow(clippy::should_implement_trait)]
    pub fn clone(&self, url: &str) -> Result<String> {
        clone_into(&self.runner, &self.path, url, Path::new("."))
    }

    /// `git add .`
    ///
    /// # Errors
    ///
    /// See [`init`](Self::init).
    pub fn add(&self) -> Result<String> {
        self.git(&["add", "."])
    }

    /// `git commit -m <message>`
    ///
    /// # Errors
    ///
    /// See [`init`](Self::init).
    pub fn commit(&self, message: &str) -> Result<String> {
        self.git(&["commit", "-m", message])
    }

    /// `git remote add <name> <url>`
    ///
    /// # Errors
    ///
    /// See [`init`](Self::init).
    pub fn add_remote(&self, url: &str, name: &str) -> Result<String> {
        self.git(&["remote", "add", name, url])
    }

    /// `git push -u <remote> <branch>`
    ///
    /// # Errors
    ///
    /// See [`init`](Self::init).
    pub fn push(&self, remote: &str, branch: &str) -> Result<String> {
        self.git(&["push", "-u", remote, branch])
    }

    /// `git push -u origin main`
    ///
    /// # Errors
    ///
    /// See [`init`](Self::init).
    pub fn push_default(&self) -> Result<String> {
        self.push(DEFAULT_REMOTE, DEFAULT_BRANCH)
    }

    /// `git pull`
    ///
    /// # Errors
    ///
    /// See [`init`](Self::init).
    pub fn pull(&self) -> Result<String> {
        self.git(&["pull"])
    }

    fn git(&self, args: &[&str]) -> Result<String> {
        let args: Vec<String> = args.iter().map(ToString::to_string).collect();
        self.runner.run(&self.path, &args)
    }
}

impl<G: GitRunner> Drop for Repository<G> {
    fn drop(&mut self) {
        if let Err(e) = std::env::set_current_dir(&self.previous_dir) {
            tracing::warn!(
                error = %e,
                previous = %self.previous_dir.display(),
                "failed to restore working directory"
            );
        }
    }
}

fn clone_into<G: GitRunner>(runner: &G, cwd: &Path, url: &str, dir: &Path) -> Result<String> {
    let args = vec![
        "clone".to_string(),
        url.to_string(),
        dir.to_string_lossy().into_owned(),
    ];
    runner.run(cwd, &args)
}
