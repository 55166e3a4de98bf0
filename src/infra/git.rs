//! Git operations
//!
//! Clones repositories, checks out refs and pulls updates by driving the
//! `git` client through a [`CommandRunner`].

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::defaults::GIT;
use crate::infra::process::{CommandRunner, ExternalCommand, OutputMode, ProcessError};

/// Git operation errors
#[derive(Error, Debug)]
pub enum GitError {
    /// Failed to clone repository
    #[error("Failed to clone '{url}' into '{dir}': {source}")]
    CloneFailed {
        url: String,
        dir: PathBuf,
        #[source]
        source: ProcessError,
    },

    /// Failed to checkout ref
    #[error("Failed to checkout '{reference}' in '{dir}': {source}")]
    CheckoutFailed {
        dir: PathBuf,
        reference: String,
        #[source]
        source: ProcessError,
    },

    /// Source directory is missing and there is nothing to clone it from
    #[error("Source directory '{dir}' does not exist and the source has no 'url' to clone from")]
    NoRemote { dir: PathBuf },

    /// Failed to pull updates
    #[error("Failed to pull updates in '{dir}': {source}")]
    PullFailed {
        dir: PathBuf,
        #[source]
        source: ProcessError,
    },
}

/// Git repository operations
pub struct GitOperations<'a> {
    runner: &'a dyn CommandRunner,
    mode: OutputMode,
}

impl<'a> GitOperations<'a> {
    /// Create a new git operations handler
    pub fn new(runner: &'a dyn CommandRunner, mode: OutputMode) -> Self {
        Self { runner, mode }
    }

    /// Clone `url` into `dir`
    pub fn clone_repo(&self, url: &str, dir: &Path) -> Result<(), GitError> {
        let cmd = ExternalCommand::new(GIT).arg("clone").arg(url).path_arg(dir);
        self.runner
            .check(&cmd, self.mode)
            .map_err(|source| GitError::CloneFailed {
                url: url.to_string(),
                dir: dir.to_path_buf(),
                source,
            })
    }

    /// Checkout `reference` (branch, tag or commit) in `dir`
    pub fn checkout(&self, reference: &str, dir: &Path) -> Result<(), GitError> {
        let cmd = ExternalCommand::new(GIT)
            .arg("checkout")
            .arg(reference)
            .current_dir(dir);
        self.runner
            .check(&cmd, self.mode)
            .map_err(|source| GitError::CheckoutFailed {
                dir: dir.to_path_buf(),
                reference: reference.to_string(),
                source,
            })
    }

    /// Pull the current branch in `dir`
    pub fn pull(&self, dir: &Path) -> Result<(), GitError> {
        let cmd = ExternalCommand::new(GIT).arg("pull").current_dir(dir);
        self.runner
            .check(&cmd, self.mode)
            .map_err(|source| GitError::PullFailed {
                dir: dir.to_path_buf(),
                source,
            })
    }
}
