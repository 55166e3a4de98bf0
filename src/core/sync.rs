//! Source synchronization
//!
//! Brings every source listed in the menu into the layer directory:
//! missing sources are cloned, then each present source is moved to the
//! ref the menu asks for.
//!
//! The ref policy, evaluated once per source directory:
//!
//! - `commit` set: checkout that commit, never pull.
//! - only `branch` set: checkout the branch, then pull if there is a remote.
//! - neither set: pull if there is a remote, otherwise leave it.
//!
//! A directory that already exists is never re-cloned, and a missing one
//! without a `url` is an error. Sources not pinned to a commit get a
//! reproducibility warning.

use std::path::PathBuf;

use crate::core::context::Context;
use crate::core::menu::{Menu, Method, Reproducibility, Source};
use crate::core::project::ProjectConfig;
use crate::error::CookerError;
use crate::infra::git::{GitError, GitOperations};

/// What happened to one source
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncStatus {
    /// Method `ignore`: nothing touched
    Ignored,
    /// Cloned during this run, then updated
    Cloned,
    /// Already present, updated in place
    Updated,
    /// Clone was requested but the directory is still absent (dry run)
    Absent,
}

/// Result of synchronizing one source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOutcome {
    pub name: String,
    pub dir: Option<PathBuf>,
    pub status: SyncStatus,
    pub reproducibility: Reproducibility,
}

impl SyncOutcome {
    /// Whether this source should be reported as not reproducible
    pub fn is_reproducible(&self) -> bool {
        self.status == SyncStatus::Ignored || self.reproducibility == Reproducibility::Pinned
    }
}

/// Synchronize every source of `menu`, in listed order.
///
/// Reproducibility advisories for a source are logged before its sync
/// starts. `step` receives the source and a closure performing the sync,
/// so callers can wrap each source with progress display; pass
/// `|_, sync| sync()` to run it as is. Stops at the first failing source.
pub fn sync_all<F>(
    ctx: &Context<'_>,
    menu: &Menu,
    config: &ProjectConfig,
    mut step: F,
) -> Result<Vec<SyncOutcome>, CookerError>
where
    F: FnMut(
        &Source,
        &dyn Fn() -> Result<SyncOutcome, CookerError>,
    ) -> Result<SyncOutcome, CookerError>,
{
    let mut outcomes = Vec::with_capacity(menu.sources.len());
    for source in &menu.sources {
        warn_reproducibility(source);
        outcomes.push(step(source, &|| sync_source(ctx, source, config))?);
    }
    Ok(outcomes)
}

fn warn_reproducibility(source: &Source) {
    if source.method == Method::Ignore {
        return;
    }
    let name = source.name();
    match (source.reproducibility(), source.branch()) {
        (Reproducibility::Branch, Some(branch)) => tracing::warn!(
            "Source {name} follows branch '{branch}' without a commit: not fully reproducible"
        ),
        (Reproducibility::Unpinned, _) => {
            tracing::warn!("Source {name} has neither branch nor commit: not reproducible at all")
        }
        _ => {}
    }
}

/// Synchronize a single source
pub fn sync_source(
    ctx: &Context<'_>,
    source: &Source,
    config: &ProjectConfig,
) -> Result<SyncOutcome, CookerError> {
    let name = source.name();
    let reproducibility = source.reproducibility();

    if source.method == Method::Ignore {
        tracing::info!("Ignoring source {name}");
        return Ok(SyncOutcome {
            name,
            dir: None,
            status: SyncStatus::Ignored,
            reproducibility,
        });
    }

    let Some(relative) = source.local_dir() else {
        // Menu::validate rejects these; nothing sensible to touch
        tracing::warn!("Source {name} has no local directory, skipping");
        return Ok(SyncOutcome {
            name,
            dir: None,
            status: SyncStatus::Absent,
            reproducibility,
        });
    };
    let dir = config.layer_path(relative);
    let git = GitOperations::new(ctx.runner, ctx.output_mode());

    let mut status = SyncStatus::Updated;
    if !dir.exists() {
        let Some(url) = source.url() else {
            return Err(GitError::NoRemote { dir }.into());
        };
        tracing::info!("Cloning {url} into {}", dir.display());
        git.clone_repo(url, &dir)?;
        status = SyncStatus::Cloned;
    }

    if !dir.exists() {
        return Ok(SyncOutcome {
            name,
            dir: Some(dir),
            status: SyncStatus::Absent,
            reproducibility,
        });
    }

    match (source.commit(), source.branch()) {
        (Some(commit), _) => {
            tracing::info!("Checking out commit {commit} in {}", dir.display());
            git.checkout(commit, &dir)?;
        }
        (None, Some(branch)) => {
            tracing::info!("Checking out branch {branch} in {}", dir.display());
            git.checkout(branch, &dir)?;
            if source.url().is_some() {
                git.pull(&dir)?;
            }
        }
        (None, None) => {
            if source.url().is_some() {
                git.pull(&dir)?;
            }
        }
    }

    Ok(SyncOutcome {
        name,
        dir: Some(dir),
        status,
        reproducibility,
    })
}
