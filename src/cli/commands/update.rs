//! CLI implementation for `cooker update` command
//!
//! Clones missing sources and moves every source to its configured ref.

use anyhow::Result;

use super::{load_menu, Invocation};
use crate::cli::output::{create_spinner, print_detail, print_success, print_warning};
use crate::core::context::{Context, Verbosity};
use crate::core::menu::Menu;
use crate::core::project::ProjectConfig;
use crate::core::sync::{sync_all, SyncOutcome, SyncStatus};

/// Execute the update command
pub fn execute(invocation: &Invocation) -> Result<()> {
    let config = invocation.project()?;
    let menu = load_menu(&config)?;
    run(&invocation.context(), &menu, &config)
}

/// Synchronize all sources of `menu` and report the result
pub fn run(ctx: &Context<'_>, menu: &Menu, config: &ProjectConfig) -> Result<()> {
    let outcomes = sync_all(ctx, menu, config, |source, sync| {
        if ctx.verbosity != Verbosity::Normal {
            return sync();
        }
        let spinner = create_spinner(&format!("Syncing {}", source.name()));
        let result = sync();
        spinner.finish_and_clear();
        result
    })?;

    report(&outcomes);
    Ok(())
}

fn report(outcomes: &[SyncOutcome]) {
    let cloned = outcomes
        .iter()
        .filter(|o| o.status == SyncStatus::Cloned)
        .count();
    print_success(&format!(
        "Synchronized {} sources ({cloned} cloned)",
        outcomes.len()
    ));
    for outcome in outcomes {
        match outcome.status {
            SyncStatus::Ignored => print_detail(&format!("{} (ignored)", outcome.name)),
            SyncStatus::Absent => print_detail(&format!("{} (not present)", outcome.name)),
            SyncStatus::Cloned | SyncStatus::Updated => print_detail(&outcome.name),
        }
    }

    let unpinned: Vec<&str> = outcomes
        .iter()
        .filter(|o| !o.is_reproducible())
        .map(|o| o.name.as_str())
        .collect();
    if !unpinned.is_empty() {
        print_warning(&format!(
            "{} source(s) not pinned to a commit: {}",
            unpinned.len(),
            unpinned.join(", ")
        ));
    }
}
