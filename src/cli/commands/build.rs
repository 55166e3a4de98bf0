//! Build command implementation
//!
//! Implements `cooker build` to run the build engine for menu targets.

use anyhow::Result;

use super::{load_menu, Invocation};
use crate::cli::output::{print_detail, print_success};
use crate::core::builder::build_targets;
use crate::core::context::Context;
use crate::core::menu::Menu;
use crate::core::project::ProjectConfig;

/// Execute the build command
pub fn execute(invocation: &Invocation, targets: &[String], sdk: bool) -> Result<()> {
    let config = invocation.project()?;
    let menu = load_menu(&config)?;
    run(&invocation.context(), &menu, &config, targets, sdk)
}

/// Build `targets` (all when empty) and report them
pub fn run(
    ctx: &Context<'_>,
    menu: &Menu,
    config: &ProjectConfig,
    targets: &[String],
    sdk: bool,
) -> Result<()> {
    let built = build_targets(ctx, menu, config, targets, sdk)?;

    print_success(&format!("Built {} targets", built.len()));
    for name in &built {
        print_detail(&format!(
            "{name}: {}",
            config.target_build_dir(name).display()
        ));
    }
    Ok(())
}
