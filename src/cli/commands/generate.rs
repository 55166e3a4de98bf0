//! CLI implementation for `cooker generate` command

use anyhow::{Context as _, Result};

use super::{load_menu, Invocation};
use crate::cli::output::{print_detail, print_success};
use crate::core::generate::generate_all;
use crate::core::menu::Menu;
use crate::core::project::ProjectConfig;

/// Execute the generate command
pub fn execute(invocation: &Invocation) -> Result<()> {
    let config = invocation.project()?;
    let menu = load_menu(&config)?;
    run(&menu, &config)
}

/// Generate the build directories of `menu` and report them
pub fn run(menu: &Menu, config: &ProjectConfig) -> Result<()> {
    let generated =
        generate_all(menu, config).with_context(|| "Failed to generate build directories")?;

    print_success(&format!("Generated {} build directories", generated.len()));
    for target in &generated {
        print_detail(&format!("{}: {}", target.name, target.build_dir.display()));
    }
    Ok(())
}
