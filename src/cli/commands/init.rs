//! CLI implementation for `cooker init` command
//!
//! Records the menu and directory layout of a project.

use std::path::Path;

use anyhow::{Context as _, Result};

use super::Invocation;
use crate::cli::output::{print_detail, print_success};
use crate::core::menu::Menu;

/// Execute the init command
pub fn execute(
    invocation: &Invocation,
    menu: &Path,
    layer_dir: Option<&Path>,
    build_dir: Option<&Path>,
    force: bool,
) -> Result<()> {
    let mut config = invocation.project()?;
    let menu = invocation.absolute(menu);

    config.init(&menu, layer_dir, build_dir, force)?;
    Menu::load(&menu).with_context(|| "Failed to load menu")?;
    config.save()?;

    print_success(&format!(
        "Initialized cooker project in {}",
        config.project_root().display()
    ));
    print_detail(&format!("Menu: {}", menu.display()));
    print_detail(&format!("Layers: {}", config.layer_dir().display()));
    print_detail(&format!("Builds: {}", config.build_dir().display()));
    Ok(())
}
