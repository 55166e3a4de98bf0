//! CLI implementation for `cooker prepare` command
//!
//! `prepare` = record menu + `update` + `generate`.

use std::path::Path;

use anyhow::Result;

use super::{generate, load_menu, update, Invocation};
use crate::core::menu::Menu;
use crate::core::project::ProjectConfig;

/// Execute the prepare command
pub fn execute(invocation: &Invocation, menu: &Path) -> Result<()> {
    run(invocation, menu).map(|_| ())
}

/// Record `menu`, sync sources, generate build directories.
///
/// Returns the project configuration and loaded menu for follow-up steps.
pub fn run(invocation: &Invocation, menu: &Path) -> Result<(ProjectConfig, Menu)> {
    let mut config = invocation.project()?;
    let menu_path = invocation.absolute(menu);

    if config.is_empty() {
        config.init(&menu_path, None, None, false)?;
    } else {
        config.set_menu(&menu_path);
    }
    config.save()?;

    let menu = load_menu(&config)?;
    update::run(&invocation.context(), &menu, &config)?;
    generate::run(&menu, &config)?;
    Ok((config, menu))
}
