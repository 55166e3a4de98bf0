//! CLI implementation for `cooker target-info` command

use anyhow::Result;

use super::{load_menu, Invocation};
use crate::core::info::target_info;

/// Execute the target-info command
pub fn execute(invocation: &Invocation) -> Result<()> {
    let config = invocation.project()?;
    let menu = load_menu(&config)?;

    for info in target_info(&menu, &config) {
        println!("{} ({})", info.name, info.image);
        println!("  build dir: {}", info.build_dir.display());
        println!("  environment: {}", info.env_command);
    }
    Ok(())
}
