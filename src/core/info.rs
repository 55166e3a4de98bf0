//! Target information
//!
//! Describes, for each target, where its build directory is and how to
//! enter its build environment by hand.

use std::path::PathBuf;

use crate::core::builder::environment_command;
use crate::core::menu::Menu;
use crate::core::project::ProjectConfig;

/// Where a target builds and how to get there
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetInfo {
    pub name: String,
    pub image: String,
    pub build_dir: PathBuf,
    pub env_command: String,
}

/// Information for every target, in menu order
pub fn target_info(menu: &Menu, config: &ProjectConfig) -> Vec<TargetInfo> {
    menu.targets
        .iter()
        .map(|(name, target)| {
            let build_dir = config.target_build_dir(name);
            TargetInfo {
                name: name.to_string(),
                image: target.image().to_string(),
                env_command: environment_command(config, &build_dir),
                build_dir,
            }
        })
        .collect()
}
