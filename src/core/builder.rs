//! Target builds
//!
//! Runs the external build engine once per selected target, inside the
//! environment set up by the layer tree's init script. Targets are built one
//! after the other and the first failure stops the run.

use std::path::{Path, PathBuf};

use crate::config::defaults::{BUILD_ENGINE, INIT_SCRIPT, SHELL};
use crate::core::context::Context;
use crate::core::menu::{Menu, Target};
use crate::core::project::ProjectConfig;
use crate::error::{BuildError, CookerError};
use crate::infra::process::{shell_quote, ExternalCommand, OutputMode};

/// Build step run by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildStep {
    /// Build the image itself
    Image,
    /// Populate the SDK for the image
    Sdk,
}

/// Pick the targets to build.
///
/// An empty selection means every target in menu order. Any unknown name
/// fails the whole selection.
pub fn select_targets<'m>(
    menu: &'m Menu,
    selection: &[String],
) -> Result<Vec<(&'m str, &'m Target)>, BuildError> {
    if selection.is_empty() {
        return Ok(menu.targets.iter().collect());
    }

    selection
        .iter()
        .map(|name| {
            menu.targets
                .iter()
                .find(|(n, _)| *n == name.as_str())
                .ok_or_else(|| BuildError::MissingTarget { name: name.clone() })
        })
        .collect()
}

/// Path of the build environment init script
pub fn init_script(config: &ProjectConfig) -> PathBuf {
    config.layer_path(INIT_SCRIPT)
}

/// Command a user runs to enter the build environment of `build_dir`
pub fn environment_command(config: &ProjectConfig, build_dir: &Path) -> String {
    format!(
        ". {} {}",
        shell_quote(&init_script(config).display().to_string()),
        shell_quote(&build_dir.display().to_string())
    )
}

/// Engine invocation for one build step.
///
/// The init script must be sourced, so the engine runs under a shell; the
/// script, build directory and image travel as positional parameters and
/// are never spliced into the script text.
pub fn build_command(
    config: &ProjectConfig,
    build_dir: &Path,
    image: &str,
    step: BuildStep,
) -> ExternalCommand {
    let engine = match step {
        BuildStep::Image => BUILD_ENGINE.to_string(),
        BuildStep::Sdk => format!("{BUILD_ENGINE} -c populate_sdk"),
    };
    let script = init_script(config);
    let mut cmd = ExternalCommand::new(SHELL)
        .arg("-c")
        .arg(format!(r#". "$1" "$2" > /dev/null && {engine} "$3""#))
        .arg("cooker")
        .path_arg(&script)
        .path_arg(build_dir)
        .arg(image);
    if let Some(parent) = script.parent() {
        cmd = cmd.current_dir(parent);
    }
    cmd
}

/// Build the selected targets, optionally with their SDK.
///
/// Returns the names of the targets built.
pub fn build_targets(
    ctx: &Context<'_>,
    menu: &Menu,
    config: &ProjectConfig,
    selection: &[String],
    sdk: bool,
) -> Result<Vec<String>, CookerError> {
    let targets = select_targets(menu, selection)?;

    let mut built = Vec::with_capacity(targets.len());
    for (name, target) in targets {
        build_target(ctx, config, name, target, sdk)?;
        built.push(name.to_string());
    }
    Ok(built)
}

/// Build one target
pub fn build_target(
    ctx: &Context<'_>,
    config: &ProjectConfig,
    name: &str,
    target: &Target,
    sdk: bool,
) -> Result<(), CookerError> {
    let script = init_script(config);
    if !script.is_file() {
        return Err(BuildError::MissingInitScript {
            target: name.to_string(),
            path: script,
        }
        .into());
    }

    let build_dir = config.target_build_dir(name);
    let image = target.image();

    let mut steps = vec![BuildStep::Image];
    if sdk {
        steps.push(BuildStep::Sdk);
    }

    for step in steps {
        tracing::info!("Building {image} ({step:?}) for target {name}");
        let cmd = build_command(config, &build_dir, image, step);
        ctx.runner
            .check(&cmd, OutputMode::Inherit)
            .map_err(|source| BuildError::BuildFailed {
                target: name.to_string(),
                source,
            })?;
    }
    Ok(())
}
