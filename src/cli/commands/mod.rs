//! CLI command implementations
//!
//! Each command is implemented in its own submodule.

pub mod build;
pub mod cook;
pub mod generate;
pub mod init;
pub mod prepare;
pub mod target_info;
pub mod update;

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use clap::Subcommand;

use crate::core::context::{Context, Verbosity};
use crate::core::menu::Menu;
use crate::core::project::ProjectConfig;
use crate::infra::paths::resolve_against;
use crate::infra::process::{CommandRunner, DryRunRunner, SystemRunner};

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a project from a menu
    Init {
        /// Overwrite an existing project configuration
        #[arg(short, long)]
        force: bool,

        /// Directory for layer sources (default: layers)
        #[arg(short, long)]
        layer_dir: Option<PathBuf>,

        /// Directory for build directories (default: builds)
        #[arg(short, long)]
        build_dir: Option<PathBuf>,

        /// Menu file
        menu: PathBuf,
    },

    /// Clone or update all menu sources
    Update,

    /// Generate build directories for all menu targets
    Generate,

    /// Record a menu, then update sources and generate build directories
    Prepare {
        /// Menu file
        menu: PathBuf,
    },

    /// Prepare a menu, then build its targets
    Cook {
        /// Menu file
        menu: PathBuf,

        /// Targets to build (all if none given)
        targets: Vec<String>,
    },

    /// Build targets of the current menu
    Build {
        /// Also build the SDK of each target
        #[arg(short, long)]
        sdk: bool,

        /// Targets to build (all if none given)
        targets: Vec<String>,
    },

    /// Show build directories and environment commands of all targets
    TargetInfo,
}

static SYSTEM_RUNNER: SystemRunner = SystemRunner;
static DRY_RUN_RUNNER: DryRunRunner = DryRunRunner;

/// Settings shared by every command of one invocation
#[derive(Debug, Clone)]
pub struct Invocation {
    /// Directory the tool was started in
    pub cwd: PathBuf,
    pub verbosity: Verbosity,
    pub dry_run: bool,
}

impl Invocation {
    /// Command runner for this invocation
    pub fn runner(&self) -> &'static dyn CommandRunner {
        if self.dry_run {
            &DRY_RUN_RUNNER
        } else {
            &SYSTEM_RUNNER
        }
    }

    /// Component context for this invocation
    pub fn context(&self) -> Context<'static> {
        Context::new(self.verbosity, self.runner())
    }

    /// Find the project configuration for the working directory
    pub fn project(&self) -> Result<ProjectConfig> {
        let config = ProjectConfig::discover(&self.cwd)?;
        tracing::debug!("Project root: {}", config.project_root().display());
        Ok(config)
    }

    /// Absolute form of a path given on the command line
    pub fn absolute(&self, path: &Path) -> PathBuf {
        resolve_against(&self.cwd, path)
    }
}

/// Load the menu recorded in `config`
pub fn load_menu(config: &ProjectConfig) -> Result<Menu> {
    let path = config.require_menu()?;
    Menu::load(path).with_context(|| "Failed to load menu")
}

impl Commands {
    /// Execute the command
    pub fn run(self, invocation: &Invocation) -> Result<()> {
        match self {
            Self::Init {
                force,
                layer_dir,
                build_dir,
                menu,
            } => init::execute(
                invocation,
                &menu,
                layer_dir.as_deref(),
                build_dir.as_deref(),
                force,
            ),
            Self::Update => update::execute(invocation),
            Self::Generate => generate::execute(invocation),
            Self::Prepare { menu } => prepare::execute(invocation, &menu),
            Self::Cook { menu, targets } => cook::execute(invocation, &menu, &targets),
            Self::Build { sdk, targets } => build::execute(invocation, &targets, sdk),
            Self::TargetInfo => target_info::execute(invocation),
        }
    }
}
