//! Command-line interface module
//!
//! This module handles argument parsing and output formatting.
//! It contains no business logic - that belongs in the [`crate::core`] module.

pub mod commands;
pub mod output;

use std::path::Path;

use anyhow::Result;
use clap::Parser;

use crate::core::context::Verbosity;
use commands::{Commands, Invocation};

/// Cooker - menu-driven Yocto project setup and builds
///
/// Fetches the layers a menu lists, generates one build directory per
/// target and runs the build engine for each of them.
#[derive(Parser, Debug)]
#[command(name = "cooker")]
#[command(author, version, about, long_about = None)]
#[command(long_version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("VERGEN_GIT_SHA"), ")"))]
#[command(propagate_version = true)]
pub struct Cli {
    /// Show debug output, including every external command
    #[arg(long, global = true)]
    pub debug: bool,

    /// Show progress and the output of external tools
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print external commands instead of running them
    #[arg(short = 'n', long, global = true)]
    pub dry_run: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Verbosity selected by the global flags
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.verbose, self.debug)
    }

    /// Execute the CLI command from working directory `cwd`
    pub fn run(self, cwd: &Path) -> Result<()> {
        let invocation = Invocation {
            cwd: cwd.to_path_buf(),
            verbosity: self.verbosity(),
            dry_run: self.dry_run,
        };
        self.command.run(&invocation)
    }
}
