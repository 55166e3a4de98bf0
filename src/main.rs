//! Cooker CLI - menu-driven Yocto project setup and builds
//!
//! Entry point for the cooker command-line application.

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cooker::cli::output::display_error;
use cooker::cli::Cli;
use cooker::core::context::Verbosity;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let verbosity = cli.verbosity();

    // Warnings are always shown; -v and --debug widen the filter
    let level = match verbosity {
        Verbosity::Normal => tracing::Level::WARN,
        Verbosity::Verbose => tracing::Level::INFO,
        Verbosity::Debug => tracing::Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(level.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let cwd = std::env::current_dir().context("Failed to determine current directory")?;

    match cli.run(&cwd) {
        Ok(()) => Ok(()),
        Err(e) => {
            display_error(&e, verbosity == Verbosity::Debug);
            std::process::exit(1);
        }
    }
}
