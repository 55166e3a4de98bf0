//! Run context
//!
//! Carries what every component needs to know about the current
//! invocation: how chatty to be and how external commands are run.

use crate::infra::process::{CommandRunner, OutputMode};

/// Diagnostic verbosity of an invocation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    /// Warnings and errors only; external tool output hidden
    #[default]
    Normal,
    /// Progress messages; external tool output shown
    Verbose,
    /// Everything, including each command line
    Debug,
}

impl Verbosity {
    pub fn from_flags(verbose: bool, debug: bool) -> Self {
        if debug {
            Self::Debug
        } else if verbose {
            Self::Verbose
        } else {
            Self::Normal
        }
    }
}

/// Per-invocation settings passed to every component
pub struct Context<'a> {
    pub verbosity: Verbosity,
    pub runner: &'a dyn CommandRunner,
}

impl<'a> Context<'a> {
    pub fn new(verbosity: Verbosity, runner: &'a dyn CommandRunner) -> Self {
        Self { verbosity, runner }
    }

    /// Output handling for external tools at this verbosity
    pub fn output_mode(&self) -> OutputMode {
        if self.verbosity >= Verbosity::Verbose {
            OutputMode::Inherit
        } else {
            OutputMode::Capture
        }
    }
}

impl std::fmt::Debug for Context<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("verbosity", &self.verbosity)
            .finish_non_exhaustive()
    }
}
