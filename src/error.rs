//! Error types for cooker
//!
//! Domain-specific error types using thiserror.

use std::path::PathBuf;
use thiserror::Error;

use crate::infra::git::GitError;
use crate::infra::process::ProcessError;

/// Project configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file is not valid JSON
    #[error("Failed to load project config '{path}': {error}")]
    Load { path: PathBuf, error: String },

    /// Config cannot be serialized
    #[error("Failed to save project config '{path}': {error}")]
    Save { path: PathBuf, error: String },

    /// Config file cannot be read or written
    #[error(transparent)]
    File(#[from] FilesystemError),

    /// Project already has a menu recorded
    #[error("Project in '{path}' is already initialized. Use --force to overwrite its configuration")]
    AlreadyInitialized { path: PathBuf },

    /// Command needs a menu but none is recorded
    #[error("No menu recorded for project in '{path}'. Run 'cooker init <menu>' first")]
    NotInitialized { path: PathBuf },
}

/// Menu loading errors
#[derive(Error, Debug)]
pub enum MenuError {
    /// Menu file cannot be read
    #[error(transparent)]
    Read(#[from] FilesystemError),

    /// Menu file is not a valid menu document
    #[error("Failed to parse menu '{path}': {error}")]
    Parse { path: PathBuf, error: String },

    /// Menu parsed but a source cannot be resolved to a local directory
    #[error("Invalid source #{index} in menu '{path}': {reason}")]
    InvalidSource {
        path: PathBuf,
        index: usize,
        reason: String,
    },
}

/// Build errors
#[derive(Error, Debug)]
pub enum BuildError {
    /// Requested target is absent from the menu
    #[error("Target '{name}' not found in menu")]
    MissingTarget { name: String },

    /// Build environment script is missing from the layer tree
    #[error(
        "Cannot build target '{target}': environment script not found at '{path}'. Run 'cooker update' first"
    )]
    MissingInitScript { target: String, path: PathBuf },

    /// Build engine failed for a target
    #[error("Build failed for target '{target}': {source}")]
    BuildFailed {
        target: String,
        #[source]
        source: ProcessError,
    },
}

/// Filesystem errors
#[derive(Error, Debug)]
pub enum FilesystemError {
    /// Failed to create directory
    #[error("Failed to create directory '{path}': {error}")]
    CreateDir { path: PathBuf, error: String },

    /// Failed to write file
    #[error("Failed to write file '{path}': {error}")]
    WriteFile { path: PathBuf, error: String },

    /// Failed to read file
    #[error("Failed to read file '{path}': {error}")]
    ReadFile { path: PathBuf, error: String },
}

/// Top-level cooker error type
#[derive(Error, Debug)]
pub enum CookerError {
    /// Project configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Menu error
    #[error(transparent)]
    Menu(#[from] MenuError),

    /// Source synchronization error
    #[error(transparent)]
    Git(#[from] GitError),

    /// Build error
    #[error(transparent)]
    Build(#[from] BuildError),

    /// Filesystem error
    #[error(transparent)]
    Filesystem(#[from] FilesystemError),

    /// External process error
    #[error(transparent)]
    Process(#[from] ProcessError),
}
