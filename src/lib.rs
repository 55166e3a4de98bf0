//! Cooker - menu-driven Yocto project setup and builds
//!
//! This library reads a JSON menu describing layer sources and build
//! targets, fetches the sources, generates one build directory per target
//! and drives the external build engine.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`cli`] - Command-line interface parsing and output formatting
//! - [`core`] - Business logic: project config, menu, sync, generation, builds
//! - [`infra`] - Infrastructure layer (filesystem, external processes, git)
//! - [`config`] - Configuration constants
//! - [`error`] - Error types and handling

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod infra;
