//! Core business logic module
//!
//! This module contains the project state machine: the operations that turn
//! a menu plus the persisted project configuration into a directory layout,
//! generated config files and builds. Side effects go through
//! [`crate::infra`].
//!
//! # Submodules
//!
//! - [`project`] - Project configuration (`.cooker.config`) discovery and persistence
//! - [`menu`] - Menu model and loading
//! - [`context`] - Per-invocation verbosity and command runner
//! - [`sync`] - Source synchronization
//! - [`generate`] - Build directory generation
//! - [`builder`] - Target builds
//! - [`info`] - Target information

pub mod builder;
pub mod context;
pub mod generate;
pub mod info;
pub mod menu;
pub mod project;
pub mod sync;
