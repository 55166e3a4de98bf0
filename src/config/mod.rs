//! Configuration and constants
//!
//! Fixed file names, default directory layout and generated-file content
//! shared by every command.

pub mod defaults;
