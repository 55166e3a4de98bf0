//! CLI implementation for `cooker cook` command
//!
//! `cook` = `prepare` + `build`.

use std::path::Path;

use anyhow::Result;

use super::{build, prepare, Invocation};

/// Execute the cook command
pub fn execute(invocation: &Invocation, menu: &Path, targets: &[String]) -> Result<()> {
    let (config, menu) = prepare::run(invocation, menu)?;
    build::run(&invocation.context(), &menu, &config, targets, false)
}
