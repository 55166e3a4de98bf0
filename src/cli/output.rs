//! Output formatting and progress indicators
//!
//! This module provides utilities for displaying spinners and formatted
//! status messages to the user. Diagnostics go through `tracing`; these
//! helpers are for the results a command reports.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Create a spinner for operations with unknown duration
pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
        .template("{spinner:.blue} {msg}")
    {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

/// Status message prefixes
pub mod status {
    /// Success prefix (green checkmark)
    pub const SUCCESS: &str = "✓";

    /// Warning prefix (yellow triangle)
    pub const WARNING: &str = "⚠";

    /// Detail prefix
    pub const DETAIL: &str = "→";
}

/// Print a success line
pub fn print_success(message: &str) {
    println!("{} {message}", status::SUCCESS);
}

/// Print an indented detail line
pub fn print_detail(message: &str) {
    println!("  {} {message}", status::DETAIL);
}

/// Print a warning line to stderr
pub fn print_warning(message: &str) {
    eprintln!("{} {message}", status::WARNING);
}

/// Report a fatal error.
///
/// Prints the error and its causes on one line, or the full debug chain
/// when `debug` is set.
pub fn display_error(err: &anyhow::Error, debug: bool) {
    if debug {
        eprintln!("FATAL: {err:?}");
    } else {
        eprintln!("FATAL: {err:#}");
    }
}
