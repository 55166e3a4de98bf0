//! Common test utilities and helpers
//!
//! This module provides shared utilities for integration tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use cooker::infra::process::{
    CommandRunner, CommandStatus, ExternalCommand, OutputMode, ProcessError,
};
use tempfile::TempDir;

/// Test project context
///
/// Creates a temporary directory for test projects and provides
/// utilities for setting up test scenarios.
pub struct TestProject {
    /// Temporary directory for the test project
    pub dir: TempDir,
}

impl TestProject {
    /// Create a new test project in a temporary directory
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Get the path to the test project directory
    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    /// Create a file in the test project
    pub fn create_file(&self, name: &str, content: &str) {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        std::fs::write(path, content).expect("Failed to write file");
    }

    /// Create a directory in the test project
    pub fn create_dir(&self, name: &str) {
        let path = self.dir.path().join(name);
        std::fs::create_dir_all(path).expect("Failed to create directory");
    }

    /// Check if a file exists in the test project
    pub fn file_exists(&self, name: &str) -> bool {
        self.dir.path().join(name).exists()
    }

    /// Read a file from the test project
    pub fn read_file(&self, name: &str) -> String {
        std::fs::read_to_string(self.dir.path().join(name)).expect("Failed to read file")
    }

    /// Run the cooker binary in the project directory
    pub fn run(&self, args: &[&str]) -> Output {
        self.run_in(&self.path(), args)
    }

    /// Run the cooker binary in `dir`
    pub fn run_in(&self, dir: &Path, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_cooker"))
            .current_dir(dir)
            .args(args)
            .env_remove("RUST_LOG")
            .output()
            .expect("Failed to execute cooker")
    }
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

/// Stderr of a finished command as text
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

/// Stdout of a finished command as text
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Command runner that records invocations instead of running them
///
/// `git clone <url> <dir>` creates `<dir>` so later steps see a checkout.
/// Commands whose first argument matches `fail_on` exit with status 1.
#[derive(Default)]
pub struct RecordingRunner {
    calls: RefCell<Vec<ExternalCommand>>,
    fail_on: Option<String>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every command whose first argument is `subcommand`
    pub fn failing_on(subcommand: &str) -> Self {
        Self {
            calls: RefCell::default(),
            fail_on: Some(subcommand.to_string()),
        }
    }

    pub fn calls(&self) -> Vec<ExternalCommand> {
        self.calls.borrow().clone()
    }

    /// Recorded invocations as `program arg0 arg1 ...` lines
    pub fn lines(&self) -> Vec<String> {
        self.calls.borrow().iter().map(ExternalCommand::command_line).collect()
    }

    /// First argument of each recorded command (`clone`, `checkout`, ...)
    pub fn subcommands(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|c| c.args().first().cloned())
            .collect()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, cmd: &ExternalCommand, _mode: OutputMode) -> Result<CommandStatus, ProcessError> {
        self.calls.borrow_mut().push(cmd.clone());

        let first = cmd.args().first().map(String::as_str);
        if self.fail_on.is_some() && first == self.fail_on.as_deref() {
            return Ok(CommandStatus {
                code: Some(1),
                stderr: "simulated failure".to_string(),
            });
        }

        if cmd.program() == "git" && first == Some("clone") {
            if let Some(dir) = cmd.args().get(2) {
                std::fs::create_dir_all(dir).expect("Failed to create clone directory");
            }
        }
        Ok(CommandStatus::success())
    }
}

/// Menu with one target `t1` and base layer `meta-a`
pub const SIMPLE_MENU: &str = r#"{
    "layers": ["meta-a"],
    "sources": [],
    "targets": {
        "t1": { "local.conf": ["X=1"] }
    }
}"#;

/// Menu with several sources and two targets
pub const FULL_MENU: &str = r#"{
    "layers": ["poky/meta", "poky/meta-poky"],
    "sources": [
        { "url": "git://git.yoctoproject.org/poky", "branch": "kirkstone", "commit": "0123abcd" },
        { "method": "ignore", "dir": "meta-local" },
        { "url": "https://github.com/agherzan/meta-raspberrypi.git", "branch": "kirkstone" }
    ],
    "targets": {
        "qemu": { "local.conf": ["MACHINE = \"qemux86-64\""] },
        "pi": {
            "image": "core-image-minimal",
            "layers": ["agherzan/meta-raspberrypi"],
            "local.conf": ["MACHINE = \"raspberrypi4\""]
        }
    }
}"#;
