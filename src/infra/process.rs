//! External process invocation
//!
//! Every external tool (git, the build engine) is launched through a
//! [`CommandRunner`] from a structured [`ExternalCommand`]: a program, an
//! argument list and a working directory. Quoting for display and for
//! shell scripts lives here and nowhere else.

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use thiserror::Error;

/// Process invocation errors
#[derive(Error, Debug)]
pub enum ProcessError {
    /// Program is not installed or not on PATH
    #[error("Required tool '{program}' not found in PATH")]
    ToolNotFound { program: String },

    /// Program could not be started
    #[error("Failed to run '{command}': {error}")]
    Spawn { command: String, error: String },

    /// Program ran and exited unsuccessfully
    #[error("Command '{command}' failed with {}{}", describe_code(.code), describe_stderr(.stderr))]
    Failed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },
}

fn describe_code(code: &Option<i32>) -> String {
    match *code {
        Some(code) => format!("exit status {code}"),
        None => "termination by signal".to_string(),
    }
}

fn describe_stderr(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(":\n{trimmed}")
    }
}

/// How the child's stdout/stderr are handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Child writes straight to the terminal
    Inherit,
    /// Output is captured; stderr is only surfaced on failure
    Capture,
}

/// A program invocation with its arguments and working directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalCommand {
    program: String,
    args: Vec<String>,
    current_dir: Option<PathBuf>,
}

impl ExternalCommand {
    /// Start a command for `program`
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            current_dir: None,
        }
    }

    /// Append one argument
    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append a path argument
    #[must_use]
    pub fn path_arg(self, path: &Path) -> Self {
        self.arg(path.display().to_string())
    }

    /// Run the command from `dir`
    #[must_use]
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn working_dir(&self) -> Option<&Path> {
        self.current_dir.as_deref()
    }

    /// Shell-quoted command line, suitable for display or copy-paste
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .map(shell_quote)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for ExternalCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.command_line())
    }
}

/// Quote a word for POSIX `sh`
pub fn shell_quote(word: &str) -> String {
    let safe = !word.is_empty()
        && word
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./=:,+@%".contains(c));
    if safe {
        word.to_string()
    } else {
        format!("'{}'", word.replace('\'', r"'\''"))
    }
}

/// Exit status of a finished command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandStatus {
    /// Exit code, `None` if terminated by a signal
    pub code: Option<i32>,
    /// Captured stderr (empty in [`OutputMode::Inherit`])
    pub stderr: String,
}

impl CommandStatus {
    pub fn success() -> Self {
        Self {
            code: Some(0),
            stderr: String::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Capability to run external commands synchronously
pub trait CommandRunner {
    /// Run `cmd` to completion and report its exit status.
    ///
    /// An `Err` means the command could not be started at all.
    fn run(&self, cmd: &ExternalCommand, mode: OutputMode) -> Result<CommandStatus, ProcessError>;

    /// Run `cmd` and turn a non-zero exit into [`ProcessError::Failed`]
    fn check(&self, cmd: &ExternalCommand, mode: OutputMode) -> Result<(), ProcessError> {
        let status = self.run(cmd, mode)?;
        if status.is_success() {
            Ok(())
        } else {
            Err(ProcessError::Failed {
                command: cmd.command_line(),
                code: status.code,
                stderr: status.stderr,
            })
        }
    }
}

/// Runs commands on the host with `std::process`
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, cmd: &ExternalCommand, mode: OutputMode) -> Result<CommandStatus, ProcessError> {
        let program = which::which(cmd.program()).map_err(|_| ProcessError::ToolNotFound {
            program: cmd.program().to_string(),
        })?;

        let mut command = Command::new(program);
        command.args(cmd.args()).stdin(Stdio::null());
        if let Some(dir) = cmd.working_dir() {
            command.current_dir(dir);
        }

        tracing::debug!("Running: {}", cmd);

        let spawn_error = |e: std::io::Error| ProcessError::Spawn {
            command: cmd.command_line(),
            error: e.to_string(),
        };

        match mode {
            OutputMode::Inherit => {
                let status = command.status().map_err(spawn_error)?;
                Ok(CommandStatus {
                    code: status.code(),
                    stderr: String::new(),
                })
            }
            OutputMode::Capture => {
                let output = command.output().map_err(spawn_error)?;
                Ok(CommandStatus {
                    code: output.status.code(),
                    stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
                })
            }
        }
    }
}

/// Prints commands instead of running them
#[derive(Debug, Default, Clone, Copy)]
pub struct DryRunRunner;

impl CommandRunner for DryRunRunner {
    fn run(&self, cmd: &ExternalCommand, _mode: OutputMode) -> Result<CommandStatus, ProcessError> {
        match cmd.working_dir() {
            Some(dir) => println!("(cd {} && {})", shell_quote(&dir.display().to_string()), cmd),
            None => println!("{cmd}"),
        }
        Ok(CommandStatus::success())
    }
}
