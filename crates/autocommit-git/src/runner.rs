//! Process execution for git commands

use crate::error::{GitError, GitResult};
use std::fmt;
use std::path::PathBuf;
use std::process::Command;

/// A program plus its ordered arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    program: String,
    args: Vec<String>,
}

impl Invocation {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    pub fn git<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new("git", args)
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// First argument, e.g. `add` for `git add -- foo.py`
    pub fn subcommand(&self) -> Option<&str> {
        self.args.first().map(String::as_str)
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            if arg.is_empty() || arg.chars().any(char::is_whitespace) {
                write!(f, " {:?}", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

/// Captured output of a command that exited successfully
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// Stdout without surrounding whitespace.
    ///
    /// Column-sensitive output (porcelain status) must use `stdout`, since
    /// trimming eats the leading space of a ` M path` line.
    pub fn text(&self) -> &str {
        self.stdout.trim()
    }
}

pub trait CommandRunner {
    /// Run to completion. A non-zero exit or a spawn failure is an `Err`.
    fn run(&self, invocation: &Invocation) -> GitResult<CommandOutput>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, invocation: &Invocation) -> GitResult<CommandOutput> {
        (**self).run(invocation)
    }
}

/// Runs invocations as child processes, blocking until they exit
#[derive(Debug, Clone, Default)]
pub struct SystemRunner {
    work_dir: Option<PathBuf>,
}

impl SystemRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            work_dir: Some(dir.into()),
        }
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> GitResult<CommandOutput> {
        tracing::debug!(command = %invocation, "running");

        let mut command = Command::new(invocation.program());
        command.args(invocation.args());
        if let Some(dir) = &self.work_dir {
            command.current_dir(dir);
        }

        let output = command.output().map_err(|source| GitError::Spawn {
            command: invocation.to_string(),
            source,
        })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if output.status.success() {
            Ok(CommandOutput { stdout, stderr })
        } else {
            tracing::debug!(command = %invocation, code = ?output.status.code(), "command failed");
            Err(GitError::Failed {
                command: invocation.to_string(),
                code: output.status.code(),
                stderr,
            })
        }
    }
}
