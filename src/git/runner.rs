// fmgit: File Manager Git Engine
//
// SPDX-FileCopyrightText: 2026 fmgit contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Single entry point for git subprocesses.
//!
//! ```text
//! CommandRunner::run(dir, ["commit", "-m", "it's done"])
//!   --> /bin/sh -c "cd '/work/my repo' && /usr/bin/git commit -m 'it'\''s done'"
//!       GIT_TERMINAL_PROMPT=0  GCM_INTERACTIVE=never  LC_ALL=C
//!       GIT_LITERAL_PATHSPECS=1
//!   --> CommandResult { exit_code, stdout: [..], stderr: [..] }
//! ```
//!
//! A non-zero exit is data, not an error. Only a failed spawn (missing git,
//! missing shell) propagates.
//!
//! Pathspecs are literal: a file named `?.txt` never matches `a.txt`.

use std::path::{Path, PathBuf};

use tracing::debug;

use super::locator::RepositoryHandle;
use crate::core::process::builder::{ProcessBuilder, ProcessFlags};
use crate::error::{FmResult, GitError, ProcessError};

/// Captured result of one git invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandResult {
    exit_code: i32,
    stdout: Vec<String>,
    stderr: Vec<String>,
}

impl CommandResult {
    #[must_use]
    pub const fn new(exit_code: i32, stdout: Vec<String>, stderr: Vec<String>) -> Self {
        Self {
            exit_code,
            stdout,
            stderr,
        }
    }

    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        self.exit_code
    }

    #[must_use]
    pub const fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Stdout lines in emission order.
    #[must_use]
    pub fn stdout(&self) -> &[String] {
        &self.stdout
    }

    /// Stderr lines in emission order.
    #[must_use]
    pub fn stderr(&self) -> &[String] {
        &self.stderr
    }

    #[must_use]
    pub fn first_line(&self) -> Option<&str> {
        self.stdout.first().map(String::as_str)
    }

    /// Stderr joined for messages, falling back to stdout when stderr is empty.
    #[must_use]
    pub fn message(&self) -> String {
        let lines = if self.stderr.is_empty() {
            &self.stdout
        } else {
            &self.stderr
        };
        lines.join("\n").trim().to_string()
    }

    /// Turns a non-zero exit into `GitError::CommandFailed`.
    ///
    /// # Errors
    ///
    /// Returns `GitError::CommandFailed` carrying `command` and the output
    /// message when the exit code is non-zero.
    pub fn into_checked(self, command: &str) -> FmResult<Self> {
        if self.success() {
            Ok(self)
        } else {
            Err(GitError::CommandFailed {
                command: command.to_string(),
                message: self.message(),
            }
            .into())
        }
    }
}

/// Runs git through `/bin/sh` with uniform argument quoting.
#[derive(Debug, Clone)]
pub struct CommandRunner {
    program: String,
}

impl Default for CommandRunner {
    fn default() -> Self {
        Self::new("git")
    }
}

impl CommandRunner {
    /// Creates a runner for the given git program (name or path).
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// The configured git program.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Resolves the git program to an executable path.
    ///
    /// # Errors
    ///
    /// Returns `ProcessError::ExecutableNotFound` if the program is neither an
    /// existing path nor found in PATH.
    pub fn resolve_program(&self) -> FmResult<PathBuf> {
        let not_found = || ProcessError::ExecutableNotFound {
            name: self.program.clone(),
        };
        if self.program.contains(std::path::MAIN_SEPARATOR) {
            let path = PathBuf::from(&self.program);
            return if path.is_file() {
                Ok(path)
            } else {
                Err(not_found().into())
            };
        }
        ProcessBuilder::find(&self.program).ok_or_else(|| not_found().into())
    }

    /// Builds the shell line `cd <dir> && <git> <args>`.
    #[must_use]
    pub fn command_line(program: &Path, dir: &Path, args: &[&str]) -> String {
        let mut line = format!(
            "cd {} && {}",
            shell_quote(&dir.to_string_lossy()),
            shell_quote(&program.to_string_lossy())
        );
        for arg in args {
            line.push(' ');
            line.push_str(&shell_quote(arg));
        }
        line
    }

    /// Runs `git <args>` with `dir` as working directory.
    ///
    /// # Errors
    ///
    /// Returns a `ProcessError` if git cannot be resolved or the shell cannot
    /// be spawned. A non-zero git exit is reported in the `CommandResult`.
    pub async fn run(&self, dir: &Path, args: &[&str]) -> FmResult<CommandResult> {
        self.run_with_env(dir, args, &[]).await
    }

    /// Same as [`CommandRunner::run`] with extra environment variables.
    ///
    /// Values are never logged.
    ///
    /// # Errors
    ///
    /// Same as [`CommandRunner::run`].
    pub async fn run_with_env(
        &self,
        dir: &Path,
        args: &[&str],
        env: &[(&str, &str)],
    ) -> FmResult<CommandResult> {
        let program = self.resolve_program()?;
        let line = Self::command_line(&program, dir, args);
        let secrets: Vec<String> = args.iter().filter_map(|arg| url_password(arg)).collect();
        debug!(dir = %dir.display(), args = ?redact_all(args, &secrets), "git");

        let mut builder = ProcessBuilder::raw(line);
        for secret in secrets {
            builder = builder.redact(secret);
        }
        for (key, value) in env {
            builder = builder.env(*key, *value);
        }
        let output = builder
            .name("git")
            .env("GIT_TERMINAL_PROMPT", "0")
            .env("GCM_INTERACTIVE", "never")
            .env("LC_ALL", "C")
            .env("GIT_LITERAL_PATHSPECS", "1")
            .flag(ProcessFlags::ALLOW_FAILURE)
            .capture_output()
            .run()
            .await?;

        let (exit_code, stdout, stderr) = output.into_parts();
        debug!(exit_code, "git finished");
        Ok(CommandResult::new(exit_code, stdout, stderr))
    }

    /// Runs `git <args>` at the repository's working tree root.
    ///
    /// # Errors
    ///
    /// Same as [`CommandRunner::run`].
    pub async fn run_in(
        &self,
        handle: &RepositoryHandle,
        args: &[&str],
    ) -> FmResult<CommandResult> {
        self.run(handle.work_tree(), args).await
    }
}

/// Password embedded in a URL argument, as it appears in the argument.
fn url_password(arg: &str) -> Option<String> {
    let url = url::Url::parse(arg).ok()?;
    url.password().map(str::to_string)
}

fn redact_all(args: &[&str], secrets: &[String]) -> Vec<String> {
    args.iter()
        .map(|arg| {
            secrets
                .iter()
                .fold((*arg).to_string(), |arg, secret| arg.replace(secret.as_str(), "***"))
        })
        .collect()
}

/// Quotes `arg` for a POSIX shell.
///
/// Plain words pass through; everything else is wrapped in single quotes
/// with embedded quotes written as `'\''`.
#[must_use]
pub fn shell_quote(arg: &str) -> String {
    let plain = !arg.is_empty()
        && arg
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b"-_./=:@%+,".contains(&b));
    if plain {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}
