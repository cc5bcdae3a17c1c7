// fmgit: File Manager Git Engine
//
// SPDX-FileCopyrightText: 2026 fmgit contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!              FmError (~24 bytes)
//!                     |
//!        +--------+---+----+--------+--------+
//!        |        |        |        |        |
//!        v        v        v        v        v
//!       Git      Cfg     Proc      Fs    Io/Other
//!       Box      Box     Box      Box    Box<str>
//!
//! GitError
//!   precondition   NotARepository, BlankInput, EmptyCommitMessage,
//!                  NothingToCommit, SameBranch, MergeInProgress,
//!                  DestinationNotEmpty, ...
//!   semantic       UntrackedFile, RestoreAddedFile, MergeConflict,
//!                  CommandFailed
//!   execution      CommitFailed, MergeProcess, CloneFailed, Gix
//! ```
//!
//! Precondition errors are raised before any subprocess is spawned.

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`FmError`].
pub type FmResult<T> = std::result::Result<T, FmError>;

/// Top-level error type.
///
/// All sub-errors are boxed to keep this enum at ~24 bytes on the stack.
#[derive(Debug, Error)]
pub enum FmError {
    /// Git operation failed.
    #[error("git error: {0}")]
    Git(#[from] Box<GitError>),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// Process execution error.
    #[error("process error: {0}")]
    Process(#[from] Box<ProcessError>),

    /// File operation refused.
    #[error("file error: {0}")]
    Fs(#[from] Box<FsError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),

    /// Generic error with message.
    #[error("{0}")]
    Other(Box<str>),
}

impl FmError {
    /// Returns the git error if this is one.
    #[must_use]
    pub fn as_git(&self) -> Option<&GitError> {
        match self {
            Self::Git(err) => Some(err),
            _ => None,
        }
    }

    /// True for errors raised before any command was run.
    #[must_use]
    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::Fs(_)) || self.as_git().is_some_and(GitError::is_precondition)
    }
}

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for FmError {
                fn from(err: $error) -> Self {
                    FmError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    GitError => Git,
    ConfigError => Config,
    ProcessError => Process,
    FsError => Fs,
    std::io::Error => Io,
}

// --- Gix Errors ---

/// Wrapper for gix-specific errors.
#[derive(Debug, Error)]
pub enum GixError {
    /// Failed to discover repository from path.
    #[error("failed to discover repository: {0}")]
    Discover(#[from] Box<gix::discover::Error>),

    /// Failed to get HEAD reference.
    #[error("failed to get head reference: {0}")]
    Head(#[from] gix::reference::find::existing::Error),

    /// Repository has no worktree (bare repository).
    #[error("repository has no worktree (bare repository)")]
    BareRepository,

    /// Any other gix failure, flattened to its message.
    #[error("{operation}: {message}")]
    Operation { operation: String, message: String },
}

impl GixError {
    pub(crate) fn operation(operation: &str, err: impl std::fmt::Display) -> Self {
        Self::Operation {
            operation: operation.to_string(),
            message: err.to_string(),
        }
    }
}

// --- Git Errors ---

/// Git operation errors.
#[derive(Debug, Error)]
pub enum GitError {
    /// Path does not belong to any repository.
    #[error("not a git directory: {path}")]
    NotARepository { path: String },

    /// Path does not exist.
    #[error("path not found: {path}")]
    PathNotFound { path: String },

    /// A required text input was blank.
    #[error("{what} can't be empty")]
    BlankInput { what: String },

    #[error("empty commit message")]
    EmptyCommitMessage,

    #[error("nothing to commit")]
    NothingToCommit,

    /// No branch was selected for an operation that needs one.
    #[error("no branch selected")]
    NoBranchSelected,

    /// Merge target is the checked-out branch.
    #[error("same branch selected: {branch}")]
    SameBranch { branch: String },

    /// Clone destination has entries.
    #[error("destination not empty: {path}")]
    DestinationNotEmpty { path: String },

    #[error("repository address can't be empty")]
    EmptyRepositoryAddress,

    /// `init` on a directory that already belongs to a repository.
    #[error("directory already uses git: {path}")]
    AlreadyRepository { path: String },

    /// Operation needs a directory.
    #[error("not a directory: {path}")]
    NotADirectory { path: String },

    /// Move destination lies outside the source repository.
    #[error("path is outside repository: {path}")]
    OutsideRepository { path: String },

    /// File is not tracked; it must be added first.
    #[error("git doesn't track {path}, add it first")]
    UntrackedFile { path: String },

    /// Worktree restore of a file that only exists in the index.
    #[error("{path} is newly added, use restore --staged")]
    RestoreAddedFile { path: String },

    /// A merge is already in progress (`MERGE_HEAD` present).
    #[error("a merge is already in progress in {path}, finish or abort it first")]
    MergeInProgress { path: String },

    /// Merge hit a conflict and was rolled back.
    #[error("merge failed, already aborted (conflict merging {branch})")]
    MergeConflict { branch: String },

    /// Git command ran but reported failure.
    #[error("git command failed: {command} - {message}")]
    CommandFailed { command: String, message: String },

    #[error("commit process failed")]
    CommitFailed,

    /// Merge launch or marker inspection failed.
    #[error("merge process error")]
    MergeProcess,

    /// Clone operation failed.
    #[error("failed to clone {url}: {message}")]
    CloneFailed { url: String, message: String },

    /// Error from gix library.
    #[error("gix error: {0}")]
    Gix(#[from] GixError),
}

impl GitError {
    /// True for errors raised before any command was run.
    #[must_use]
    pub const fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::NotARepository { .. }
                | Self::PathNotFound { .. }
                | Self::BlankInput { .. }
                | Self::EmptyCommitMessage
                | Self::NothingToCommit
                | Self::NoBranchSelected
                | Self::SameBranch { .. }
                | Self::MergeInProgress { .. }
                | Self::DestinationNotEmpty { .. }
                | Self::EmptyRepositoryAddress
                | Self::AlreadyRepository { .. }
                | Self::NotADirectory { .. }
                | Self::OutsideRepository { .. }
        )
    }

    pub(crate) fn blank(what: &str) -> Self {
        Self::BlankInput {
            what: what.to_string(),
        }
    }
}

impl From<GixError> for FmError {
    fn from(err: GixError) -> Self {
        GitError::Gix(err).into()
    }
}

// --- Filesystem Errors ---

/// Refused file operations. Failures of the operation itself are `FmError::Io`.
#[derive(Debug, Error)]
pub enum FsError {
    /// Name is blank, a path, or `.`/`..`.
    #[error("invalid file name: '{name}'")]
    InvalidName { name: String },

    #[error("already exists: {path}")]
    AlreadyExists { path: String },

    #[error("no such file or directory: {path}")]
    NotFound { path: String },
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: String, message: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },
}

// --- Process Errors ---

/// Process execution errors.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Executable not found in PATH.
    #[error("executable not found: '{name}' (not in PATH)")]
    ExecutableNotFound { name: String },

    /// Failed to spawn process.
    #[error("failed to spawn process '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Process exited with a non-zero code.
    #[error("{command} exited with code {code}")]
    ExitStatus { command: String, code: i32 },

    /// Failed while waiting on or reading from a running process.
    #[error("failed to read output from process '{command}': {source}")]
    OutputError {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests;
