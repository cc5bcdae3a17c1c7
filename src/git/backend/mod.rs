// fmgit: File Manager Git Engine
//
// SPDX-FileCopyrightText: 2026 fmgit contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git backend abstraction layer.
//!
//! ```text
//! GitQuery (read)     --> GixBackend   (pure Rust gix, no subprocess)
//!                     --> ShellBackend (git CLI)
//!                         QueryBackend picks one from `git.backend`
//! GitMutation (write) --> ShellBackend (git CLI)
//! ```

mod gix_backend;
mod shell;

#[cfg(test)]
mod tests;

use std::path::Path;

pub use self::gix_backend::GixBackend;
pub use self::shell::ShellBackend;

use super::branch::BranchRef;
use super::clone::Credentials;
use super::commit::StagedFileSet;
use super::locator::RepositoryHandle;
use super::runner::CommandResult;
use super::status::PathStatus;
use crate::error::FmResult;

// --- Query Trait (Read-only operations) ---

/// Read-only repository queries.
///
/// Implementations never modify the repository and never cache between calls.
#[allow(async_fn_in_trait)]
pub trait GitQuery {
    /// Current branch name (None if HEAD is detached).
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the repository or HEAD cannot be read.
    async fn current_branch(&self, handle: &RepositoryHandle) -> FmResult<Option<String>>;

    /// Local and remote-tracking branches, sorted by full ref name.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if references cannot be listed.
    async fn list_branches(&self, handle: &RepositoryHandle) -> FmResult<Vec<BranchRef>>;

    /// Status of one path inside the working tree.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the status query fails.
    async fn path_status(&self, handle: &RepositoryHandle, path: &Path) -> FmResult<PathStatus>;

    /// Paths added, modified or removed in the index relative to HEAD.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the status query fails.
    async fn staged_files(&self, handle: &RepositoryHandle) -> FmResult<StagedFileSet>;
}

// --- Mutation Trait (Write operations) ---

/// Operations that modify repository state.
///
/// Path arguments are run from the path's parent directory with the file
/// name as argument.
#[allow(async_fn_in_trait)]
pub trait GitMutation {
    /// `git add`.
    ///
    /// # Errors
    ///
    /// Returns `GitError::CommandFailed` if git rejects the path.
    async fn add(&self, handle: &RepositoryHandle, path: &Path) -> FmResult<()>;

    /// `git restore`, or `git restore --staged` when `staged`.
    ///
    /// # Errors
    ///
    /// Returns `GitError::CommandFailed` if git rejects the path.
    async fn restore(&self, handle: &RepositoryHandle, path: &Path, staged: bool) -> FmResult<()>;

    /// `git rm`, or `git rm --cached` when `cached`.
    ///
    /// # Errors
    ///
    /// Returns `GitError::CommandFailed` if git rejects the path.
    async fn remove(&self, handle: &RepositoryHandle, path: &Path, cached: bool) -> FmResult<()>;

    /// `git mv`; `to` is taken relative to the parent of `from`.
    ///
    /// # Errors
    ///
    /// Returns `GitError::CommandFailed` if git rejects the move.
    async fn move_path(&self, handle: &RepositoryHandle, from: &Path, to: &str) -> FmResult<()>;

    /// `git commit -m`.
    ///
    /// # Errors
    ///
    /// Returns `GitError::CommandFailed` if the commit fails.
    async fn commit(&self, handle: &RepositoryHandle, message: &str) -> FmResult<()>;

    /// `git branch <name>`.
    ///
    /// # Errors
    ///
    /// Returns `GitError::CommandFailed` if the branch cannot be created.
    async fn create_branch(&self, handle: &RepositoryHandle, name: &str) -> FmResult<()>;

    /// `git branch -d <name>`.
    ///
    /// # Errors
    ///
    /// Returns `GitError::CommandFailed` if the branch cannot be deleted.
    async fn delete_branch(&self, handle: &RepositoryHandle, name: &str) -> FmResult<()>;

    /// `git branch -m <old> <new>`.
    ///
    /// # Errors
    ///
    /// Returns `GitError::CommandFailed` if the branch cannot be renamed.
    async fn rename_branch(&self, handle: &RepositoryHandle, old: &str, new: &str)
    -> FmResult<()>;

    /// `git checkout <name>`.
    ///
    /// # Errors
    ///
    /// Returns `GitError::CommandFailed` if the checkout fails.
    async fn checkout(&self, handle: &RepositoryHandle, name: &str) -> FmResult<()>;

    /// `git merge --no-edit <branch>`. The exit status is returned, not checked.
    ///
    /// # Errors
    ///
    /// Returns a `ProcessError` only if git cannot be launched.
    async fn merge(&self, handle: &RepositoryHandle, branch: &str) -> FmResult<CommandResult>;

    /// `git merge --abort`.
    ///
    /// # Errors
    ///
    /// Returns `GitError::CommandFailed` if the abort fails.
    async fn merge_abort(&self, handle: &RepositoryHandle) -> FmResult<()>;

    /// `git clone <url> <dest>`. The exit status is returned, not checked.
    ///
    /// `credentials` are answered through a one-shot credential helper, so
    /// they never reach the command line or the cloned repository's config.
    ///
    /// # Errors
    ///
    /// Returns a `ProcessError` only if git cannot be launched.
    async fn clone_repo(
        &self,
        url: &str,
        dest: &Path,
        credentials: Option<&Credentials>,
    ) -> FmResult<CommandResult>;

    /// `git init` in `dir`.
    ///
    /// # Errors
    ///
    /// Returns `GitError::CommandFailed` if initialization fails.
    async fn init(&self, dir: &Path) -> FmResult<()>;
}

// --- Configured query backend ---

/// The query backend selected by configuration.
#[derive(Debug, Clone)]
pub enum QueryBackend {
    Gix(GixBackend),
    Shell(ShellBackend),
}

impl QueryBackend {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Gix(_) => "gix",
            Self::Shell(_) => "shell",
        }
    }
}

impl GitQuery for QueryBackend {
    async fn current_branch(&self, handle: &RepositoryHandle) -> FmResult<Option<String>> {
        match self {
            Self::Gix(backend) => backend.current_branch(handle).await,
            Self::Shell(backend) => backend.current_branch(handle).await,
        }
    }

    async fn list_branches(&self, handle: &RepositoryHandle) -> FmResult<Vec<BranchRef>> {
        match self {
            Self::Gix(backend) => backend.list_branches(handle).await,
            Self::Shell(backend) => backend.list_branches(handle).await,
        }
    }

    async fn path_status(&self, handle: &RepositoryHandle, path: &Path) -> FmResult<PathStatus> {
        match self {
            Self::Gix(backend) => backend.path_status(handle, path).await,
            Self::Shell(backend) => backend.path_status(handle, path).await,
        }
    }

    async fn staged_files(&self, handle: &RepositoryHandle) -> FmResult<StagedFileSet> {
        match self {
            Self::Gix(backend) => backend.staged_files(handle).await,
            Self::Shell(backend) => backend.staged_files(handle).await,
        }
    }
}
