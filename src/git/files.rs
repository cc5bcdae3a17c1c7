// fmgit: File Manager Git Engine
//
// SPDX-FileCopyrightText: 2026 fmgit contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Per-path index and working tree operations.
//!
//! ```text
//!            status precheck        git
//! stage      -                      add
//! restore    ?? -> UntrackedFile    restore
//!            A  -> RestoreAddedFile
//! unstage    ?? -> UntrackedFile    restore --staged
//! remove     ?? -> UntrackedFile    rm [--cached]
//! move_path  ?? -> UntrackedFile    mv
//!            dest in other repo -> OutsideRepository
//! init       dir, not in a repo     init
//! ```

use std::path::{Path, PathBuf};

use tracing::info;

use super::Git;
use super::backend::{GitMutation, GitQuery};
use super::locator::{self, RepositoryHandle};
use super::status::PathStatus;
use crate::error::{FmResult, GitError};

/// Index and working tree operations on single paths.
pub struct FileService;

impl FileService {
    /// Stages `path`.
    ///
    /// # Errors
    ///
    /// Returns `GitError::NotARepository` or `GitError::CommandFailed`.
    pub async fn stage(git: &Git, path: &Path) -> FmResult<()> {
        let handle = locator::locate(path)?;
        git.mutation().add(&handle, path).await?;
        info!(path = %path.display(), "staged");
        Ok(())
    }

    /// Discards working tree changes to `path`.
    ///
    /// # Errors
    ///
    /// - `GitError::UntrackedFile` if git does not track `path`.
    /// - `GitError::RestoreAddedFile` if `path` only exists in the index.
    /// - `GitError::CommandFailed` if git refuses.
    pub async fn restore(git: &Git, path: &Path) -> FmResult<()> {
        let handle = locator::locate(path)?;
        let status = tracked_status(git, &handle, path).await?;
        if status == PathStatus::Staged && is_added(git, &handle, path).await? {
            return Err(GitError::RestoreAddedFile {
                path: path.display().to_string(),
            }
            .into());
        }
        git.mutation().restore(&handle, path, false).await?;
        info!(path = %path.display(), "restored");
        Ok(())
    }

    /// Removes `path` from the index, keeping the working tree copy.
    ///
    /// # Errors
    ///
    /// Returns `GitError::UntrackedFile` for untracked paths and
    /// `GitError::CommandFailed` if git refuses.
    pub async fn unstage(git: &Git, path: &Path) -> FmResult<()> {
        let handle = locator::locate(path)?;
        tracked_status(git, &handle, path).await?;
        git.mutation().restore(&handle, path, true).await?;
        info!(path = %path.display(), "unstaged");
        Ok(())
    }

    /// `git rm`; with `cached` the working tree copy is kept.
    ///
    /// # Errors
    ///
    /// Returns `GitError::UntrackedFile` for untracked paths and
    /// `GitError::CommandFailed` if git refuses.
    pub async fn remove(git: &Git, path: &Path, cached: bool) -> FmResult<()> {
        let handle = locator::locate(path)?;
        tracked_status(git, &handle, path).await?;
        git.mutation().remove(&handle, path, cached).await?;
        info!(path = %path.display(), cached, "removed");
        Ok(())
    }

    /// Moves `path` to `to`, resolved against the directory of `path`.
    ///
    /// Returns the absolute destination.
    ///
    /// # Errors
    ///
    /// - `GitError::BlankInput` if `to` is blank.
    /// - `GitError::UntrackedFile` if git does not track `path`.
    /// - `GitError::OutsideRepository` if `to` lies in another repository
    ///   or in none.
    /// - `GitError::CommandFailed` if git refuses.
    pub async fn move_path(git: &Git, path: &Path, to: &str) -> FmResult<PathBuf> {
        let handle = locator::locate(path)?;
        let to = to.trim();
        if to.is_empty() {
            return Err(GitError::blank("destination").into());
        }
        tracked_status(git, &handle, path).await?;

        let base = std::path::absolute(path)?
            .parent()
            .map_or_else(|| handle.work_tree().to_path_buf(), Path::to_path_buf);
        let destination = base.join(to);
        let same_repository = locator::locate_nearest(&destination)
            .is_ok_and(|dest_handle| dest_handle == handle);
        if !same_repository {
            return Err(GitError::OutsideRepository {
                path: destination.display().to_string(),
            }
            .into());
        }

        git.mutation().move_path(&handle, path, to).await?;
        info!(from = %path.display(), to = %destination.display(), "moved");
        Ok(destination)
    }

    /// Creates a new repository in `dir`.
    ///
    /// # Errors
    ///
    /// - `GitError::PathNotFound` if `dir` does not exist.
    /// - `GitError::NotADirectory` if `dir` is a file.
    /// - `GitError::AlreadyRepository` if `dir` already belongs to one.
    /// - `GitError::CommandFailed` if git refuses.
    pub async fn init(git: &Git, dir: &Path) -> FmResult<()> {
        if !dir.exists() {
            return Err(GitError::PathNotFound {
                path: dir.display().to_string(),
            }
            .into());
        }
        if !dir.is_dir() {
            return Err(GitError::NotADirectory {
                path: dir.display().to_string(),
            }
            .into());
        }
        if locator::is_repository(dir) {
            return Err(GitError::AlreadyRepository {
                path: dir.display().to_string(),
            }
            .into());
        }
        git.mutation().init(dir).await?;
        info!(dir = %dir.display(), "repository initialized");
        Ok(())
    }
}

/// Status of `path`, rejecting untracked paths.
async fn tracked_status(git: &Git, handle: &RepositoryHandle, path: &Path) -> FmResult<PathStatus> {
    let status = git.query().path_status(handle, path).await?;
    if status == PathStatus::Untracked {
        return Err(GitError::UntrackedFile {
            path: path.display().to_string(),
        }
        .into());
    }
    Ok(status)
}

/// True if `path` is staged as a new file.
async fn is_added(git: &Git, handle: &RepositoryHandle, path: &Path) -> FmResult<bool> {
    let Some(relative) = handle.relative_path(path) else {
        return Ok(false);
    };
    if relative.as_os_str().is_empty() {
        return Ok(false);
    }
    let relative = relative.to_string_lossy().replace('\\', "/");
    let result = git
        .runner()
        .run_in(
            handle,
            &["diff", "--cached", "--name-only", "--diff-filter=A", "--", relative.as_str()],
        )
        .await?
        .into_checked("git diff")?;
    Ok(!result.stdout().is_empty())
}
