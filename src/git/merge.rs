// fmgit: File Manager Git Engine
//
// SPDX-FileCopyrightText: 2026 fmgit contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Merge with automatic rollback on conflict.
//!
//! ```text
//! Idle --request--> Running --exit, no marker--> Succeeded
//!                      |
//!                      +--exit, MERGE_HEAD non-empty--> ConflictDetected
//!                                                          |
//!                                               merge --abort
//!                                                          v
//!                                                      Aborting --> Aborted
//! ```
//!
//! The orchestrator waits for the merge process to exit before reading the
//! marker. Failures while launching or inspecting surface as
//! `GitError::MergeProcess` and leave the state where it was.

use std::path::Path;

use serde::Serialize;
use tracing::{error, info, warn};

use super::Git;
use super::backend::{GitMutation, GitQuery};
use super::branch::short_branch_name;
use super::locator::{self, RepositoryHandle};
use crate::error::{FmResult, GitError};

/// States of one merge attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MergeState {
    Idle,
    Running,
    Succeeded,
    ConflictDetected,
    Aborting,
    Aborted,
}

impl MergeState {
    /// True once no further transition can happen.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Aborted)
    }

    /// Whether `self -> next` is a legal transition.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::Running)
                | (Self::Running, Self::Succeeded | Self::ConflictDetected)
                | (Self::ConflictDetected, Self::Aborting)
                | (Self::Aborting, Self::Aborted)
        )
    }
}

/// One merge of `branch` into the current branch.
///
/// Lives only for the duration of a single [`MergeOrchestrator::merge`] call.
#[derive(Debug, Clone, Serialize)]
pub struct MergeAttempt {
    branch: String,
    history: Vec<MergeState>,
}

impl MergeAttempt {
    fn new(branch: &str) -> Self {
        Self {
            branch: branch.to_string(),
            history: vec![MergeState::Idle],
        }
    }

    #[must_use]
    pub fn branch(&self) -> &str {
        &self.branch
    }

    #[must_use]
    pub fn state(&self) -> MergeState {
        self.history.last().copied().unwrap_or(MergeState::Idle)
    }

    /// Every state visited, starting with `Idle`.
    #[must_use]
    pub fn history(&self) -> &[MergeState] {
        &self.history
    }

    fn advance(&mut self, next: MergeState) {
        let current = self.state();
        debug_assert!(
            current.can_transition_to(next),
            "illegal merge transition {current:?} -> {next:?}"
        );
        info!(branch = %self.branch, from = ?current, to = ?next, "merge state");
        self.history.push(next);
    }
}

/// Reads the merge marker; `Ok(true)` when it exists with content.
fn merge_in_progress(handle: &RepositoryHandle) -> std::io::Result<bool> {
    match std::fs::read_to_string(handle.merge_marker()) {
        Ok(content) => Ok(!content.trim().is_empty()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

/// Drives [`MergeAttempt`]s.
pub struct MergeOrchestrator;

impl MergeOrchestrator {
    /// Merges `branch` into the branch checked out at `path`.
    ///
    /// Returns the finished attempt on success. A conflicting merge is
    /// aborted before this returns.
    ///
    /// # Errors
    ///
    /// - `GitError::NotARepository` if `path` is not in a repository.
    /// - `GitError::NoBranchSelected` if `branch` is blank.
    /// - `GitError::MergeInProgress` if an earlier merge is unfinished.
    /// - `GitError::SameBranch` if `branch` is the current branch.
    /// - `GitError::MergeConflict` after a conflict was detected and aborted.
    /// - `GitError::CommandFailed` if git refused the merge without starting it.
    /// - `GitError::MergeProcess` if launching git or reading the marker failed.
    pub async fn merge(git: &Git, path: &Path, branch: &str) -> FmResult<MergeAttempt> {
        let handle = locator::locate(path)?;
        let branch = short_branch_name(branch);
        if branch.is_empty() {
            return Err(GitError::NoBranchSelected.into());
        }
        // the marker must be absent before launching, or it reads as our conflict
        if merge_in_progress(&handle)? {
            return Err(GitError::MergeInProgress {
                path: handle.work_tree().display().to_string(),
            }
            .into());
        }
        let current = git.query().current_branch(&handle).await.unwrap_or_else(|e| {
            warn!(repo = %handle, error = %e, "failed to read current branch");
            None
        });
        if current.as_deref() == Some(branch) {
            return Err(GitError::SameBranch {
                branch: branch.to_string(),
            }
            .into());
        }

        let mut attempt = MergeAttempt::new(branch);
        attempt.advance(MergeState::Running);

        let result = git.mutation().merge(&handle, branch).await.map_err(|e| {
            error!(repo = %handle, branch, error = %e, "failed to launch merge");
            GitError::MergeProcess
        })?;
        let conflicted = merge_in_progress(&handle).map_err(|e| {
            error!(repo = %handle, error = %e, "failed to read merge marker");
            GitError::MergeProcess
        })?;

        if !conflicted {
            if !result.success() {
                return Err(GitError::CommandFailed {
                    command: "git merge".to_string(),
                    message: result.message(),
                }
                .into());
            }
            attempt.advance(MergeState::Succeeded);
            return Ok(attempt);
        }

        attempt.advance(MergeState::ConflictDetected);
        attempt.advance(MergeState::Aborting);
        git.mutation().merge_abort(&handle).await.map_err(|e| {
            error!(repo = %handle, error = %e, "merge --abort failed");
            GitError::MergeProcess
        })?;
        attempt.advance(MergeState::Aborted);

        Err(GitError::MergeConflict {
            branch: branch.to_string(),
        }
        .into())
    }
}
