// fmgit: File Manager Git Engine
//
// SPDX-FileCopyrightText: 2026 fmgit contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Commit recording.
//!
//! ```text
//! commit(path, message)
//!   locate           --> NotARepository
//!   message blank?   --> EmptyCommitMessage
//!   staged set       (added ∪ modified ∪ removed, fresh query)
//!   empty?           --> NothingToCommit
//!   git commit -m    --> CommitFailed on any execution failure
//! ```

use std::collections::BTreeSet;
use std::path::Path;

use serde::Serialize;
use tracing::{error, info};

use super::Git;
use super::backend::{GitMutation, GitQuery};
use super::locator;
use crate::error::{FmResult, GitError};

/// Paths with changes recorded in the index, relative to the working tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StagedFileSet(BTreeSet<String>);

impl StagedFileSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the set from `git status --porcelain` lines.
    ///
    /// Lines whose index column is blank or `?`/`!` are skipped; for renames
    /// both sides are recorded.
    #[must_use]
    pub fn from_porcelain<S: AsRef<str>>(lines: &[S]) -> Self {
        let mut set = Self::new();
        for line in lines {
            let line = line.as_ref();
            let Some(index) = line.chars().next() else {
                continue;
            };
            if matches!(index, ' ' | '?' | '!') {
                continue;
            }
            let Some(path) = line.get(3..) else {
                continue;
            };
            match path.split_once(" -> ") {
                Some((from, to)) => {
                    set.insert(from);
                    set.insert(to);
                }
                None => set.insert(path),
            }
        }
        set
    }

    pub fn insert(&mut self, path: impl Into<String>) {
        self.0.insert(path.into());
    }

    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.0.contains(path)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for StagedFileSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Records commits.
pub struct CommitService;

impl CommitService {
    /// Staged paths of the repository owning `path`.
    ///
    /// # Errors
    ///
    /// Returns `GitError::NotARepository` or the backend's query error.
    pub async fn staged_files(git: &Git, path: &Path) -> FmResult<StagedFileSet> {
        let handle = locator::locate(path)?;
        git.query().staged_files(&handle).await
    }

    /// Commits the index with `message`, returning the committed paths.
    ///
    /// # Errors
    ///
    /// - `GitError::NotARepository` if `path` is not in a repository.
    /// - `GitError::EmptyCommitMessage` if `message` is blank.
    /// - `GitError::NothingToCommit` if nothing is staged.
    /// - `GitError::CommitFailed` for any failure while querying or committing.
    pub async fn commit(git: &Git, path: &Path, message: &str) -> FmResult<StagedFileSet> {
        let handle = locator::locate(path)?;
        if message.trim().is_empty() {
            return Err(GitError::EmptyCommitMessage.into());
        }

        let staged = git.query().staged_files(&handle).await.map_err(|e| {
            error!(repo = %handle, error = %e, "failed to compute staged files");
            GitError::CommitFailed
        })?;
        if staged.is_empty() {
            return Err(GitError::NothingToCommit.into());
        }

        git.mutation()
            .commit(&handle, message)
            .await
            .map_err(|e| {
                error!(repo = %handle, error = %e, "commit failed");
                GitError::CommitFailed
            })?;

        info!(repo = %handle, files = staged.len(), "committed");
        Ok(staged)
    }
}
