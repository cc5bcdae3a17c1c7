// fmgit: File Manager Git Engine
//
// SPDX-FileCopyrightText: 2026 fmgit contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Branch listing and lifecycle.
//!
//! ```text
//! refs/heads/feature            --> BranchRef { Local }
//! refs/remotes/origin/feature   --> BranchRef { Remote { origin } }
//! refs/remotes/origin/HEAD      --> skipped (symbolic)
//! ```
//!
//! Names may be given short (`feature`) or full (`refs/heads/feature`).

use std::path::Path;

use serde::Serialize;
use tracing::{info, warn};

use super::Git;
use super::backend::{GitMutation, GitQuery};
use super::locator;
use crate::error::{FmResult, GitError};

const LOCAL_PREFIX: &str = "refs/heads/";
const REMOTE_PREFIX: &str = "refs/remotes/";

/// Whether a branch lives locally or tracks a remote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum BranchKind {
    Local,
    Remote { remote: String },
}

/// A branch as listed by the repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BranchRef {
    full_name: String,
    #[serde(flatten)]
    kind: BranchKind,
}

impl BranchRef {
    /// Parses a full ref name. Returns `None` for non-branch refs and
    /// symbolic remote `HEAD`s.
    #[must_use]
    pub fn from_full_name(full_name: &str) -> Option<Self> {
        let full_name = full_name.trim();
        if let Some(name) = full_name.strip_prefix(LOCAL_PREFIX) {
            return (!name.is_empty()).then(|| Self {
                full_name: full_name.to_string(),
                kind: BranchKind::Local,
            });
        }
        let rest = full_name.strip_prefix(REMOTE_PREFIX)?;
        let (remote, name) = rest.split_once('/')?;
        if remote.is_empty() || name.is_empty() || name == "HEAD" {
            return None;
        }
        Some(Self {
            full_name: full_name.to_string(),
            kind: BranchKind::Remote {
                remote: remote.to_string(),
            },
        })
    }

    /// Full ref name, e.g. `refs/heads/main`.
    #[must_use]
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Name usable on the git command line, e.g. `main` or `origin/main`.
    #[must_use]
    pub fn short_name(&self) -> &str {
        short_branch_name(&self.full_name)
    }

    #[must_use]
    pub const fn kind(&self) -> &BranchKind {
        &self.kind
    }

    #[must_use]
    pub const fn is_remote(&self) -> bool {
        matches!(self.kind, BranchKind::Remote { .. })
    }
}

impl std::fmt::Display for BranchRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.full_name)
    }
}

/// Strips `refs/heads/` or `refs/remotes/` from a branch name.
#[must_use]
pub fn short_branch_name(name: &str) -> &str {
    let name = name.trim();
    name.strip_prefix(LOCAL_PREFIX)
        .or_else(|| name.strip_prefix(REMOTE_PREFIX))
        .unwrap_or(name)
}

/// Rejects blank names, returning the short form otherwise.
fn required_name<'a>(name: &'a str, what: &str) -> FmResult<&'a str> {
    let short = short_branch_name(name);
    if short.is_empty() {
        Err(GitError::blank(what).into())
    } else {
        Ok(short)
    }
}

/// Branch operations; each call resolves the repository from `path`.
pub struct BranchService;

impl BranchService {
    /// Current branch for `path`, or an empty string when the path is not in
    /// a repository, HEAD is detached, or the read fails.
    pub async fn current_branch(git: &Git, path: &Path) -> String {
        let Ok(handle) = locator::locate(path) else {
            return String::new();
        };
        match git.query().current_branch(&handle).await {
            Ok(branch) => branch.unwrap_or_default(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to read current branch");
                String::new()
            }
        }
    }

    /// All local and remote-tracking branches.
    ///
    /// # Errors
    ///
    /// Returns `GitError::NotARepository` or the backend's listing error.
    pub async fn list(git: &Git, path: &Path) -> FmResult<Vec<BranchRef>> {
        let handle = locator::locate(path)?;
        git.query().list_branches(&handle).await
    }

    /// Creates `name` at HEAD without switching to it.
    ///
    /// # Errors
    ///
    /// Returns `GitError::BlankInput` for a blank name and
    /// `GitError::CommandFailed` if git refuses (e.g. the branch exists).
    pub async fn create(git: &Git, path: &Path, name: &str) -> FmResult<()> {
        let handle = locator::locate(path)?;
        let name = required_name(name, "branch name")?;
        git.mutation().create_branch(&handle, name).await?;
        info!(branch = %name, repo = %handle, "branch created");
        Ok(())
    }

    /// Deletes a fully merged branch.
    ///
    /// # Errors
    ///
    /// Returns `GitError::NoBranchSelected` for a blank name and
    /// `GitError::CommandFailed` if git refuses.
    pub async fn delete(git: &Git, path: &Path, name: &str) -> FmResult<()> {
        let handle = locator::locate(path)?;
        let name = short_branch_name(name);
        if name.is_empty() {
            return Err(GitError::NoBranchSelected.into());
        }
        git.mutation().delete_branch(&handle, name).await?;
        info!(branch = %name, repo = %handle, "branch deleted");
        Ok(())
    }

    /// Renames `old_name` to `new_name`.
    ///
    /// # Errors
    ///
    /// Returns `GitError::NoBranchSelected` when `old_name` is blank,
    /// `GitError::BlankInput` when `new_name` is blank, and
    /// `GitError::CommandFailed` if git refuses.
    pub async fn rename(git: &Git, path: &Path, old_name: &str, new_name: &str) -> FmResult<()> {
        let handle = locator::locate(path)?;
        let old_name = short_branch_name(old_name);
        if old_name.is_empty() {
            return Err(GitError::NoBranchSelected.into());
        }
        let new_name = required_name(new_name, "new branch name")?;
        git.mutation()
            .rename_branch(&handle, old_name, new_name)
            .await?;
        info!(from = %old_name, to = %new_name, repo = %handle, "branch renamed");
        Ok(())
    }

    /// Switches the working tree to `name` and returns the branch name read
    /// back from the repository afterwards.
    ///
    /// # Errors
    ///
    /// Returns `GitError::BlankInput` for a blank name and
    /// `GitError::CommandFailed` if the checkout fails.
    pub async fn checkout(git: &Git, path: &Path, name: &str) -> FmResult<String> {
        let handle = locator::locate(path)?;
        let name = required_name(name, "branch name")?;
        git.mutation().checkout(&handle, name).await?;
        let current = Self::current_branch(git, handle.work_tree()).await;
        info!(branch = %current, repo = %handle, "checked out");
        Ok(current)
    }
}
