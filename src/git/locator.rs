// fmgit: File Manager Git Engine
//
// SPDX-FileCopyrightText: 2026 fmgit contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Repository resolution by directory walk.
//!
//! ```text
//! locate(/repo/src/lib/a.rs)
//!   /repo/src/lib/.git ? no
//!   /repo/src/.git     ? no
//!   /repo/.git         ? dir --> RepositoryHandle { /repo, /repo/.git }
//!   ...
//!   /                  --> NotARepository
//! ```
//!
//! Only `Path::is_dir` checks, never a subprocess. Handles are resolved
//! fresh for every operation.

use std::path::{Path, PathBuf};

use tracing::trace;

use crate::error::{FmResult, GitError};

/// Name of the repository metadata directory.
pub const METADATA_DIR: &str = ".git";

/// Marker file present while a merge is unresolved.
pub const MERGE_MARKER: &str = "MERGE_HEAD";

/// A resolved repository: working tree root plus metadata directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryHandle {
    work_tree: PathBuf,
    git_dir: PathBuf,
}

impl RepositoryHandle {
    /// Absolute working tree root.
    #[must_use]
    pub fn work_tree(&self) -> &Path {
        &self.work_tree
    }

    /// Absolute metadata directory (`<work_tree>/.git`).
    #[must_use]
    pub fn git_dir(&self) -> &Path {
        &self.git_dir
    }

    /// Path of the merge-in-progress marker.
    #[must_use]
    pub fn merge_marker(&self) -> PathBuf {
        self.git_dir.join(MERGE_MARKER)
    }

    /// True if `path` is the metadata directory or lies inside it.
    #[must_use]
    pub fn is_metadata_path(&self, path: &Path) -> bool {
        absolute(path).is_ok_and(|path| path.starts_with(&self.git_dir))
    }

    /// `path` relative to the working tree, if it lies inside it.
    #[must_use]
    pub fn relative_path(&self, path: &Path) -> Option<PathBuf> {
        let path = absolute(path).ok()?;
        path.strip_prefix(&self.work_tree)
            .ok()
            .map(Path::to_path_buf)
    }
}

impl std::fmt::Display for RepositoryHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.work_tree.display())
    }
}

/// Resolves the repository that owns `path`.
///
/// `path` must exist; a file starts the walk at its parent directory.
///
/// # Errors
///
/// Returns `GitError::NotARepository` if `path` does not exist or no
/// ancestor holds a `.git` directory.
pub fn locate(path: &Path) -> FmResult<RepositoryHandle> {
    let not_a_repository = || GitError::NotARepository {
        path: path.display().to_string(),
    };

    let metadata = std::fs::metadata(path).map_err(|_| not_a_repository())?;
    let path = absolute(path).map_err(|_| not_a_repository())?;
    let start = if metadata.is_dir() {
        path.as_path()
    } else {
        path.parent().ok_or_else(not_a_repository)?
    };

    walk_up(start).ok_or_else(|| not_a_repository().into())
}

/// Like [`locate`], but starts from the nearest existing ancestor of `path`.
///
/// Used for destinations that do not exist yet.
///
/// # Errors
///
/// Returns `GitError::NotARepository` if no ancestor holds a `.git` directory.
pub fn locate_nearest(path: &Path) -> FmResult<RepositoryHandle> {
    let not_a_repository = || GitError::NotARepository {
        path: path.display().to_string(),
    };

    let path = absolute(path).map_err(|_| not_a_repository())?;
    let existing = path
        .ancestors()
        .find(|candidate| candidate.exists())
        .ok_or_else(not_a_repository)?;
    locate(existing)
}

/// True if `path` belongs to any repository.
#[must_use]
pub fn is_repository(path: &Path) -> bool {
    locate(path).is_ok()
}

fn walk_up(start: &Path) -> Option<RepositoryHandle> {
    for dir in start.ancestors() {
        let candidate = dir.join(METADATA_DIR);
        trace!(dir = %dir.display(), "probing for metadata directory");
        if candidate.is_dir() {
            return Some(RepositoryHandle {
                work_tree: dir.to_path_buf(),
                git_dir: candidate,
            });
        }
    }
    None
}

/// Makes `path` absolute and drops `.` components without touching symlinks.
fn absolute(path: &Path) -> std::io::Result<PathBuf> {
    let path = std::path::absolute(path)?;
    Ok(path
        .components()
        .filter(|c| !matches!(c, std::path::Component::CurDir))
        .collect())
}
