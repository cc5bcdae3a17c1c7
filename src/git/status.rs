// fmgit: File Manager Git Engine
//
// SPDX-FileCopyrightText: 2026 fmgit contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Per-path status classification.
//!
//! ```text
//! short code (index, worktree)      PathStatus
//!   (no output)                 --> Clean
//!   "??"                        --> Untracked
//!   "A "                        --> Staged
//!   "X " (X != ' ')             --> Staged
//!   " Y" (Y != ' ')             --> Modified
//!   "XY"                        --> StagedAndModified
//! ```

use std::path::Path;

use serde::Serialize;
use tracing::warn;

use super::Git;
use super::backend::GitQuery;
use super::locator;

/// Classification of one path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PathStatus {
    Untracked,
    Clean,
    Modified,
    Staged,
    StagedAndModified,
    /// The path is the `.git` directory or lies inside it.
    IsMetadataDirectory,
    NotARepository,
    /// The status query itself failed.
    Error,
}

impl PathStatus {
    /// Classifies a two-character short-status code.
    ///
    /// Anything shorter than two characters is malformed and yields `Error`.
    #[must_use]
    pub fn from_short_code(code: &str) -> Self {
        let mut chars = code.chars();
        let (Some(index), Some(worktree)) = (chars.next(), chars.next()) else {
            return Self::Error;
        };
        match (index, worktree) {
            ('?', '?') => Self::Untracked,
            (' ', ' ') => Self::Clean,
            (_, ' ') => Self::Staged,
            (' ', _) => Self::Modified,
            _ => Self::StagedAndModified,
        }
    }

    /// Classifies status output; only the first line counts.
    #[must_use]
    pub fn from_status_output<S: AsRef<str>>(lines: &[S]) -> Self {
        lines
            .first()
            .map_or(Self::Clean, |line| Self::from_short_code(line.as_ref()))
    }

    /// True if the path is known to git (tracked in HEAD or the index).
    #[must_use]
    pub const fn is_tracked(self) -> bool {
        matches!(
            self,
            Self::Clean | Self::Modified | Self::Staged | Self::StagedAndModified
        )
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Untracked => "untracked",
            Self::Clean => "clean",
            Self::Modified => "modified",
            Self::Staged => "staged",
            Self::StagedAndModified => "staged+modified",
            Self::IsMetadataDirectory => "git-dir",
            Self::NotARepository => "not-a-repository",
            Self::Error => "error",
        }
    }
}

impl std::fmt::Display for PathStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Answers "what is the state of this path" for callers.
pub struct StatusInspector;

impl StatusInspector {
    /// Status of `path`, resolved fresh.
    ///
    /// Never fails: an unresolvable path is `NotARepository` and a failing
    /// query is `Error`.
    pub async fn status_of(git: &Git, path: &Path) -> PathStatus {
        let Ok(handle) = locator::locate(path) else {
            return PathStatus::NotARepository;
        };
        if handle.is_metadata_path(path) {
            return PathStatus::IsMetadataDirectory;
        }
        match git.query().path_status(&handle, path).await {
            Ok(status) => status,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "status query failed");
                PathStatus::Error
            }
        }
    }
}
