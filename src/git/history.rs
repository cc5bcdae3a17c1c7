// fmgit: File Manager Git Engine
//
// SPDX-FileCopyrightText: 2026 fmgit contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Commit graph, history and details.
//!
//! Log fields are separated by the unit separator (0x1f).

use std::path::Path;

use serde::Serialize;

use super::Git;
use super::locator;
use crate::error::{FmResult, GitError};

const FIELD_SEPARATOR: char = '\x1f';

/// Parent ids are shown abbreviated to this many characters.
pub const SHORT_ID_LEN: usize = 10;

/// One entry of the commit history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitSummary {
    pub id: String,
    pub summary: String,
}

impl CommitSummary {
    pub(super) fn parse(line: &str) -> Option<Self> {
        let (id, summary) = line.split_once(FIELD_SEPARATOR)?;
        Some(Self {
            id: id.to_string(),
            summary: summary.to_string(),
        })
    }
}

impl std::fmt::Display for CommitSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - [{}]", self.id, self.summary)
    }
}

/// Metadata of a single commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitDetails {
    pub id: String,
    pub author: String,
    /// Author time, seconds since the epoch.
    pub time: i64,
    /// Abbreviated parent ids.
    pub parents: Vec<String>,
    pub summary: String,
}

impl CommitDetails {
    pub(super) fn parse(line: &str) -> Option<Self> {
        let mut fields = line.splitn(5, FIELD_SEPARATOR);
        let id = fields.next()?.to_string();
        let author = fields.next()?.to_string();
        let time = fields.next()?.trim().parse().ok()?;
        let parents = fields
            .next()?
            .split_whitespace()
            .map(|parent| parent.chars().take(SHORT_ID_LEN).collect())
            .collect();
        let summary = fields.next()?.to_string();
        Some(Self {
            id,
            author,
            time,
            parents,
            summary,
        })
    }
}

/// Graph of every commit reachable from any ref, as drawn by `git log --graph`.
///
/// # Errors
///
/// Returns `GitError::NotARepository` or `GitError::CommandFailed`.
pub async fn graph(git: &Git, path: &Path) -> FmResult<Vec<String>> {
    let handle = locator::locate(path)?;
    let result = git
        .runner()
        .run_in(&handle, &["log", "--graph", "--all", "--pretty=format:"])
        .await?
        .into_checked("git log")?;
    Ok(result
        .stdout()
        .iter()
        .map(|line| line.trim_end().to_string())
        .collect())
}

/// Every commit reachable from any ref, newest first.
///
/// # Errors
///
/// Returns `GitError::NotARepository` or `GitError::CommandFailed`.
pub async fn history(git: &Git, path: &Path) -> FmResult<Vec<CommitSummary>> {
    let handle = locator::locate(path)?;
    let result = git
        .runner()
        .run_in(&handle, &["log", "--all", "--format=%H%x1f%s"])
        .await?
        .into_checked("git log")?;
    Ok(result
        .stdout()
        .iter()
        .filter_map(|line| CommitSummary::parse(line))
        .collect())
}

/// Details of commit `id` (any revision git accepts).
///
/// # Errors
///
/// - `GitError::BlankInput` if `id` is blank.
/// - `GitError::CommandFailed` if git does not know the revision or prints
///   something unexpected.
pub async fn details(git: &Git, path: &Path, id: &str) -> FmResult<CommitDetails> {
    let handle = locator::locate(path)?;
    let id = id.trim();
    if id.is_empty() {
        return Err(GitError::blank("commit id").into());
    }
    let result = git
        .runner()
        .run_in(
            &handle,
            &[
                "show",
                "-s",
                "--format=%H%x1f%an <%ae>%x1f%at%x1f%P%x1f%s",
                id,
                "--",
            ],
        )
        .await?
        .into_checked("git show")?;
    result
        .first_line()
        .and_then(CommitDetails::parse)
        .ok_or_else(|| {
            GitError::CommandFailed {
                command: "git show".to_string(),
                message: format!("unexpected output for {id}"),
            }
            .into()
        })
}
