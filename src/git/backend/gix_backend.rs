// fmgit: File Manager Git Engine
//
// SPDX-FileCopyrightText: 2026 fmgit contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Pure Rust query backend on top of gix.
//!
//! ```text
//! status item                               index  worktree
//! TreeIndex Addition                          A
//! TreeIndex Deletion                          D
//! TreeIndex Modification/Rewrite              M
//! IndexWorktree Modification (content)               M / D / U
//! IndexWorktree Modification (stat only)      (ignored)
//! IndexWorktree DirectoryContents untracked   ?       ?
//! ```
//!
//! Codes are folded into the same two-character form the CLI prints, so both
//! backends classify through `PathStatus::from_short_code`.

use std::collections::BTreeMap;
use std::path::Path;

use gix::bstr::{BString, ByteSlice as _};

use super::GitQuery;
use crate::error::{FmResult, GixError};
use crate::git::branch::BranchRef;
use crate::git::commit::StagedFileSet;
use crate::git::locator::RepositoryHandle;
use crate::git::status::PathStatus;

/// Pure Rust git backend using gix.
///
/// Read-only; never spawns a subprocess.
#[derive(Debug, Clone, Copy, Default)]
pub struct GixBackend;

/// Index and worktree columns of one path.
#[derive(Debug, Clone, Copy)]
struct Columns {
    index: char,
    worktree: char,
}

impl Default for Columns {
    fn default() -> Self {
        Self {
            index: ' ',
            worktree: ' ',
        }
    }
}

impl Columns {
    fn code(self) -> String {
        [self.index, self.worktree].iter().collect()
    }

    const fn is_untracked(self) -> bool {
        self.index == '?'
    }
}

fn open(handle: &RepositoryHandle) -> FmResult<gix::Repository> {
    let repo = gix::discover(handle.work_tree()).map_err(|e| GixError::Discover(Box::new(e)))?;
    if repo.workdir().is_none() {
        return Err(GixError::BareRepository.into());
    }
    Ok(repo)
}

/// Literal, root-relative pathspec for one working tree path.
fn literal_pathspec(relative: &str) -> BString {
    format!(":(top,literal){relative}").into()
}

/// Runs a status limited to `patterns` (everything when empty) and calls `f`
/// with each item's location and columns.
fn for_each_change(
    repo: &gix::Repository,
    patterns: Vec<BString>,
    mut f: impl FnMut(String, Columns),
) -> FmResult<()> {
    use gix::status::index_worktree::Item as WorktreeItem;
    use gix::status::plumbing::index_as_worktree::{Change, EntryStatus};

    let iter = repo
        .status(gix::progress::Discard)
        .map_err(|e| GixError::operation("status", e))?
        .untracked_files(gix::status::UntrackedFiles::Files)
        .into_iter(patterns)
        .map_err(|e| GixError::operation("status", e))?;

    for item in iter {
        let item = item.map_err(|e| GixError::operation("status item", e))?;
        let location = item.location().to_str_lossy().into_owned();
        let columns = match &item {
            gix::status::Item::TreeIndex(change) => {
                let index = match change {
                    gix::diff::index::ChangeRef::Addition { .. } => 'A',
                    gix::diff::index::ChangeRef::Deletion { .. } => 'D',
                    _ => 'M',
                };
                Columns {
                    index,
                    ..Columns::default()
                }
            }
            gix::status::Item::IndexWorktree(WorktreeItem::Modification { status, .. }) => {
                let worktree = match status {
                    EntryStatus::NeedsUpdate(_) => continue,
                    EntryStatus::Conflict { .. } => 'U',
                    EntryStatus::IntentToAdd => 'A',
                    EntryStatus::Change(Change::Removed) => 'D',
                    EntryStatus::Change(_) => 'M',
                };
                Columns {
                    worktree,
                    ..Columns::default()
                }
            }
            gix::status::Item::IndexWorktree(WorktreeItem::DirectoryContents {
                entry, ..
            }) => {
                if entry.status != gix::dir::entry::Status::Untracked {
                    continue;
                }
                Columns {
                    index: '?',
                    worktree: '?',
                }
            }
            gix::status::Item::IndexWorktree(WorktreeItem::Rewrite { .. }) => Columns {
                worktree: 'R',
                ..Columns::default()
            },
        };
        f(location, columns);
    }
    Ok(())
}

/// Folds a new observation into the columns already seen for a path.
fn merge_columns(seen: &mut Columns, new: Columns) {
    if new.is_untracked() {
        *seen = new;
        return;
    }
    if new.index != ' ' {
        seen.index = new.index;
    }
    if new.worktree != ' ' {
        seen.worktree = new.worktree;
    }
}

/// True if `location` is `prefix` or lies below it. An empty prefix matches all.
pub(super) fn under(location: &str, prefix: &str) -> bool {
    prefix.is_empty()
        || location == prefix
        || location
            .strip_prefix(prefix)
            .is_some_and(|rest| rest.starts_with('/'))
}

impl GitQuery for GixBackend {
    async fn current_branch(&self, handle: &RepositoryHandle) -> FmResult<Option<String>> {
        let repo = open(handle)?;
        let head = repo.head_name().map_err(GixError::Head)?;
        Ok(head.map(|name| name.shorten().to_string()))
    }

    async fn list_branches(&self, handle: &RepositoryHandle) -> FmResult<Vec<BranchRef>> {
        let repo = open(handle)?;
        let platform = repo
            .references()
            .map_err(|e| GixError::operation("references", e))?;

        let mut branches = Vec::new();
        let local = platform
            .local_branches()
            .map_err(|e| GixError::operation("local branches", e))?;
        for reference in local {
            let reference = reference.map_err(|e| GixError::operation("local branches", e))?;
            let name = reference.name().as_bstr().to_str_lossy();
            branches.extend(BranchRef::from_full_name(&name));
        }
        let remote = platform
            .remote_branches()
            .map_err(|e| GixError::operation("remote branches", e))?;
        for reference in remote {
            let reference = reference.map_err(|e| GixError::operation("remote branches", e))?;
            let name = reference.name().as_bstr().to_str_lossy();
            branches.extend(BranchRef::from_full_name(&name));
        }
        Ok(branches)
    }

    async fn path_status(&self, handle: &RepositoryHandle, path: &Path) -> FmResult<PathStatus> {
        let relative = handle
            .relative_path(path)
            .map(|rel| rel.to_string_lossy().replace('\\', "/"))
            .unwrap_or_default();
        let repo = open(handle)?;

        let patterns = if relative.is_empty() {
            Vec::new()
        } else {
            vec![literal_pathspec(&relative)]
        };

        let mut changes: BTreeMap<String, Columns> = BTreeMap::new();
        for_each_change(&repo, patterns, |location, columns| {
            if under(&location, &relative) {
                merge_columns(changes.entry(location).or_default(), columns);
            }
        })?;

        // porcelain order: tracked changes first, then untracked
        let first = changes
            .values()
            .find(|columns| !columns.is_untracked())
            .or_else(|| changes.values().next());
        Ok(first.map_or(PathStatus::Clean, |columns| {
            PathStatus::from_short_code(&columns.code())
        }))
    }

    async fn staged_files(&self, handle: &RepositoryHandle) -> FmResult<StagedFileSet> {
        let repo = open(handle)?;
        let mut staged = StagedFileSet::new();
        for_each_change(&repo, Vec::new(), |location, columns| {
            if !matches!(columns.index, ' ' | '?') {
                staged.insert(location);
            }
        })?;
        Ok(staged)
    }
}
