// fmgit: File Manager Git Engine
//
// SPDX-FileCopyrightText: 2026 fmgit contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git CLI backend.

use std::path::{Path, PathBuf};

use super::{GitMutation, GitQuery};
use crate::error::{FmResult, GitError};
use crate::git::branch::BranchRef;
use crate::git::clone::Credentials;
use crate::git::commit::StagedFileSet;
use crate::git::locator::RepositoryHandle;
use crate::git::runner::{CommandResult, CommandRunner};
use crate::git::status::PathStatus;

/// Keeps non-ASCII paths unescaped in porcelain output.
const NO_QUOTEPATH: [&str; 2] = ["-c", "core.quotepath=false"];

/// Shell-based git backend.
///
/// Every invocation goes through [`CommandRunner`].
#[derive(Debug, Clone, Default)]
pub struct ShellBackend {
    runner: CommandRunner,
}

impl ShellBackend {
    #[must_use]
    pub const fn new(runner: CommandRunner) -> Self {
        Self { runner }
    }

    #[must_use]
    pub const fn runner(&self) -> &CommandRunner {
        &self.runner
    }

    /// Runs `args` in `dir` and fails on a non-zero exit.
    async fn checked(&self, dir: &Path, args: &[&str]) -> FmResult<CommandResult> {
        let result = self.runner.run(dir, args).await?;
        let command = args
            .iter()
            .find(|arg| !arg.starts_with('-') && !arg.contains('='))
            .map_or_else(|| "git".to_string(), |sub| format!("git {sub}"));
        result.into_checked(&command)
    }
}

/// Splits `path` into the directory to run in and the argument naming it.
///
/// The working tree root itself is addressed as `.` from inside.
fn path_target(handle: &RepositoryHandle, path: &Path) -> (PathBuf, String) {
    let is_root = handle
        .relative_path(path)
        .is_some_and(|rel| rel.as_os_str().is_empty());
    if is_root {
        return (handle.work_tree().to_path_buf(), ".".to_string());
    }
    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) => {
            let parent = if parent.as_os_str().is_empty() {
                Path::new(".")
            } else {
                parent
            };
            (parent.to_path_buf(), name.to_string_lossy().into_owned())
        }
        _ => (handle.work_tree().to_path_buf(), path.to_string_lossy().into_owned()),
    }
}

impl GitQuery for ShellBackend {
    async fn current_branch(&self, handle: &RepositoryHandle) -> FmResult<Option<String>> {
        let result = self
            .runner
            .run_in(handle, &["symbolic-ref", "--short", "-q", "HEAD"])
            .await?;
        match result.exit_code() {
            0 => Ok(result.first_line().map(str::to_string)),
            // detached HEAD
            1 => Ok(None),
            _ => Err(GitError::CommandFailed {
                command: "git symbolic-ref".to_string(),
                message: result.message(),
            }
            .into()),
        }
    }

    async fn list_branches(&self, handle: &RepositoryHandle) -> FmResult<Vec<BranchRef>> {
        let result = self
            .checked(
                handle.work_tree(),
                &[
                    "for-each-ref",
                    "--format=%(refname)",
                    "refs/heads",
                    "refs/remotes",
                ],
            )
            .await?;
        Ok(result
            .stdout()
            .iter()
            .filter_map(|line| BranchRef::from_full_name(line))
            .collect())
    }

    async fn path_status(&self, handle: &RepositoryHandle, path: &Path) -> FmResult<PathStatus> {
        let (dir, name) = path_target(handle, path);
        let mut args = NO_QUOTEPATH.to_vec();
        args.extend(["status", "--porcelain", "--", name.as_str()]);
        let result = self.checked(&dir, &args).await?;
        Ok(PathStatus::from_status_output(result.stdout()))
    }

    async fn staged_files(&self, handle: &RepositoryHandle) -> FmResult<StagedFileSet> {
        let mut args = NO_QUOTEPATH.to_vec();
        args.extend(["status", "--porcelain", "--untracked-files=no"]);
        let result = self.checked(handle.work_tree(), &args).await?;
        Ok(StagedFileSet::from_porcelain(result.stdout()))
    }
}

impl GitMutation for ShellBackend {
    async fn add(&self, handle: &RepositoryHandle, path: &Path) -> FmResult<()> {
        let (dir, name) = path_target(handle, path);
        self.checked(&dir, &["add", "--", &name]).await?;
        Ok(())
    }

    async fn restore(&self, handle: &RepositoryHandle, path: &Path, staged: bool) -> FmResult<()> {
        let (dir, name) = path_target(handle, path);
        let mut args = vec!["restore"];
        if staged {
            args.push("--staged");
        }
        args.extend(["--", name.as_str()]);
        self.checked(&dir, &args).await?;
        Ok(())
    }

    async fn remove(&self, handle: &RepositoryHandle, path: &Path, cached: bool) -> FmResult<()> {
        let (dir, name) = path_target(handle, path);
        let mut args = vec!["rm", "-q"];
        if path.is_dir() {
            args.push("-r");
        }
        if cached {
            args.push("--cached");
        }
        args.extend(["--", name.as_str()]);
        self.checked(&dir, &args).await?;
        Ok(())
    }

    async fn move_path(&self, handle: &RepositoryHandle, from: &Path, to: &str) -> FmResult<()> {
        let (dir, name) = path_target(handle, from);
        self.checked(&dir, &["mv", "--", &name, to]).await?;
        Ok(())
    }

    async fn commit(&self, handle: &RepositoryHandle, message: &str) -> FmResult<()> {
        self.checked(handle.work_tree(), &["commit", "-q", "-m", message])
            .await?;
        Ok(())
    }

    async fn create_branch(&self, handle: &RepositoryHandle, name: &str) -> FmResult<()> {
        self.checked(handle.work_tree(), &["branch", name]).await?;
        Ok(())
    }

    async fn delete_branch(&self, handle: &RepositoryHandle, name: &str) -> FmResult<()> {
        self.checked(handle.work_tree(), &["branch", "-d", name])
            .await?;
        Ok(())
    }

    async fn rename_branch(
        &self,
        handle: &RepositoryHandle,
        old: &str,
        new: &str,
    ) -> FmResult<()> {
        self.checked(handle.work_tree(), &["branch", "-m", old, new])
            .await?;
        Ok(())
    }

    async fn checkout(&self, handle: &RepositoryHandle, name: &str) -> FmResult<()> {
        self.checked(handle.work_tree(), &["checkout", "-q", name])
            .await?;
        Ok(())
    }

    async fn merge(&self, handle: &RepositoryHandle, branch: &str) -> FmResult<CommandResult> {
        self.runner
            .run_in(handle, &["merge", "--no-edit", branch])
            .await
    }

    async fn merge_abort(&self, handle: &RepositoryHandle) -> FmResult<()> {
        self.checked(handle.work_tree(), &["merge", "--abort"])
            .await?;
        Ok(())
    }

    async fn clone_repo(
        &self,
        url: &str,
        dest: &Path,
        credentials: Option<&Credentials>,
    ) -> FmResult<CommandResult> {
        let dest = std::path::absolute(dest)?;
        let parent = dest.parent().unwrap_or_else(|| Path::new("/"));
        std::fs::create_dir_all(parent)?;
        let dest = dest.to_string_lossy();
        let args = ["clone", "--quiet", "--", url, dest.as_ref()];
        match credentials {
            Some(credentials) => {
                let env = credentials.helper_env();
                self.runner.run_with_env(parent, &args, &env).await
            }
            None => self.runner.run(parent, &args).await,
        }
    }

    async fn init(&self, dir: &Path) -> FmResult<()> {
        self.checked(dir, &["init", "-q"]).await?;
        Ok(())
    }
}
