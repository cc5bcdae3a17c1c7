// fmgit: File Manager Git Engine
//
// SPDX-FileCopyrightText: 2026 fmgit contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Repository command handlers.
//!
//! Each handler resolves its repository fresh through the service it calls;
//! nothing is cached between commands.

use serde::Serialize;
use tracing::warn;

use super::print_json;
use crate::cli::git::{
    BranchArgs, BranchSubcommand, CloneArgs, CommitArgs, InitArgs, LocateArgs, LogArgs,
    LogSubcommand, MergeArgs, MoveArgs, PathArgs, RemoveArgs, RestoreArgs, StatusArgs,
};
use crate::config::Config;
use crate::error::Result;
use crate::git::Git;
use crate::git::branch::BranchService;
use crate::git::clone::{CloneService, CredentialPrompt, CredentialStore, NoPrompt, TerminalPrompt};
use crate::git::commit::CommitService;
use crate::git::files::FileService;
use crate::git::history;
use crate::git::locator;
use crate::git::merge::MergeOrchestrator;
use crate::git::status::{PathStatus, StatusInspector};

#[derive(Serialize)]
struct LocateReport<'a> {
    work_tree: &'a std::path::Path,
    git_dir: &'a std::path::Path,
}

#[derive(Serialize)]
struct StatusReport {
    path: std::path::PathBuf,
    status: PathStatus,
}

/// `locate`: prints the working tree root owning a path.
///
/// # Errors
///
/// Returns an error if the path is not inside a repository.
pub fn run_locate_command(args: &LocateArgs, json: bool) -> Result<()> {
    let handle = locator::locate(&args.path)?;
    if json {
        return print_json(&LocateReport {
            work_tree: handle.work_tree(),
            git_dir: handle.git_dir(),
        });
    }
    println!("{handle}");
    Ok(())
}

/// `status`: one row per path. Never fails on a single path.
///
/// # Errors
///
/// Returns an error only if JSON output fails.
pub async fn run_status_command(args: &StatusArgs, git: &Git, json: bool) -> Result<()> {
    let mut reports = Vec::with_capacity(args.paths.len());
    for path in &args.paths {
        let status = StatusInspector::status_of(git, path).await;
        reports.push(StatusReport {
            path: path.clone(),
            status,
        });
    }
    if json {
        return print_json(&reports);
    }
    for report in &reports {
        println!("{:<16} {}", report.status.as_str(), report.path.display());
    }
    Ok(())
}

/// `branch` subcommands.
///
/// # Errors
///
/// Returns an error if the branch operation fails.
pub async fn run_branch_command(args: &BranchArgs, git: &Git, json: bool) -> Result<()> {
    match &args.subcommand {
        BranchSubcommand::List { repo, local } => {
            let current = BranchService::current_branch(git, &repo.repo).await;
            let branches: Vec<_> = BranchService::list(git, &repo.repo)
                .await?
                .into_iter()
                .filter(|branch| !*local || !branch.is_remote())
                .collect();
            if json {
                return print_json(&branches);
            }
            for branch in &branches {
                let marker = if !branch.is_remote() && branch.short_name() == current {
                    '*'
                } else {
                    ' '
                };
                println!("{marker} {}", branch.short_name());
            }
        }
        BranchSubcommand::Current { repo } => {
            let current = BranchService::current_branch(git, &repo.repo).await;
            if json {
                return print_json(&current);
            }
            println!("{current}");
        }
        BranchSubcommand::Create { name, repo } => {
            BranchService::create(git, &repo.repo, name).await?;
            println!("Created branch {name}");
        }
        BranchSubcommand::Delete { name, repo } => {
            BranchService::delete(git, &repo.repo, name).await?;
            println!("Deleted branch {name}");
        }
        BranchSubcommand::Rename { old, new, repo } => {
            BranchService::rename(git, &repo.repo, old, new).await?;
            println!("Renamed branch {old} to {new}");
        }
        BranchSubcommand::Checkout { name, repo } => {
            let current = BranchService::checkout(git, &repo.repo, name).await?;
            println!("Switched to branch {current}");
        }
    }
    Ok(())
}

/// `merge`.
///
/// # Errors
///
/// Returns an error if the merge is rejected, conflicts (after aborting) or
/// fails.
pub async fn run_merge_command(args: &MergeArgs, git: &Git, json: bool) -> Result<()> {
    let attempt = MergeOrchestrator::merge(git, &args.repo.repo, &args.branch).await?;
    if json {
        return print_json(&attempt);
    }
    println!("Merged {}", attempt.branch());
    Ok(())
}

/// `add`.
///
/// # Errors
///
/// Returns an error if staging fails.
pub async fn run_add_command(args: &PathArgs, git: &Git) -> Result<()> {
    FileService::stage(git, &args.path).await?;
    Ok(())
}

/// `restore [--staged]`.
///
/// # Errors
///
/// Returns an error for untracked or newly added paths, or if git fails.
pub async fn run_restore_command(args: &RestoreArgs, git: &Git) -> Result<()> {
    if args.staged {
        FileService::unstage(git, &args.path).await?;
    } else {
        FileService::restore(git, &args.path).await?;
    }
    Ok(())
}

/// `rm [--cached]`.
///
/// # Errors
///
/// Returns an error for untracked paths or if git fails.
pub async fn run_rm_command(args: &RemoveArgs, git: &Git) -> Result<()> {
    FileService::remove(git, &args.path, args.cached).await?;
    Ok(())
}

/// `mv`.
///
/// # Errors
///
/// Returns an error for untracked paths, a destination outside the
/// repository, or if git fails.
pub async fn run_mv_command(args: &MoveArgs, git: &Git) -> Result<()> {
    let destination = FileService::move_path(git, &args.path, &args.to).await?;
    println!("{}", destination.display());
    Ok(())
}

/// `commit`: lists the staged set, then commits it.
///
/// # Errors
///
/// Returns an error if the commit is rejected or fails.
pub async fn run_commit_command(args: &CommitArgs, git: &Git, json: bool) -> Result<()> {
    let committed = CommitService::commit(git, &args.repo.repo, &args.message).await?;
    if json {
        return print_json(&committed);
    }
    println!("Committed {} file(s):", committed.len());
    for path in committed.iter() {
        println!("  {path}");
    }
    Ok(())
}

/// `clone`, asking for credentials when the remote requires them.
///
/// # Errors
///
/// Returns an error if the clone is rejected or fails.
pub async fn run_clone_command(
    args: &CloneArgs,
    git: &Git,
    config: &Config,
    json: bool,
) -> Result<()> {
    let store = CredentialStore::new(&config.git.credentials_file);
    let prompt: &dyn CredentialPrompt = if args.no_prompt || !config.git.prompt_credentials {
        &NoPrompt
    } else {
        &TerminalPrompt
    };
    let report = CloneService::clone(git, &args.url, &args.dest, &store, prompt).await?;
    if json {
        return print_json(&report);
    }
    println!("Cloned into {}", report.destination.display());
    Ok(())
}

/// `init`.
///
/// # Errors
///
/// Returns an error if the directory is unsuitable or git fails.
pub async fn run_init_command(args: &InitArgs, git: &Git) -> Result<()> {
    FileService::init(git, &args.dir).await?;
    println!("Initialized repository in {}", args.dir.display());
    Ok(())
}

/// `log` subcommands.
///
/// # Errors
///
/// Returns an error if the history cannot be read.
pub async fn run_log_command(args: &LogArgs, git: &Git, json: bool) -> Result<()> {
    match &args.subcommand {
        LogSubcommand::Graph { repo } => {
            let lines = history::graph(git, &repo.repo).await?;
            if json {
                return print_json(&lines);
            }
            for line in &lines {
                println!("{line}");
            }
        }
        LogSubcommand::History { repo } => {
            let commits = history::history(git, &repo.repo).await?;
            if json {
                return print_json(&commits);
            }
            if commits.is_empty() {
                warn!("no commits");
            }
            for commit in &commits {
                println!("{commit}");
            }
        }
        LogSubcommand::Show { id, repo } => {
            let details = history::details(git, &repo.repo, id).await?;
            if json {
                return print_json(&details);
            }
            println!("commit  {}", details.id);
            println!("author  {}", details.author);
            println!("time    {}", details.time);
            println!("parents {}", details.parents.join(" "));
            println!();
            println!("    {}", details.summary);
        }
    }
    Ok(())
}
