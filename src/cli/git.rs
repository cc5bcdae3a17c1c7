// fmgit: File Manager Git Engine
//
// SPDX-FileCopyrightText: 2026 fmgit contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Repository command arguments.
//!
//! Path commands take the path they act on; repository commands take
//! `-C <dir>` (default `.`) naming any path inside the repository.

use clap::{Args, Subcommand};
use std::path::PathBuf;

/// Any path inside the repository to operate on.
#[derive(Debug, Clone, Args)]
pub struct RepoArg {
    /// Path inside the repository.
    #[arg(short = 'C', long = "repo", value_name = "PATH", default_value = ".")]
    pub repo: PathBuf,
}

/// Arguments for `locate`.
#[derive(Debug, Clone, Args)]
pub struct LocateArgs {
    /// Path to resolve.
    #[arg(value_name = "PATH", default_value = ".")]
    pub path: PathBuf,
}

/// Arguments for `status`.
#[derive(Debug, Clone, Args)]
pub struct StatusArgs {
    /// Paths to inspect.
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<PathBuf>,
}

/// Arguments for `ls`.
#[derive(Debug, Clone, Args)]
pub struct LsArgs {
    /// Directory to list.
    #[arg(value_name = "DIR", default_value = ".")]
    pub dir: PathBuf,

    /// Hides dot files.
    #[arg(long = "no-hidden")]
    pub no_hidden: bool,

    /// Hides entries matched by .gitignore.
    #[arg(long = "respect-gitignore")]
    pub respect_gitignore: bool,
}

/// Arguments for `branch`.
#[derive(Debug, Clone, Args)]
pub struct BranchArgs {
    #[command(subcommand)]
    pub subcommand: BranchSubcommand,
}

/// Branch subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum BranchSubcommand {
    /// Lists local and remote-tracking branches.
    List {
        #[command(flatten)]
        repo: RepoArg,

        /// Only local branches.
        #[arg(long)]
        local: bool,
    },

    /// Prints the current branch (empty when detached).
    Current {
        #[command(flatten)]
        repo: RepoArg,
    },

    /// Creates a branch at HEAD.
    Create {
        /// Branch name.
        name: String,

        #[command(flatten)]
        repo: RepoArg,
    },

    /// Deletes a merged branch.
    Delete {
        /// Branch name.
        name: String,

        #[command(flatten)]
        repo: RepoArg,
    },

    /// Renames a branch.
    Rename {
        /// Current name.
        old: String,

        /// New name.
        new: String,

        #[command(flatten)]
        repo: RepoArg,
    },

    /// Switches to a branch.
    Checkout {
        /// Branch name.
        name: String,

        #[command(flatten)]
        repo: RepoArg,
    },
}

/// Arguments for `merge`.
#[derive(Debug, Clone, Args)]
pub struct MergeArgs {
    /// Branch to merge into the current branch.
    pub branch: String,

    #[command(flatten)]
    pub repo: RepoArg,
}

/// A single path argument.
#[derive(Debug, Clone, Args)]
pub struct PathArgs {
    /// Path to operate on.
    #[arg(value_name = "PATH")]
    pub path: PathBuf,
}

/// Arguments for `restore`.
#[derive(Debug, Clone, Args)]
pub struct RestoreArgs {
    /// Path to restore.
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Unstages instead of discarding working tree changes.
    #[arg(short = 'S', long)]
    pub staged: bool,
}

/// Arguments for `rm`.
#[derive(Debug, Clone, Args)]
pub struct RemoveArgs {
    /// Path to remove.
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Only removes the path from the index.
    #[arg(long)]
    pub cached: bool,
}

/// Arguments for `mv`.
#[derive(Debug, Clone, Args)]
pub struct MoveArgs {
    /// Path to move.
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Destination, relative to the directory of PATH.
    #[arg(value_name = "TO")]
    pub to: String,
}

/// Arguments for `commit`.
#[derive(Debug, Clone, Args)]
pub struct CommitArgs {
    /// Commit message.
    #[arg(short = 'm', long = "message", value_name = "MESSAGE")]
    pub message: String,

    #[command(flatten)]
    pub repo: RepoArg,
}

/// Arguments for `clone`.
#[derive(Debug, Clone, Args)]
pub struct CloneArgs {
    /// Repository address.
    pub url: String,

    /// Empty or missing destination directory.
    #[arg(value_name = "DEST")]
    pub dest: PathBuf,

    /// Never asks for credentials on the terminal.
    #[arg(long = "no-prompt")]
    pub no_prompt: bool,
}

/// Arguments for `init`.
#[derive(Debug, Clone, Args)]
pub struct InitArgs {
    /// Directory to initialize.
    #[arg(value_name = "DIR", default_value = ".")]
    pub dir: PathBuf,
}

/// Arguments for `log`.
#[derive(Debug, Clone, Args)]
pub struct LogArgs {
    #[command(subcommand)]
    pub subcommand: LogSubcommand,
}

/// Log subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum LogSubcommand {
    /// Draws the commit graph of all refs.
    Graph {
        #[command(flatten)]
        repo: RepoArg,
    },

    /// Lists every commit as `id - [summary]`.
    History {
        #[command(flatten)]
        repo: RepoArg,
    },

    /// Shows author, date and parents of one commit.
    Show {
        /// Commit id or any revision.
        id: String,

        #[command(flatten)]
        repo: RepoArg,
    },
}
