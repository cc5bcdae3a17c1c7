// fmgit: File Manager Git Engine
//
// SPDX-FileCopyrightText: 2026 fmgit contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for fmgit using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! fmgit [global options] <command>
//! locate <path>
//! status <path>...
//! ls [dir]
//! new <location> <name> [--dir] | rename <path> <name> | delete <path>
//! branch {list|current|create|delete|rename|checkout}
//! merge <branch>
//! add | restore [--staged] | rm [--cached] | mv <path> <to>
//! commit -m <message>
//! clone <url> <dest>
//! init [dir]
//! log {graph|history|show <id>}
//! options | configs | version
//! ```

pub mod files;
pub mod git;
pub mod global;

#[cfg(test)]
mod tests;

use crate::cli::files::{DeleteArgs, NewArgs, RenameArgs};
use crate::cli::git::{
    BranchArgs, CloneArgs, CommitArgs, InitArgs, LocateArgs, LogArgs, LsArgs, MergeArgs,
    MoveArgs, PathArgs, RemoveArgs, RestoreArgs, StatusArgs,
};
use crate::cli::global::GlobalOptions;
use clap::{Parser, Subcommand};

/// File Manager Git Engine
///
/// Git status and operations for the paths of a file browser.
#[derive(Debug, Parser)]
#[command(
    name = "fmgit",
    author,
    version,
    about = "File Manager Git Engine",
    long_about = "fmgit Copyright (C) 2026 fmgit contributors\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Resolves the repository owning any path, reports per-path\n\
                  status and runs branch, commit, merge and clone operations.\n\
                  See `fmgit <command> --help` for more information about a command.",
    after_help = "CONFIG FILES:\n\n\
                  fmgit reads `fmgit.toml` from the current directory if it exists,\n\
                  then every file given with --config, in order. Environment\n\
                  variables such as FMGIT_GIT__BACKEND=shell override files, and\n\
                  command-line options override everything."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    #[command(visible_alias = "-v")]
    Version,

    /// Lists all options and their values.
    Options,

    /// Lists the configuration files in use.
    Configs,

    /// Prints the repository that owns a path.
    Locate(LocateArgs),

    /// Shows the git status of paths.
    Status(StatusArgs),

    /// Lists a directory with a git status column.
    Ls(LsArgs),

    /// Creates an empty file or a directory.
    New(NewArgs),

    /// Renames a file or directory in place.
    Rename(RenameArgs),

    /// Deletes a file or directory.
    Delete(DeleteArgs),

    /// Manages branches.
    Branch(BranchArgs),

    /// Merges a branch into the current branch.
    Merge(MergeArgs),

    /// Stages a path.
    Add(PathArgs),

    /// Discards working tree changes, or unstages with --staged.
    Restore(RestoreArgs),

    /// Removes a path from git.
    Rm(RemoveArgs),

    /// Moves or renames a tracked path.
    Mv(MoveArgs),

    /// Commits the staged changes.
    Commit(CommitArgs),

    /// Clones a repository into an empty directory.
    Clone(CloneArgs),

    /// Creates a new repository.
    Init(InitArgs),

    /// Shows commit history.
    Log(LogArgs),
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}
