// fmgit: File Manager Git Engine
//
// SPDX-FileCopyrightText: 2026 fmgit contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Plain file command arguments.

use clap::Args;
use std::path::PathBuf;

/// Arguments for `new`.
#[derive(Debug, Clone, Args)]
pub struct NewArgs {
    /// Directory to create in; a file means its parent directory.
    #[arg(value_name = "LOCATION")]
    pub location: PathBuf,

    /// Name of the new entry.
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Creates a directory instead of an empty file.
    #[arg(short = 'd', long = "dir")]
    pub directory: bool,
}

/// Arguments for `rename`.
#[derive(Debug, Clone, Args)]
pub struct RenameArgs {
    /// Entry to rename.
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// New name within the same directory.
    #[arg(value_name = "NAME")]
    pub name: String,
}

/// Arguments for `delete`.
#[derive(Debug, Clone, Args)]
pub struct DeleteArgs {
    /// File or directory to delete, with all its contents.
    #[arg(value_name = "PATH")]
    pub path: PathBuf,
}
