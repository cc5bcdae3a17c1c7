// fmgit: File Manager Git Engine
//
// SPDX-FileCopyrightText: 2026 fmgit contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! `ls` (directory listing with a status column) and the plain file
//! commands `new`, `rename`, `delete`.

use serde::Serialize;

use crate::browse::ops::{EntryKind, create_entry, delete_entry, rename_entry};
use crate::browse::{BrowseEntry, BrowseOptions, list_directory};
use crate::cli::files::{DeleteArgs, NewArgs, RenameArgs};
use crate::cli::git::LsArgs;
use crate::error::Result;
use crate::git::Git;
use crate::git::status::{PathStatus, StatusInspector};

/// A listed entry with its git status.
#[derive(Debug, Serialize)]
pub struct StatusRow {
    #[serde(flatten)]
    pub entry: BrowseEntry,
    pub status: PathStatus,
}

/// Lists `args.dir`, attaching the status of each entry as it is shown.
///
/// # Errors
///
/// Returns an error if the directory cannot be listed.
pub async fn run_ls_command(args: &LsArgs, git: &Git, json: bool) -> Result<()> {
    let options = BrowseOptions::builder()
        .with_include_hidden(!args.no_hidden)
        .with_respect_gitignore(args.respect_gitignore)
        .build();
    let entries = list_directory(&args.dir, &options)?.entries()?;

    let mut rows = Vec::with_capacity(entries.len());
    for entry in entries {
        let status = StatusInspector::status_of(git, &entry.path).await;
        rows.push(StatusRow { entry, status });
    }

    if json {
        return super::print_json(&rows);
    }
    for row in &rows {
        let name = if row.entry.is_dir {
            format!("{}/", row.entry.name)
        } else {
            row.entry.name.clone()
        };
        println!("{:<16} {:>10}  {name}", row.status.as_str(), row.entry.size);
    }
    Ok(())
}

/// `new`: prints the created path.
///
/// # Errors
///
/// Returns an error for an invalid or taken name, or if creation fails.
pub async fn run_new_command(args: &NewArgs) -> Result<()> {
    let kind = if args.directory {
        EntryKind::Directory
    } else {
        EntryKind::File
    };
    let created = create_entry(&args.location, &args.name, kind).await?;
    println!("{}", created.display());
    Ok(())
}

/// `rename`: prints the new path.
///
/// # Errors
///
/// Returns an error for a missing source, an invalid or taken name, or if
/// the rename fails.
pub async fn run_rename_command(args: &RenameArgs) -> Result<()> {
    let renamed = rename_entry(&args.path, &args.name).await?;
    println!("{}", renamed.display());
    Ok(())
}

/// `delete`.
///
/// # Errors
///
/// Returns an error if the path does not exist or cannot be removed.
pub async fn run_delete_command(args: &DeleteArgs) -> Result<()> {
    delete_entry(&args.path).await?;
    Ok(())
}
