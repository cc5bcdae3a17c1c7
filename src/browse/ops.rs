// fmgit: File Manager Git Engine
//
// SPDX-FileCopyrightText: 2026 fmgit contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Plain file operations on browser entries.
//!
//! ```text
//! create_entry(location, name, kind)   location's dir (or its parent) / name
//! rename_entry(path, new_name)         sibling of path
//! delete_entry(path)                   file, symlink or whole directory
//! ```
//!
//! Names are single path components. Nothing here touches git; a renamed or
//! deleted tracked file simply shows up as changed.

use std::path::{Component, Path, PathBuf};

use serde::Serialize;
use tokio::fs;
use tracing::info;

use crate::error::{FmResult, FsError};

/// What [`create_entry`] makes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Directory,
}

/// Trims `name` and checks that it names exactly one entry.
fn entry_name(name: &str) -> FmResult<&str> {
    let name = name.trim();
    let mut components = Path::new(name).components();
    let single = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    );
    if !single || name.contains(['/', '\\']) {
        return Err(FsError::InvalidName {
            name: name.to_string(),
        }
        .into());
    }
    Ok(name)
}

fn not_found(path: &Path) -> FsError {
    FsError::NotFound {
        path: path.display().to_string(),
    }
}

fn already_exists(path: &Path) -> FsError {
    FsError::AlreadyExists {
        path: path.display().to_string(),
    }
}

/// Metadata without following a final symlink; `None` if nothing is there.
async fn lookup(path: &Path) -> FmResult<Option<std::fs::Metadata>> {
    match fs::symlink_metadata(path).await {
        Ok(meta) => Ok(Some(meta)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Creates `name` next to `location`: inside it when it is a directory,
/// beside it otherwise. Returns the created path.
///
/// # Errors
///
/// - `FsError::InvalidName` if `name` is not a single component.
/// - `FsError::NotFound` if `location` does not exist.
/// - `FsError::AlreadyExists` if the target exists.
/// - `FmError::Io` if creation fails.
pub async fn create_entry(location: &Path, name: &str, kind: EntryKind) -> FmResult<PathBuf> {
    let name = entry_name(name)?;
    let meta = lookup(location).await?.ok_or_else(|| not_found(location))?;
    let parent = if meta.is_dir() {
        location
    } else {
        location.parent().unwrap_or_else(|| Path::new("."))
    };
    let target = parent.join(name);

    let created = match kind {
        EntryKind::File => fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&target)
            .await
            .map(drop),
        EntryKind::Directory => fs::create_dir(&target).await,
    };
    match created {
        Ok(()) => {
            info!(path = %target.display(), ?kind, "created");
            Ok(target)
        }
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
            Err(already_exists(&target).into())
        }
        Err(e) => Err(e.into()),
    }
}

/// Renames `path` to `new_name` within its directory. Returns the new path.
///
/// # Errors
///
/// - `FsError::InvalidName` if `new_name` is not a single component.
/// - `FsError::NotFound` if `path` does not exist.
/// - `FsError::AlreadyExists` if another entry already has `new_name`.
/// - `FmError::Io` if the rename fails.
pub async fn rename_entry(path: &Path, new_name: &str) -> FmResult<PathBuf> {
    let new_name = entry_name(new_name)?;
    lookup(path).await?.ok_or_else(|| not_found(path))?;
    let target = path
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(new_name);
    if target == path {
        return Ok(target);
    }
    if lookup(&target).await?.is_some() {
        return Err(already_exists(&target).into());
    }

    fs::rename(path, &target).await?;
    info!(from = %path.display(), to = %target.display(), "renamed");
    Ok(target)
}

/// Deletes `path`; directories are removed with their contents. A symlink is
/// removed itself, never its target.
///
/// # Errors
///
/// Returns `FsError::NotFound` if `path` does not exist and `FmError::Io`
/// if removal fails.
pub async fn delete_entry(path: &Path) -> FmResult<()> {
    let meta = lookup(path).await?.ok_or_else(|| not_found(path))?;
    if meta.is_dir() {
        fs::remove_dir_all(path).await?;
    } else {
        fs::remove_file(path).await?;
    }
    info!(path = %path.display(), "deleted");
    Ok(())
}
