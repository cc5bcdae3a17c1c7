// fmgit: File Manager Git Engine
//
// SPDX-FileCopyrightText: 2026 fmgit contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! One-level directory listing on a background worker.
//!
//! ```text
//!  caller                      worker thread
//!  list_directory(dir) ----->  WalkBuilder(max_depth 1)
//!       |                         |  BrowseEntry
//!       |   <---- flume::bounded -+
//!  Listing::recv / entries
//!       |
//!  StatusInspector::status_of (foreground, one row at a time)
//! ```
//!
//! The worker only touches the filesystem. Git status is attached by the
//! consumer so that every row reflects the repository as it is when shown.
//! [`ops`] creates, renames and deletes entries.

pub mod ops;

use std::path::{Path, PathBuf};
use std::thread::JoinHandle;
use std::time::UNIX_EPOCH;

use anyhow::Context as _;
use bon::Builder;
use flume::{Receiver, bounded};
use ignore::WalkBuilder;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::Result;

/// Entries buffered between the worker and the consumer.
const CHANNEL_CAPACITY: usize = 256;

/// Options for a directory listing.
#[derive(Debug, Clone, Builder)]
pub struct BrowseOptions {
    /// Include dot files, `.git` among them
    #[builder(setters(name = with_include_hidden), default = true)]
    include_hidden: bool,
    /// Hide entries matched by .gitignore files
    #[builder(setters(name = with_respect_gitignore), default = false)]
    respect_gitignore: bool,
    /// Follow symbolic links
    #[builder(setters(name = with_follow_links), default = false)]
    follow_links: bool,
}

impl Default for BrowseOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl BrowseOptions {
    #[must_use]
    pub const fn include_hidden(&self) -> bool {
        self.include_hidden
    }

    #[must_use]
    pub const fn respect_gitignore(&self) -> bool {
        self.respect_gitignore
    }

    #[must_use]
    pub const fn follow_links(&self) -> bool {
        self.follow_links
    }
}

/// One row of a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrowseEntry {
    pub name: String,
    pub path: PathBuf,
    pub is_dir: bool,
    /// Size in bytes (0 for directories).
    pub size: u64,
    /// Modification time in seconds since the epoch, if available.
    pub modified: Option<u64>,
}

impl BrowseEntry {
    fn from_dir_entry(entry: &ignore::DirEntry) -> Self {
        let metadata = entry.metadata().ok();
        let is_dir = entry.file_type().is_some_and(|ft| ft.is_dir());
        let size = if is_dir {
            0
        } else {
            metadata.as_ref().map_or(0, std::fs::Metadata::len)
        };
        let modified = metadata
            .and_then(|m| m.modified().ok())
            .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
            .map(|d| d.as_secs());
        Self {
            name: entry.file_name().to_string_lossy().into_owned(),
            path: entry.path().to_path_buf(),
            is_dir,
            size,
            modified,
        }
    }
}

/// A listing in progress.
#[derive(Debug)]
pub struct Listing {
    rx: Receiver<BrowseEntry>,
    worker: JoinHandle<usize>,
}

impl Listing {
    /// Next entry, blocking until the worker produces one.
    ///
    /// Returns `None` once the worker is done.
    #[must_use]
    pub fn recv(&self) -> Option<BrowseEntry> {
        self.rx.recv().ok()
    }

    /// Channel end for async consumers (`recv_async`).
    #[must_use]
    pub const fn receiver(&self) -> &Receiver<BrowseEntry> {
        &self.rx
    }

    /// Drains the listing: directories first, then files, each by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the worker thread panicked.
    pub fn entries(self) -> Result<Vec<BrowseEntry>> {
        let mut entries: Vec<BrowseEntry> = self.rx.iter().collect();
        let errors = self
            .worker
            .join()
            .map_err(|_| anyhow::anyhow!("directory listing worker panicked"))?;
        if errors > 0 {
            debug!(errors, "listing finished with unreadable entries");
        }
        entries.sort_by(|a, b| b.is_dir.cmp(&a.is_dir).then_with(|| a.name.cmp(&b.name)));
        Ok(entries)
    }
}

fn build_walker(dir: &Path, options: &BrowseOptions) -> WalkBuilder {
    let mut builder = WalkBuilder::new(dir);
    builder.max_depth(Some(1));
    builder.follow_links(options.follow_links());
    builder.hidden(!options.include_hidden());

    builder.git_ignore(options.respect_gitignore());
    builder.git_global(options.respect_gitignore());
    builder.git_exclude(options.respect_gitignore());
    builder.ignore(options.respect_gitignore());
    builder.parents(options.respect_gitignore());

    builder
}

/// Starts listing the direct children of `dir` on a worker thread.
///
/// # Errors
///
/// Returns an error if `dir` is not an existing directory or the worker
/// cannot be spawned.
pub fn list_directory(dir: &Path, options: &BrowseOptions) -> Result<Listing> {
    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let (tx, rx) = bounded::<BrowseEntry>(CHANNEL_CAPACITY);
    let dir = dir.to_path_buf();
    let options = options.clone();
    let worker = std::thread::Builder::new()
        .name("fmgit-browse".to_string())
        .spawn(move || {
            let mut errors = 0;
            for result in build_walker(&dir, &options).build() {
                match result {
                    Ok(entry) if entry.depth() == 0 => {}
                    Ok(entry) => {
                        // receiver dropped
                        if tx.send(BrowseEntry::from_dir_entry(&entry)).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        warn!(error = %e, "browse error");
                        errors += 1;
                    }
                }
            }
            errors
        })
        .context("failed to spawn directory listing worker")?;

    Ok(Listing { rx, worker })
}
