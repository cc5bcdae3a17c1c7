// fmgit: File Manager Git Engine
//
// SPDX-FileCopyrightText: 2026 fmgit contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Workspace git operations engine.
//!
//! ```text
//!   caller (CLI / file browser)
//!        |
//!        v
//!   locator::locate(path)  -- precondition gate, no subprocess
//!        |
//!        v
//!   StatusInspector  BranchService  CommitService
//!   FileService      MergeOrchestrator  CloneService  history
//!        |
//!        v
//!      Git { query, mutation }
//!      /                     \
//!   QueryBackend           ShellBackend
//!   (Gix | Shell)          (GitMutation)
//!        \                     /
//!         v                   v
//!        gix            CommandRunner --> /bin/sh -c "cd .. && git .."
//! ```
//!
//! **`GixBackend`**: pure Rust, in-process reads.
//! **`ShellBackend`**: git CLI, all writes and optionally reads.

pub mod backend;
pub mod branch;
pub mod clone;
pub mod commit;
pub mod files;
pub mod history;
pub mod locator;
pub mod merge;
pub mod runner;
pub mod status;

#[cfg(test)]
mod tests;

use crate::config::types::{BackendKind, GitConfig};

use backend::{GixBackend, QueryBackend, ShellBackend};
use runner::CommandRunner;

/// The engine facade handed to every service call.
#[derive(Debug, Clone)]
pub struct Git {
    query: QueryBackend,
    mutation: ShellBackend,
}

impl Git {
    #[must_use]
    pub const fn new(query: QueryBackend, mutation: ShellBackend) -> Self {
        Self { query, mutation }
    }

    /// Builds the engine from the `[git]` configuration section.
    #[must_use]
    pub fn from_config(config: &GitConfig) -> Self {
        let shell = ShellBackend::new(CommandRunner::new(config.program.clone()));
        let query = match config.backend {
            BackendKind::Gix => QueryBackend::Gix(GixBackend),
            BackendKind::Shell => QueryBackend::Shell(shell.clone()),
        };
        Self::new(query, shell)
    }

    /// Backend answering read-only queries.
    #[must_use]
    pub const fn query(&self) -> &QueryBackend {
        &self.query
    }

    /// Backend performing writes.
    #[must_use]
    pub const fn mutation(&self) -> &ShellBackend {
        &self.mutation
    }

    /// Runner used for raw git invocations.
    #[must_use]
    pub const fn runner(&self) -> &CommandRunner {
        self.mutation.runner()
    }
}

impl Default for Git {
    fn default() -> Self {
        Self::from_config(&GitConfig::default())
    }
}
