// fmgit: File Manager Git Engine
//
// SPDX-FileCopyrightText: 2026 fmgit contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                |                     |
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |          config           |
//!              |   TOML, layered settings  |
//!              '------+-------------+------'
//!                     |             |
//!                     v             v
//!                    git          browse
//!         locator/status/branch   one-level listing
//!         commit/merge/clone      on a worker thread,
//!                     |           new/rename/delete
//!              +------+------+
//!              v             v
//!         gix (reads)   CommandRunner (git CLI)
//!
//!   +-----------------------------------------+
//!   |  core     process builder and runner    |
//!   +-----------------------------------------+
//!   |  foundation      error, logging         |
//!   +-----------------------------------------+
//! ```

pub mod browse;
pub mod cli;
pub mod cmd;
pub mod config;
pub mod core;
pub mod error;
pub mod git;
pub mod logging;
