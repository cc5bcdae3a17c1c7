// fmgit: File Manager Git Engine
//
// SPDX-FileCopyrightText: 2026 fmgit contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Core process management.
//!
//! ```text
//!   core
//!    |
//!    v
//! process
//!    |
//! Builder --> Output
//! ```

pub mod process;
