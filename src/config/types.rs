// fmgit: File Manager Git Engine
//
// SPDX-FileCopyrightText: 2026 fmgit contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration types for fmgit.
//!
//! ```text
//! Config: GlobalConfig, GitConfig
//! BackendKind: shell | gix (default)
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::ConfigError;
use crate::logging::LogLevel;

/// Which implementation answers read-only repository queries.
///
/// Mutations always go through the git CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Spawn the git CLI for queries too.
    Shell,
    /// Read the repository in-process with gix.
    #[default]
    Gix,
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Shell => write!(f, "shell"),
            Self::Gix => write!(f, "gix"),
        }
    }
}

impl std::str::FromStr for BackendKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "shell" => Ok(Self::Shell),
            "gix" => Ok(Self::Gix),
            _ => Err(ConfigError::InvalidValue {
                section: "git".to_string(),
                key: "backend".to_string(),
                message: format!("expected 'shell' or 'gix', got '{s}'"),
            }),
        }
    }
}

/// Global configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Log level for console output (0-6).
    pub output_log_level: LogLevel,
    /// Log level for file output (0-6).
    pub file_log_level: LogLevel,
    /// Path to log file. Empty disables file logging.
    pub log_file: PathBuf,
    /// Write the log file as JSON lines.
    pub log_json: bool,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            output_log_level: LogLevel::WARN,
            file_log_level: LogLevel::TRACE,
            log_file: PathBuf::new(),
            log_json: false,
        }
    }
}

/// Git execution settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GitConfig {
    /// Query backend.
    pub backend: BackendKind,
    /// Git executable, looked up in PATH when not absolute.
    pub program: String,
    /// File holding clone credentials (user id line, token line).
    ///
    /// Relative paths resolve against the working directory.
    pub credentials_file: PathBuf,
    /// Prompt on the terminal when a clone needs credentials and none are
    /// stored.
    pub prompt_credentials: bool,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::default(),
            program: "git".to_string(),
            credentials_file: PathBuf::from("user_information.txt"),
            prompt_credentials: true,
        }
    }
}
