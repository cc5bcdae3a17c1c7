// fmgit: File Manager Git Engine
//
// SPDX-FileCopyrightText: 2026 fmgit contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for fmgit.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. fmgit.toml (cwd, optional)
//! 3. --config
//! 4. FMGIT_* env vars
//! 5. CLI overrides
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! FMGIT_GIT__BACKEND=shell              → git.backend = "shell"
//! FMGIT_GLOBAL__OUTPUT_LOG_LEVEL=4      → global.output_log_level = 4
//! FMGIT_GIT__CREDENTIALS_FILE=/x/creds  → git.credentials_file = "/x/creds"
//! ```

pub mod loader;
pub mod types;


use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{ConfigError, Result};

use loader::ConfigLoader;
use types::{GitConfig, GlobalConfig};

/// Name of the configuration file picked up from the working directory.
pub const LOCAL_CONFIG_FILE: &str = "fmgit.toml";

/// Prefix for configuration environment variables.
pub const ENV_PREFIX: &str = "FMGIT";

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Global options.
    pub global: GlobalConfig,
    /// Git execution options.
    pub git: GitConfig,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use fmgit::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("fmgit.toml")
    ///     .with_env_prefix("FMGIT")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file (simple API).
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// does not match the `Config` structure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Validate values serde cannot check on its own.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for an empty git program or an
    /// empty credentials file path.
    pub fn validate(&self) -> Result<()> {
        if self.git.program.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                section: "git".to_string(),
                key: "program".to_string(),
                message: "git program cannot be empty".to_string(),
            }
            .into());
        }
        if self.git.credentials_file.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                section: "git".to_string(),
                key: "credentials_file".to_string(),
                message: "credentials file path cannot be empty".to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Format configuration options for display.
    ///
    /// Output is deterministically ordered using `BTreeMap`.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        self.format_global_options(&mut options);
        self.format_git_options(&mut options);

        let max_key_len = options.keys().map(String::len).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }

    fn format_global_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert(
            "global.output_log_level".into(),
            self.global.output_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.file_log_level".into(),
            self.global.file_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.log_file".into(),
            self.global.log_file.display().to_string(),
        );
        options.insert("global.log_json".into(), self.global.log_json.to_string());
    }

    fn format_git_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("git.backend".into(), self.git.backend.to_string());
        options.insert("git.program".into(), self.git.program.clone());
        options.insert(
            "git.credentials_file".into(),
            self.git.credentials_file.display().to_string(),
        );
        options.insert(
            "git.prompt_credentials".into(),
            self.git.prompt_credentials.to_string(),
        );
    }
}
