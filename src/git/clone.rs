// fmgit: File Manager Git Engine
//
// SPDX-FileCopyrightText: 2026 fmgit contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Cloning with one credentialed retry.
//!
//! ```text
//! clone(url, dest)
//!   url blank             --> EmptyRepositoryAddress
//!   dest has any entry    --> DestinationNotEmpty   (remote never contacted)
//!   attempt 1: anonymous
//!     ok                  --> done
//!     auth failure?  no   --> CloneFailed
//!                    yes  --> credentials file, else prompt + persist
//!   attempt 2: same url, one-shot credential helper
//!     ok                  --> done
//!     any failure         --> CloneFailed (terminal)
//! ```
//!
//! The helper reads the credentials from the child's environment. They never
//! appear on the command line or in the clone's `.git/config`.

use std::io::Write as _;
use std::path::{Path, PathBuf};

use regex::Regex;
use serde::Serialize;
use tracing::{info, warn};

use super::Git;
use super::backend::GitMutation;
use super::runner::CommandResult;
use crate::error::{FmError, FmResult, GitError};

/// Credential helper answering `get` from the environment.
const CREDENTIAL_HELPER: &str = r#"!f() { test "$1" = get && printf 'username=%s\npassword=%s\n' "$FMGIT_CLONE_USER" "$FMGIT_CLONE_TOKEN"; }; f"#;

/// Stderr patterns git prints when a remote demands credentials.
const AUTH_FAILURE_PATTERN: &str = r"(?i)authentication failed|could not read (username|password)|terminal prompts disabled|invalid username or password|access denied|returned error: 40[13]";

/// Basic credentials for an HTTP(S) remote.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    user: String,
    token: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("token", &"[hidden]")
            .finish()
    }
}

impl Credentials {
    pub fn new(user: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            token: token.into(),
        }
    }

    #[must_use]
    pub fn user(&self) -> &str {
        &self.user
    }

    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Parses the two-line file format: identifier, then token.
    #[must_use]
    pub fn parse(content: &str) -> Option<Self> {
        let mut lines = content.lines().map(str::trim);
        let user = lines.next().filter(|l| !l.is_empty())?;
        let token = lines.next().filter(|l| !l.is_empty())?;
        Some(Self::new(user, token))
    }

    /// Environment for one git invocation that answers with these
    /// credentials.
    ///
    /// Helpers from the user's git config are cleared first.
    #[must_use]
    pub fn helper_env(&self) -> [(&'static str, &str); 7] {
        [
            ("GIT_CONFIG_COUNT", "2"),
            ("GIT_CONFIG_KEY_0", "credential.helper"),
            ("GIT_CONFIG_VALUE_0", ""),
            ("GIT_CONFIG_KEY_1", "credential.helper"),
            ("GIT_CONFIG_VALUE_1", CREDENTIAL_HELPER),
            ("FMGIT_CLONE_USER", &self.user),
            ("FMGIT_CLONE_TOKEN", &self.token),
        ]
    }
}

/// True for remotes that accept basic credentials.
#[must_use]
pub fn is_http_remote(url: &str) -> bool {
    url::Url::parse(url).is_ok_and(|parsed| matches!(parsed.scheme(), "http" | "https"))
}

/// Two-line credentials file, overwritten on every save.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored credentials, or `None` if the file is missing or malformed.
    ///
    /// # Errors
    ///
    /// Returns an I/O error for failures other than a missing file.
    pub fn load(&self) -> FmResult<Option<Credentials>> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => Ok(Credentials::parse(&content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Writes `credentials`, replacing any previous content.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be written.
    pub fn save(&self, credentials: &Credentials) -> FmResult<()> {
        let mut options = std::fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt as _;
            options.mode(0o600);
        }
        let mut file = options.open(&self.path)?;
        writeln!(file, "{}", credentials.user())?;
        writeln!(file, "{}", credentials.token())?;
        Ok(())
    }
}

/// Source of credentials when none are stored.
pub trait CredentialPrompt {
    /// Asks for credentials for `url`. `Ok(None)` means the user declined.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if reading input fails.
    fn prompt(&self, url: &str) -> FmResult<Option<Credentials>>;
}

/// Reads the identifier from stdin and the token without echo.
pub struct TerminalPrompt;

impl CredentialPrompt for TerminalPrompt {
    fn prompt(&self, url: &str) -> FmResult<Option<Credentials>> {
        eprint!("Username for {url}: ");
        std::io::stderr().flush()?;
        let mut user = String::new();
        std::io::stdin().read_line(&mut user)?;

        eprint!("Token: ");
        std::io::stderr().flush()?;
        let token = rpassword::read_password()?;

        let user = user.trim();
        let token = token.trim();
        if user.is_empty() || token.is_empty() {
            return Ok(None);
        }
        Ok(Some(Credentials::new(user, token)))
    }
}

/// Never supplies credentials.
pub struct NoPrompt;

impl CredentialPrompt for NoPrompt {
    fn prompt(&self, _url: &str) -> FmResult<Option<Credentials>> {
        Ok(None)
    }
}

/// What a successful clone did.
#[derive(Debug, Clone, Serialize)]
pub struct CloneReport {
    pub destination: PathBuf,
    /// True if the second, credentialed attempt was needed.
    pub authenticated: bool,
}

/// Checks that `dest` is absent or an empty directory.
///
/// # Errors
///
/// Returns `GitError::NotADirectory` for a non-directory and
/// `GitError::DestinationNotEmpty` if any entry (hidden included) exists.
pub fn ensure_empty_destination(dest: &Path) -> FmResult<()> {
    if !dest.exists() {
        return Ok(());
    }
    if !dest.is_dir() {
        return Err(GitError::NotADirectory {
            path: dest.display().to_string(),
        }
        .into());
    }
    if std::fs::read_dir(dest)?.next().is_some() {
        return Err(GitError::DestinationNotEmpty {
            path: dest.display().to_string(),
        }
        .into());
    }
    Ok(())
}

/// True if `result` failed because the remote wanted credentials.
///
/// # Errors
///
/// Returns `FmError::Other` if the pattern does not compile.
pub fn is_auth_failure(result: &CommandResult) -> FmResult<bool> {
    if result.success() {
        return Ok(false);
    }
    let regex = Regex::new(AUTH_FAILURE_PATTERN)
        .map_err(|e| FmError::Other(format!("invalid auth pattern: {e}").into()))?;
    Ok(result.stderr().iter().any(|line| regex.is_match(line)))
}

/// Clones remote repositories.
pub struct CloneService;

impl CloneService {
    /// Clones `url` into `dest`.
    ///
    /// # Errors
    ///
    /// - `GitError::EmptyRepositoryAddress` if `url` is blank.
    /// - `GitError::NotADirectory` / `GitError::DestinationNotEmpty` for a
    ///   bad destination.
    /// - `GitError::CloneFailed` if both attempts fail or the first fails
    ///   for a reason other than authentication.
    pub async fn clone(
        git: &Git,
        url: &str,
        dest: &Path,
        store: &CredentialStore,
        prompt: &dyn CredentialPrompt,
    ) -> FmResult<CloneReport> {
        let url = url.trim();
        if url.is_empty() {
            return Err(GitError::EmptyRepositoryAddress.into());
        }
        ensure_empty_destination(dest)?;

        let first = git.mutation().clone_repo(url, dest, None).await?;
        if first.success() {
            info!(url, dest = %dest.display(), "cloned");
            return Ok(CloneReport {
                destination: dest.to_path_buf(),
                authenticated: false,
            });
        }
        if !is_auth_failure(&first)? {
            return Err(clone_failed(url, &first, None));
        }

        warn!(url, "remote requires credentials");
        if !is_http_remote(url) {
            return Err(GitError::CloneFailed {
                url: url.to_string(),
                message: "credentials can only be used with http(s) remotes".to_string(),
            }
            .into());
        }
        let credentials = match store.load()? {
            Some(credentials) => credentials,
            None => {
                let Some(credentials) = prompt.prompt(url)? else {
                    return Err(clone_failed(url, &first, None));
                };
                store.save(&credentials)?;
                info!(file = %store.path().display(), "credentials saved");
                credentials
            }
        };
        let second = git
            .mutation()
            .clone_repo(url, dest, Some(&credentials))
            .await?;
        if !second.success() {
            return Err(clone_failed(url, &second, Some(&credentials)));
        }
        info!(url, dest = %dest.display(), "cloned with credentials");
        Ok(CloneReport {
            destination: dest.to_path_buf(),
            authenticated: true,
        })
    }
}

fn clone_failed(url: &str, result: &CommandResult, credentials: Option<&Credentials>) -> FmError {
    let mut message = result.message();
    if let Some(credentials) = credentials {
        message = message.replace(credentials.token(), "***");
    }
    GitError::CloneFailed {
        url: url.to_string(),
        message,
    }
    .into()
}
