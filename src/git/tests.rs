// fmgit: File Manager Git Engine
//
// SPDX-FileCopyrightText: 2026 fmgit contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use super::Git;
use super::backend::{GitQuery, GixBackend, QueryBackend, ShellBackend};
use super::branch::{BranchKind, BranchRef, BranchService, short_branch_name};
use super::clone::{
    CloneService, CredentialStore, Credentials, NoPrompt, ensure_empty_destination,
    is_auth_failure, is_http_remote,
};
use super::commit::{CommitService, StagedFileSet};
use super::files::FileService;
use super::history::{CommitDetails, CommitSummary};
use super::locator::{self, RepositoryHandle};
use super::merge::{MergeOrchestrator, MergeState};
use super::runner::{CommandResult, CommandRunner, shell_quote};
use super::status::{PathStatus, StatusInspector};
use crate::error::{FmError, GitError, ProcessError};

fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

/// A directory that looks like a repository to the locator.
fn fake_repo() -> TempDir {
    let temp = temp_dir();
    fs::create_dir(temp.path().join(".git")).expect("failed to create .git");
    temp
}

/// An engine whose git program does not exist: any subprocess attempt
/// surfaces as `ProcessError::ExecutableNotFound`.
fn unlaunchable_git() -> Git {
    let shell = ShellBackend::new(CommandRunner::new("/nonexistent/fmgit-test/git"));
    Git::new(QueryBackend::Shell(shell.clone()), shell)
}

fn git_error(err: &FmError) -> &GitError {
    err.as_git()
        .unwrap_or_else(|| panic!("expected a git error, got {err}"))
}

// --- status classification ---

#[test]
fn test_short_code_classification() {
    let rows: Vec<String> = ["??", "  ", "M ", "A ", "D ", " M", " D", "MM", "AM", "UU", "M"]
        .iter()
        .map(|code| format!("{code:?} -> {}", PathStatus::from_short_code(code)))
        .collect();
    insta::assert_snapshot!(rows.join("\n"), @r#"
    "??" -> untracked
    "  " -> clean
    "M " -> staged
    "A " -> staged
    "D " -> staged
    " M" -> modified
    " D" -> modified
    "MM" -> staged+modified
    "AM" -> staged+modified
    "UU" -> staged+modified
    "M" -> error
    "#);
}

#[test]
fn test_status_output_uses_first_line() {
    let empty: [&str; 0] = [];
    assert_eq!(PathStatus::from_status_output(&empty), PathStatus::Clean);
    assert_eq!(
        PathStatus::from_status_output(&["?? new.txt", " M other.txt"]),
        PathStatus::Untracked
    );
    assert!(PathStatus::Staged.is_tracked());
    assert!(!PathStatus::Untracked.is_tracked());
    assert!(!PathStatus::Error.is_tracked());
}

// --- staged set ---

#[test]
fn test_staged_set_from_porcelain() {
    let lines = [
        "M  src/lib.rs",
        " M README.md",
        "A  new.txt",
        "?? scratch.txt",
        "R  old.rs -> renamed.rs",
        "MM both.rs",
        "",
    ];
    let staged = StagedFileSet::from_porcelain(&lines);
    let paths: Vec<&str> = staged.iter().collect();
    insta::assert_debug_snapshot!(paths, @r#"
    [
        "both.rs",
        "new.txt",
        "old.rs",
        "renamed.rs",
        "src/lib.rs",
    ]
    "#);
    assert!(!staged.contains("README.md"));
}

// --- branches ---

#[test]
fn test_branch_ref_parsing() {
    let local = BranchRef::from_full_name("refs/heads/feature/x").expect("local branch");
    assert_eq!(local.short_name(), "feature/x");
    assert_eq!(local.kind(), &BranchKind::Local);
    assert!(!local.is_remote());

    let remote = BranchRef::from_full_name("refs/remotes/origin/main").expect("remote branch");
    assert_eq!(remote.short_name(), "origin/main");
    assert!(remote.is_remote());

    assert!(BranchRef::from_full_name("refs/remotes/origin/HEAD").is_none());
    assert!(BranchRef::from_full_name("refs/tags/v1.0").is_none());
    assert!(BranchRef::from_full_name("refs/heads/").is_none());
}

#[test]
fn test_short_branch_name() {
    assert_eq!(short_branch_name("refs/heads/main"), "main");
    assert_eq!(short_branch_name("refs/remotes/origin/dev"), "origin/dev");
    assert_eq!(short_branch_name("  main "), "main");
    assert_eq!(short_branch_name(""), "");
}

// --- command runner ---

#[test]
fn test_shell_quote() {
    assert_eq!(shell_quote("status"), "status");
    assert_eq!(shell_quote("--porcelain"), "--porcelain");
    assert_eq!(shell_quote("core.quotepath=false"), "core.quotepath=false");
    assert_eq!(shell_quote(""), "''");
    assert_eq!(shell_quote("my file.txt"), "'my file.txt'");
    assert_eq!(shell_quote("it's"), r"'it'\''s'");
    assert_eq!(shell_quote("$(rm -rf /)"), "'$(rm -rf /)'");
}

#[test]
fn test_command_line() {
    let line = CommandRunner::command_line(
        Path::new("/usr/bin/git"),
        Path::new("/work/my repo"),
        &["commit", "-m", "it's done"],
    );
    insta::assert_snapshot!(line, @r"cd '/work/my repo' && /usr/bin/git commit -m 'it'\''s done'");
}

#[test]
fn test_command_result_message_prefers_stderr() {
    let result = CommandResult::new(
        1,
        vec!["stdout line".to_string()],
        vec!["fatal: bad".to_string(), String::new()],
    );
    assert_eq!(result.message(), "fatal: bad");

    let result = CommandResult::new(1, vec!["only stdout".to_string()], Vec::new());
    assert_eq!(result.message(), "only stdout");

    let err = result
        .into_checked("git merge")
        .expect_err("non-zero exit should fail");
    insta::assert_snapshot!(err.to_string(), @"git error: git command failed: git merge - only stdout");
}

#[test]
fn test_missing_program_is_not_found() {
    let runner = CommandRunner::new("/nonexistent/fmgit-test/git");
    let err = runner.resolve_program().expect_err("program should not resolve");
    assert!(matches!(err, FmError::Process(ref e) if matches!(**e, ProcessError::ExecutableNotFound { .. })));
}

// --- merge state machine ---

#[test]
fn test_merge_transitions() {
    use MergeState::{Aborted, Aborting, ConflictDetected, Idle, Running, Succeeded};

    assert!(Idle.can_transition_to(Running));
    assert!(Running.can_transition_to(Succeeded));
    assert!(Running.can_transition_to(ConflictDetected));
    assert!(ConflictDetected.can_transition_to(Aborting));
    assert!(Aborting.can_transition_to(Aborted));

    assert!(!Idle.can_transition_to(Succeeded));
    assert!(!ConflictDetected.can_transition_to(Succeeded));
    assert!(!Aborted.can_transition_to(Running));
    assert!(!Succeeded.can_transition_to(Running));

    assert!(Succeeded.is_terminal());
    assert!(Aborted.is_terminal());
    assert!(!Aborting.is_terminal());
}

// --- history parsing ---

#[test]
fn test_commit_summary_parse() {
    let summary = CommitSummary::parse("0123456789abcdef\x1fFix the thing - again").expect("summary");
    insta::assert_snapshot!(summary.to_string(), @"0123456789abcdef - [Fix the thing - again]");
    assert!(CommitSummary::parse("no separator").is_none());
}

#[test]
fn test_commit_details_parse() {
    let line = "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa\x1fJane Doe <jane@example.com>\x1f1700000000\x1fbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb cccccccccccccccccccccccccccccccccccccccc\x1fMerge branch 'x'";
    let details = CommitDetails::parse(line).expect("details");
    insta::assert_debug_snapshot!(details, @r#"
    CommitDetails {
        id: "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa",
        author: "Jane Doe <jane@example.com>",
        time: 1700000000,
        parents: [
            "bbbbbbbbbb",
            "cccccccccc",
        ],
        summary: "Merge branch 'x'",
    }
    "#);

    let root = CommitDetails::parse("abc\x1fA <a@b>\x1f1\x1f\x1finitial").expect("root commit");
    assert!(root.parents.is_empty());
    assert!(CommitDetails::parse("abc\x1fA\x1fnot-a-time\x1f\x1fs").is_none());
}

// --- credentials ---

#[test]
fn test_credentials_parse() {
    let creds = Credentials::parse("alice\nsecret-token\n").expect("credentials");
    assert_eq!(creds.user(), "alice");
    assert_eq!(creds.token(), "secret-token");

    assert!(Credentials::parse("alice\n").is_none());
    assert!(Credentials::parse("\nsecret").is_none());
    assert!(Credentials::parse("").is_none());
}

#[test]
fn test_credentials_only_for_http_remotes() {
    assert!(is_http_remote("https://example.com/org/repo.git"));
    assert!(is_http_remote("http://127.0.0.1:8080/repo.git"));
    assert!(!is_http_remote("git@example.com:org/repo.git"));
    assert!(!is_http_remote("ssh://git@example.com/org/repo.git"));
    assert!(!is_http_remote("/srv/git/repo.git"));
}

#[test]
fn test_credential_helper_answers_git() {
    use std::io::Write as _;
    use std::process::{Command, Stdio};

    let creds = Credentials::new("alice", "p@ss word");
    let mut child = Command::new("git")
        .args(["credential", "fill"])
        .envs(creds.helper_env())
        .env("GIT_TERMINAL_PROMPT", "0")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("failed to spawn git");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(b"protocol=https\nhost=example.com\n\n")
        .expect("write request");
    let output = child.wait_with_output().expect("git credential fill");
    assert!(output.status.success());

    let answer = String::from_utf8_lossy(&output.stdout);
    assert!(answer.contains("username=alice\n"), "{answer}");
    assert!(answer.contains("password=p@ss word\n"), "{answer}");
}

#[test]
fn test_credentials_debug_hides_token() {
    let creds = Credentials::new("alice", "secret-token");
    let debug = format!("{creds:?}");
    assert!(debug.contains("alice"));
    assert!(!debug.contains("secret-token"));
}

#[test]
fn test_credential_store_round_trip() {
    let temp = temp_dir();
    let store = CredentialStore::new(temp.path().join("user_information.txt"));
    assert!(store.load().expect("load").is_none());

    store
        .save(&Credentials::new("alice", "token-1"))
        .expect("save");
    store
        .save(&Credentials::new("bob", "token-2"))
        .expect("overwrite");
    let content = fs::read_to_string(store.path()).expect("read file");
    assert_eq!(content, "bob\ntoken-2\n");
    assert_eq!(
        store.load().expect("load"),
        Some(Credentials::new("bob", "token-2"))
    );
}

#[test]
fn test_auth_failure_detection() {
    let auth = CommandResult::new(
        128,
        Vec::new(),
        vec!["fatal: could not read Username for 'https://example.com': terminal prompts disabled".to_string()],
    );
    assert!(is_auth_failure(&auth).expect("pattern"));

    let other = CommandResult::new(
        128,
        Vec::new(),
        vec!["fatal: repository 'https://example.com/x' not found".to_string()],
    );
    assert!(!is_auth_failure(&other).expect("pattern"));

    let ok = CommandResult::new(0, Vec::new(), vec!["Authentication failed".to_string()]);
    assert!(!is_auth_failure(&ok).expect("pattern"));
}

#[test]
fn test_destination_must_be_empty() {
    let temp = temp_dir();
    assert!(ensure_empty_destination(&temp.path().join("missing")).is_ok());
    assert!(ensure_empty_destination(temp.path()).is_ok());

    fs::write(temp.path().join(".hidden"), "").expect("write hidden file");
    let err = ensure_empty_destination(temp.path()).expect_err("hidden entry counts");
    assert!(matches!(git_error(&err), GitError::DestinationNotEmpty { .. }));

    let err = ensure_empty_destination(&temp.path().join(".hidden")).expect_err("file");
    assert!(matches!(git_error(&err), GitError::NotADirectory { .. }));
}

// --- locator ---

#[test]
fn test_locate_walks_up() {
    let temp = fake_repo();
    let nested = temp.path().join("src").join("deep");
    fs::create_dir_all(&nested).expect("create nested");
    let file = nested.join("a.rs");
    fs::write(&file, "").expect("write file");

    let from_root = locator::locate(temp.path()).expect("root");
    let from_dir = locator::locate(&nested).expect("nested dir");
    let from_file = locator::locate(&file).expect("nested file");
    assert_eq!(from_root, from_dir);
    assert_eq!(from_root, from_file);
    assert_eq!(from_root.git_dir(), from_root.work_tree().join(".git"));
    assert_eq!(
        from_root.relative_path(&file),
        Some(Path::new("src").join("deep").join("a.rs"))
    );
}

#[test]
fn test_locate_rejects_missing_and_plain_dirs() {
    let plain = temp_dir();
    let err = locator::locate(plain.path()).expect_err("no repository");
    assert!(matches!(git_error(&err), GitError::NotARepository { .. }));
    assert!(err.is_precondition());

    let repo = fake_repo();
    let err = locator::locate(&repo.path().join("missing.txt")).expect_err("missing path");
    assert!(matches!(git_error(&err), GitError::NotARepository { .. }));

    let nearest = locator::locate_nearest(&repo.path().join("new").join("file.txt"))
        .expect("nearest existing ancestor");
    assert_eq!(nearest.work_tree(), locator::locate(repo.path()).expect("root").work_tree());
}

#[test]
fn test_metadata_paths() {
    let temp = fake_repo();
    let handle: RepositoryHandle = locator::locate(temp.path()).expect("repo");
    assert!(handle.is_metadata_path(&temp.path().join(".git")));
    assert!(handle.is_metadata_path(&temp.path().join(".git").join("refs")));
    assert!(!handle.is_metadata_path(&temp.path().join(".gitignore")));
    assert!(!handle.is_metadata_path(temp.path()));
}

// --- preconditions never launch git ---

#[tokio::test]
async fn test_status_without_repository() {
    let git = unlaunchable_git();
    let plain = temp_dir();
    assert_eq!(
        StatusInspector::status_of(&git, plain.path()).await,
        PathStatus::NotARepository
    );

    let repo = fake_repo();
    assert_eq!(
        StatusInspector::status_of(&git, &repo.path().join(".git")).await,
        PathStatus::IsMetadataDirectory
    );
    // reaches the backend, which cannot launch git
    assert_eq!(
        StatusInspector::status_of(&git, repo.path()).await,
        PathStatus::Error
    );
}

#[tokio::test]
async fn test_commit_preconditions() {
    let git = unlaunchable_git();
    let repo = fake_repo();

    for message in ["", "   ", "\n\t"] {
        let err = CommitService::commit(&git, repo.path(), message)
            .await
            .expect_err("blank message");
        assert!(matches!(git_error(&err), GitError::EmptyCommitMessage));
    }

    let plain = temp_dir();
    let err = CommitService::commit(&git, plain.path(), "msg")
        .await
        .expect_err("not a repository");
    assert!(matches!(git_error(&err), GitError::NotARepository { .. }));

    // staged-set query fails to launch
    let err = CommitService::commit(&git, repo.path(), "msg")
        .await
        .expect_err("query failure");
    assert!(matches!(git_error(&err), GitError::CommitFailed));
}

#[tokio::test]
async fn test_merge_preconditions() {
    let git = unlaunchable_git();
    let repo = fake_repo();

    let err = MergeOrchestrator::merge(&git, repo.path(), "  ")
        .await
        .expect_err("blank branch");
    assert!(matches!(git_error(&err), GitError::NoBranchSelected));

    // the branch lookup fails, so the merge is attempted and cannot launch
    let err = MergeOrchestrator::merge(&git, repo.path(), "feature")
        .await
        .expect_err("unlaunchable merge");
    assert!(matches!(git_error(&err), GitError::MergeProcess));
}

#[tokio::test]
async fn test_merge_rejected_while_another_is_pending() {
    let git = unlaunchable_git();
    let repo = fake_repo();
    let marker = repo.path().join(".git").join("MERGE_HEAD");
    fs::write(&marker, "0123456789abcdef0123456789abcdef01234567\n").expect("write marker");

    let err = MergeOrchestrator::merge(&git, repo.path(), "feature")
        .await
        .expect_err("pending merge");
    assert!(matches!(git_error(&err), GitError::MergeInProgress { .. }));
    assert!(err.is_precondition());
    assert!(marker.exists());
}

#[tokio::test]
async fn test_same_branch_merge_is_rejected() {
    let temp = temp_dir();
    gix::init(temp.path()).expect("failed to init repo");
    let shell = ShellBackend::new(CommandRunner::new("/nonexistent/fmgit-test/git"));
    let git = Git::new(QueryBackend::Gix(GixBackend), shell);

    let handle = locator::locate(temp.path()).expect("repo");
    let current = git
        .query()
        .current_branch(&handle)
        .await
        .expect("read HEAD")
        .expect("HEAD names a branch");

    for name in [current.clone(), format!("refs/heads/{current}")] {
        let err = MergeOrchestrator::merge(&git, temp.path(), &name)
            .await
            .expect_err("same branch");
        assert!(matches!(git_error(&err), GitError::SameBranch { .. }));
    }
}

#[tokio::test]
async fn test_branch_preconditions() {
    let git = unlaunchable_git();
    let repo = fake_repo();

    let err = BranchService::create(&git, repo.path(), " ")
        .await
        .expect_err("blank");
    assert!(matches!(git_error(&err), GitError::BlankInput { .. }));

    let err = BranchService::delete(&git, repo.path(), "")
        .await
        .expect_err("blank");
    assert!(matches!(git_error(&err), GitError::NoBranchSelected));

    let err = BranchService::rename(&git, repo.path(), "main", "")
        .await
        .expect_err("blank");
    insta::assert_snapshot!(err.to_string(), @"git error: new branch name can't be empty");

    let plain = temp_dir();
    assert_eq!(BranchService::current_branch(&git, plain.path()).await, "");
}

#[tokio::test]
async fn test_clone_preconditions() {
    let git = unlaunchable_git();
    let temp = temp_dir();
    let store = CredentialStore::new(temp.path().join("creds.txt"));

    let err = CloneService::clone(&git, "  ", &temp.path().join("dest"), &store, &NoPrompt)
        .await
        .expect_err("blank url");
    assert!(matches!(git_error(&err), GitError::EmptyRepositoryAddress));

    let dest = temp.path().join("dest");
    fs::create_dir(&dest).expect("create dest");
    fs::write(dest.join(".keep"), "").expect("write .keep");
    let err = CloneService::clone(&git, "https://example.com/r.git", &dest, &store, &NoPrompt)
        .await
        .expect_err("non-empty destination");
    assert!(matches!(git_error(&err), GitError::DestinationNotEmpty { .. }));
    assert!(!store.path().exists());
}

#[tokio::test]
async fn test_init_preconditions() {
    let git = unlaunchable_git();
    let temp = temp_dir();

    let err = FileService::init(&git, &temp.path().join("missing"))
        .await
        .expect_err("missing");
    assert!(matches!(git_error(&err), GitError::PathNotFound { .. }));

    let file = temp.path().join("file.txt");
    fs::write(&file, "").expect("write file");
    let err = FileService::init(&git, &file).await.expect_err("file");
    assert!(matches!(git_error(&err), GitError::NotADirectory { .. }));

    let repo = fake_repo();
    let sub = repo.path().join("sub");
    fs::create_dir(&sub).expect("create sub");
    let err = FileService::init(&git, &sub).await.expect_err("inside repo");
    assert!(matches!(git_error(&err), GitError::AlreadyRepository { .. }));
}

#[tokio::test]
async fn test_move_requires_destination() {
    let git = unlaunchable_git();
    let repo = fake_repo();
    let file = repo.path().join("a.txt");
    fs::write(&file, "").expect("write file");

    let err = FileService::move_path(&git, &file, "   ")
        .await
        .expect_err("blank destination");
    assert!(matches!(git_error(&err), GitError::BlankInput { .. }));
}
