// fmgit: File Manager Git Engine
//
// SPDX-FileCopyrightText: 2026 fmgit contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use std::fs;
use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

use super::gix_backend::under;
use super::{GitQuery, GixBackend, QueryBackend, ShellBackend};
use crate::git::locator::{self, RepositoryHandle};
use crate::git::status::PathStatus;

fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

/// Runs git with a fixed identity, panicking on failure.
fn git(cwd: &Path, args: &[&str]) {
    let output = Command::new("git")
        .args(args)
        .current_dir(cwd)
        .env("GIT_AUTHOR_NAME", "Test")
        .env("GIT_AUTHOR_EMAIL", "test@example.com")
        .env("GIT_COMMITTER_NAME", "Test")
        .env("GIT_COMMITTER_EMAIL", "test@example.com")
        .output()
        .expect("failed to run git");
    assert!(
        output.status.success(),
        "git {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

/// A repository with one commit and every kind of change:
///
/// ```text
/// clean.txt      committed, untouched
/// modified.txt   committed, changed in worktree
/// staged.txt     committed, change staged
/// both.txt       committed, change staged then changed again
/// added.txt      new, staged
/// removed.txt    committed, deleted from worktree
/// new.txt        untracked
/// dir/inner.txt  committed, changed in worktree
/// fresh/a.txt    untracked directory
/// ```
fn populated_repo() -> (TempDir, RepositoryHandle) {
    let temp = temp_dir();
    let root = temp.path();
    git(root, &["init", "-q", "-b", "main"]);
    for name in ["clean.txt", "modified.txt", "staged.txt", "both.txt", "removed.txt"] {
        fs::write(root.join(name), "original\n").expect("write file");
    }
    fs::create_dir(root.join("dir")).expect("create dir");
    fs::write(root.join("dir").join("inner.txt"), "inner\n").expect("write inner");
    git(root, &["add", "."]);
    git(root, &["commit", "-q", "-m", "initial"]);

    fs::write(root.join("modified.txt"), "modified content\n").expect("modify");
    fs::write(root.join("staged.txt"), "staged content\n").expect("stage");
    fs::write(root.join("both.txt"), "first change\n").expect("both");
    fs::write(root.join("added.txt"), "added\n").expect("add");
    git(root, &["add", "staged.txt", "both.txt", "added.txt"]);
    fs::write(root.join("both.txt"), "second change, longer\n").expect("both again");
    fs::remove_file(root.join("removed.txt")).expect("remove");
    fs::write(root.join("new.txt"), "new\n").expect("untracked");
    fs::write(root.join("dir").join("inner.txt"), "inner changed\n").expect("inner");
    fs::create_dir(root.join("fresh")).expect("create fresh");
    fs::write(root.join("fresh").join("a.txt"), "a\n").expect("fresh file");

    let handle = locator::locate(root).expect("locate");
    (temp, handle)
}

fn backends() -> [QueryBackend; 2] {
    [
        QueryBackend::Gix(GixBackend),
        QueryBackend::Shell(ShellBackend::default()),
    ]
}

#[test]
fn test_under() {
    assert!(under("src/lib.rs", ""));
    assert!(under("src/lib.rs", "src"));
    assert!(under("src/lib.rs", "src/lib.rs"));
    assert!(!under("src2/lib.rs", "src"));
    assert!(!under("src", "src/lib.rs"));
}

#[tokio::test]
async fn test_backends_agree_on_path_status() {
    let (temp, handle) = populated_repo();
    let root = temp.path();

    for backend in backends() {
        let mut rows = Vec::new();
        for name in [
            "clean.txt",
            "modified.txt",
            "staged.txt",
            "both.txt",
            "added.txt",
            "removed.txt",
            "new.txt",
            "dir",
            "dir/inner.txt",
            "fresh",
        ] {
            let status = backend
                .path_status(&handle, &root.join(name))
                .await
                .unwrap_or(PathStatus::Error);
            rows.push(format!("{name}: {status}"));
        }
        insta::allow_duplicates! {
            insta::assert_snapshot!(rows.join("\n"), @r"
            clean.txt: clean
            modified.txt: modified
            staged.txt: staged
            both.txt: staged+modified
            added.txt: staged
            removed.txt: modified
            new.txt: untracked
            dir: modified
            dir/inner.txt: modified
            fresh: untracked
            ");
        }
        assert!(!backend.name().is_empty());
    }
}

#[tokio::test]
async fn test_backends_agree_on_staged_files() {
    let (_temp, handle) = populated_repo();
    for backend in backends() {
        let staged = backend.staged_files(&handle).await.expect("staged files");
        let paths: Vec<&str> = staged.iter().collect();
        assert_eq!(
            paths,
            ["added.txt", "both.txt", "staged.txt"],
            "backend {}",
            backend.name()
        );
    }
}

#[tokio::test]
async fn test_backends_agree_on_branches() {
    let (temp, handle) = populated_repo();
    git(temp.path(), &["branch", "feature/x"]);

    for backend in backends() {
        let current = backend.current_branch(&handle).await.expect("current");
        assert_eq!(current.as_deref(), Some("main"), "backend {}", backend.name());

        let branches = backend.list_branches(&handle).await.expect("branches");
        let names: Vec<&str> = branches.iter().map(|b| b.full_name()).collect();
        assert_eq!(
            names,
            ["refs/heads/feature/x", "refs/heads/main"],
            "backend {}",
            backend.name()
        );
    }
}

#[tokio::test]
async fn test_detached_head_has_no_branch() {
    let (temp, handle) = populated_repo();
    git(temp.path(), &["checkout", "-q", "--detach"]);

    for backend in backends() {
        let current = backend.current_branch(&handle).await.expect("current");
        assert_eq!(current, None, "backend {}", backend.name());
    }
}

#[tokio::test]
async fn test_clean_repository_root() {
    let temp = temp_dir();
    git(temp.path(), &["init", "-q", "-b", "main"]);
    fs::write(temp.path().join("a.txt"), "a\n").expect("write");
    git(temp.path(), &["add", "."]);
    git(temp.path(), &["commit", "-q", "-m", "initial"]);
    let handle = locator::locate(temp.path()).expect("locate");

    for backend in backends() {
        let status = backend
            .path_status(&handle, temp.path())
            .await
            .expect("status");
        assert_eq!(status, PathStatus::Clean, "backend {}", backend.name());
        assert!(
            backend.staged_files(&handle).await.expect("staged").is_empty(),
            "backend {}",
            backend.name()
        );
    }
}

#[tokio::test]
async fn test_conflicted_path_is_not_clean() {
    let temp = temp_dir();
    let root = temp.path();
    git(root, &["init", "-q", "-b", "main"]);
    fs::write(root.join("c.txt"), "base\n").expect("write");
    git(root, &["add", "."]);
    git(root, &["commit", "-q", "-m", "base"]);
    git(root, &["checkout", "-q", "-b", "other"]);
    fs::write(root.join("c.txt"), "other\n").expect("write other");
    git(root, &["commit", "-q", "-am", "other"]);
    git(root, &["checkout", "-q", "main"]);
    fs::write(root.join("c.txt"), "main\n").expect("write main");
    git(root, &["commit", "-q", "-am", "main"]);
    // exits non-zero on the conflict
    let merge = Command::new("git")
        .args(["merge", "-q", "other"])
        .current_dir(root)
        .env("GIT_COMMITTER_NAME", "Test")
        .env("GIT_COMMITTER_EMAIL", "test@example.com")
        .output()
        .expect("failed to run git");
    assert!(!merge.status.success());
    let handle = locator::locate(root).expect("locate");

    for backend in backends() {
        let status = backend
            .path_status(&handle, &root.join("c.txt"))
            .await
            .expect("status");
        assert!(
            status.is_tracked() && status != PathStatus::Clean,
            "backend {}: {status}",
            backend.name()
        );
    }
}
