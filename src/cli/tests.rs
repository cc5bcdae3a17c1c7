// fmgit: File Manager Git Engine
//
// SPDX-FileCopyrightText: 2026 fmgit contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::PathBuf;

use crate::cli::git::{BranchSubcommand, LogSubcommand};
use crate::cli::{Cli, Command};
use crate::config::types::BackendKind;
use clap::Parser;

#[test]
fn test_parse_version() {
    let cli = Cli::try_parse_from(["fmgit", "version"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Version)));
}

#[test]
fn test_parse_global_options() {
    let cli = Cli::try_parse_from([
        "fmgit",
        "-l",
        "4",
        "--backend",
        "shell",
        "-c",
        "a.toml",
        "-c",
        "b.toml",
        "--set",
        "git.program=/opt/git/bin/git",
        "--json",
        "options",
    ])
    .unwrap();
    assert_eq!(cli.global.backend, Some(BackendKind::Shell));
    assert_eq!(
        cli.global.configs,
        [PathBuf::from("a.toml"), PathBuf::from("b.toml")]
    );
    assert!(cli.global.json);
    insta::assert_debug_snapshot!(cli.global.to_config_overrides(), @r#"
    [
        (
            "git.program",
            "/opt/git/bin/git",
        ),
        (
            "git.backend",
            "shell",
        ),
        (
            "global.output_log_level",
            "4",
        ),
        (
            "global.file_log_level",
            "4",
        ),
    ]
    "#);
}

#[test]
fn test_rejects_bad_options() {
    assert!(Cli::try_parse_from(["fmgit", "-l", "9", "version"]).is_err());
    assert!(Cli::try_parse_from(["fmgit", "--backend", "svn", "version"]).is_err());
    assert!(Cli::try_parse_from(["fmgit", "--set", "novalue", "version"]).is_err());
    assert!(Cli::try_parse_from(["fmgit", "--set", "nosection=1", "version"]).is_err());
    assert!(Cli::try_parse_from(["fmgit", "status"]).is_err());
}

#[test]
fn test_parse_branch_rename() {
    let cli = Cli::try_parse_from(["fmgit", "branch", "rename", "old", "new", "-C", "/work/repo"])
        .unwrap();
    let Some(Command::Branch(args)) = cli.command else {
        panic!("expected branch command");
    };
    let BranchSubcommand::Rename { old, new, repo } = args.subcommand else {
        panic!("expected rename");
    };
    assert_eq!(old, "old");
    assert_eq!(new, "new");
    assert_eq!(repo.repo, PathBuf::from("/work/repo"));
}

#[test]
fn test_parse_commit_defaults_to_current_dir() {
    let cli = Cli::try_parse_from(["fmgit", "commit", "-m", "fix: typo"]).unwrap();
    let Some(Command::Commit(args)) = cli.command else {
        panic!("expected commit command");
    };
    assert_eq!(args.message, "fix: typo");
    assert_eq!(args.repo.repo, PathBuf::from("."));
}

#[test]
fn test_parse_restore_staged_and_rm_cached() {
    let cli = Cli::try_parse_from(["fmgit", "restore", "--staged", "a.txt"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Restore(ref args)) if args.staged));

    let cli = Cli::try_parse_from(["fmgit", "rm", "--cached", "a.txt"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Rm(ref args)) if args.cached));
}

#[test]
fn test_parse_log_show() {
    let cli = Cli::try_parse_from(["fmgit", "log", "show", "HEAD~1"]).unwrap();
    let Some(Command::Log(args)) = cli.command else {
        panic!("expected log command");
    };
    assert!(matches!(args.subcommand, LogSubcommand::Show { ref id, .. } if id == "HEAD~1"));
}

#[test]
fn test_parse_clone() {
    let cli = Cli::try_parse_from([
        "fmgit",
        "clone",
        "https://example.com/repo.git",
        "dest",
        "--no-prompt",
    ])
    .unwrap();
    let Some(Command::Clone(args)) = cli.command else {
        panic!("expected clone command");
    };
    assert_eq!(args.url, "https://example.com/repo.git");
    assert_eq!(args.dest, PathBuf::from("dest"));
    assert!(args.no_prompt);
}

#[test]
fn test_parse_file_commands() {
    let cli = Cli::try_parse_from(["fmgit", "new", "docs", "guide", "--dir"]).unwrap();
    let Some(Command::New(args)) = cli.command else {
        panic!("expected new command");
    };
    assert_eq!(args.location, PathBuf::from("docs"));
    assert_eq!(args.name, "guide");
    assert!(args.directory);

    let cli = Cli::try_parse_from(["fmgit", "rename", "a.txt", "b.txt"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Rename(ref args)) if args.name == "b.txt"));

    let cli = Cli::try_parse_from(["fmgit", "delete", "old"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Delete(ref args)) if args.path == PathBuf::from("old")));

    assert!(Cli::try_parse_from(["fmgit", "new", "docs"]).is_err());
}
