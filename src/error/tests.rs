// fmgit: File Manager Git Engine
//
// SPDX-FileCopyrightText: 2026 fmgit contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{ConfigError, FmError, FmResult, GitError, ProcessError};

#[test]
fn test_config_error_display() {
    let err = ConfigError::InvalidValue {
        section: "git".to_string(),
        key: "backend".to_string(),
        message: "expected 'shell' or 'gix'".to_string(),
    };
    insta::assert_snapshot!(
        err.to_string(),
        @"invalid value for 'backend' in section '[git]': expected 'shell' or 'gix'"
    );
}

#[test]
fn test_git_error_messages() {
    let err: FmError = GitError::NothingToCommit.into();
    insta::assert_snapshot!(err.to_string(), @"git error: nothing to commit");

    let err: FmError = GitError::MergeConflict {
        branch: "feature".to_string(),
    }
    .into();
    assert!(err.to_string().contains("merge failed, already aborted"));

    let err: FmError = GitError::NotARepository {
        path: "/tmp".to_string(),
    }
    .into();
    assert!(err.to_string().contains("not a git directory"));
}

#[test]
fn test_precondition_classification() {
    let precondition: FmError = GitError::SameBranch {
        branch: "main".to_string(),
    }
    .into();
    assert!(precondition.is_precondition());

    let execution: FmError = GitError::CommitFailed.into();
    assert!(!execution.is_precondition());

    let process: FmError = ProcessError::ExecutableNotFound {
        name: "git".to_string(),
    }
    .into();
    assert!(!process.is_precondition());
    assert!(process.as_git().is_none());
}

#[test]
fn test_fm_error_size() {
    // Box<str> variants (Other) are 16 bytes (fat pointer: ptr + len)
    // With discriminant + alignment = 24 bytes
    let size = std::mem::size_of::<FmError>();
    assert!(size <= 24, "FmError is {size} bytes, expected <= 24");
}

#[test]
fn test_fm_result_size() {
    let size = std::mem::size_of::<FmResult<()>>();
    assert!(size <= 24, "FmResult<()> is {size} bytes, expected <= 24");
}
