// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Custom Burner Project

//! CLI-surface behavior for both binaries: the handful of misuse cases
//! that exit before blocking on network I/O or a shutdown signal, and so
//! are safe to drive with a synchronous `assert_cmd::Command`.

use crate::prelude::{cbd, cbw};

#[test]
fn cbd_refuses_the_curses_flag_it_does_not_build() {
    let output = cbd().arg("--curses").output().expect("run cbd");
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("curses"));
}

#[test]
fn cbw_refuses_to_start_without_a_burn_command() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = cbw()
        .arg("--dir")
        .arg(dir.path())
        .arg("--port")
        .arg("0")
        .output()
        .expect("run cbw");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("burn"));
}

#[test]
fn cbd_refuses_to_start_against_an_already_locked_state_dir() {
    use fs2::FileExt;

    let dir = tempfile::tempdir().expect("tempdir");
    let lock_path = dir.path().join("custom_burner_server.lock");
    let lock_file = std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .open(&lock_path)
        .expect("create lock file");
    lock_file.lock_exclusive().expect("hold the lock for the test");

    let output = cbd()
        .arg("--state-dir")
        .arg(dir.path())
        .arg("--port")
        .arg("0")
        .output()
        .expect("run cbd");

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("already running"));
}
