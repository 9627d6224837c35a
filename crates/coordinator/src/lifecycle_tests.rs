// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Custom Burner Project

use super::*;
use crate::config::Config;

#[tokio::test]
async fn startup_binds_port_zero_and_loads_empty_state_when_nothing_persisted() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = Config::new(0, dir.path());

    let (_lock, coordinator, listener) = startup(&config).await.expect("startup");

    assert!(listener.local_addr().expect("local_addr").port() != 0);
    assert!(coordinator.registry.lock().is_empty());
}

#[tokio::test]
async fn a_second_startup_against_the_same_state_dir_fails_with_already_running() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = Config::new(0, dir.path());

    let (lock, _coordinator, _listener) = startup(&config).await.expect("first startup");

    let second = startup(&config).await;
    assert!(matches!(second, Err(LifecycleError::AlreadyRunning(_))));

    drop(lock);
}

#[tokio::test]
async fn startup_after_releasing_the_lock_succeeds() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = Config::new(0, dir.path());

    let (lock, _coordinator, _listener) = startup(&config).await.expect("first startup");
    drop(lock);

    let second = startup(&config).await;
    assert!(second.is_ok());
}
