// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Custom Burner Project

//! After a dispatch, the coordinator process is replaced by a fresh one
//! loading the same state file; the in-flight job survives the restart
//! and a subsequent completion report still lands.

use crate::prelude::{BurnScript, FakeBurner, Harness};
use cb_coordinator::{control, Coordinator};
use cb_core::FakeClock;
use std::time::Duration;

#[tokio::test]
async fn inflight_job_survives_a_restart_and_still_completes() {
    let dir = tempfile::tempdir().expect("tempdir");
    let state_path = dir.path().join("state.db");

    let mut burner = FakeBurner::spawn(BurnScript::Accept).await;
    {
        let harness = Harness::start(&state_path).await;
        FakeBurner::register(harness.addr, "A", burner.port, &["x.iso"]).await;
        tokio::time::sleep(Duration::from_millis(50)).await;

        control::enqueue(&harness.coordinator, "x.iso", "alice");
        harness.refresh().await;
        burner.next_request().await;
        assert_eq!(control::list_inflight(&harness.coordinator).len(), 1);

        harness.shutdown().await;
    }
    // The harness (and its in-memory state) is gone; only the state file remains.

    let snapshot = cb_storage::snapshot::load(&state_path)
        .expect("load should not error")
        .expect("a snapshot should have been persisted");
    let reloaded = Coordinator::from_snapshot(state_path.clone(), snapshot, FakeClock::new());
    assert_eq!(control::list_inflight(&reloaded).len(), 1, "in-flight job must survive the restart");
    assert!(control::list_available_images(&reloaded).contains("x.iso"), "availableImages must be reconstructed");

    let harness = Harness::start_with(reloaded).await;
    FakeBurner::report_success(harness.addr, "A", "x.iso", "alice").await;
    tokio::time::sleep(Duration::from_millis(50)).await;

    assert!(control::list_inflight(&harness.coordinator).is_empty());
    assert_eq!(control::list_completed(&harness.coordinator).len(), 1);

    harness.shutdown().await;
}
