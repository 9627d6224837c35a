// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Custom Burner Project

//! A reported failure jumps the job back to the head of `pending` rather
//! than the tail, ahead of jobs enqueued since.

use crate::prelude::{BurnScript, FakeBurner, Harness};
use cb_coordinator::control;
use std::time::Duration;

#[tokio::test]
async fn failed_burn_is_reinserted_at_the_head_of_pending() {
    let dir = tempfile::tempdir().expect("tempdir");
    let harness = Harness::start(&dir.path().join("state.db")).await;
    let mut burner = FakeBurner::spawn(BurnScript::Accept).await;
    FakeBurner::register(harness.addr, "A", burner.port, &["x.iso", "y.iso"]).await;
    tokio::time::sleep(Duration::from_millis(50)).await;

    control::enqueue(&harness.coordinator, "x.iso", "alice");
    harness.refresh().await;
    burner.next_request().await;
    assert_eq!(control::list_inflight(&harness.coordinator).len(), 1);

    control::enqueue(&harness.coordinator, "y.iso", "bob");
    FakeBurner::report_failure(harness.addr, "A", "x.iso", "alice").await;
    tokio::time::sleep(Duration::from_millis(50)).await;

    assert!(control::list_inflight(&harness.coordinator).is_empty());
    assert!(!control::list_burners(&harness.coordinator)[0].busy);

    let pending = control::list_pending(&harness.coordinator);
    assert_eq!(pending.len(), 2);
    assert_eq!(pending[0].image, "x.iso", "the failed job must jump ahead of y.iso/bob");
    assert_eq!(pending[1].image, "y.iso");

    harness.shutdown().await;
}
