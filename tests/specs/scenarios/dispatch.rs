// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Custom Burner Project

//! Dispatch happy path, refusal, and multi-burner fan-out — driven against
//! a real ingress loop and dispatch engine, with fake burners speaking the
//! real wire protocol.

use crate::prelude::{BurnScript, FakeBurner, Harness};
use cb_coordinator::control;
use std::time::Duration;

#[tokio::test]
async fn dispatch_happy_path_places_the_job_and_pushes_the_exact_request() {
    let dir = tempfile::tempdir().expect("tempdir");
    let harness = Harness::start(&dir.path().join("state.db")).await;
    let mut burner = FakeBurner::spawn(BurnScript::Accept).await;
    FakeBurner::register(harness.addr, "A", burner.port, &["x.iso", "y.iso"]).await;
    tokio::time::sleep(Duration::from_millis(50)).await;

    control::enqueue(&harness.coordinator, "x.iso", "alice");
    harness.refresh().await;

    let request = burner.next_request().await;
    assert_eq!(request.image, "x.iso");
    assert_eq!(request.committer, "alice");

    assert!(control::list_pending(&harness.coordinator).is_empty());
    let inflight = control::list_inflight(&harness.coordinator);
    assert_eq!(inflight.len(), 1);
    assert_eq!(inflight[0].burner.as_deref(), Some("A"));
    assert!(control::list_burners(&harness.coordinator)[0].busy);

    harness.shutdown().await;
}

#[tokio::test]
async fn refusal_leaves_the_job_pending_and_the_burner_idle() {
    let dir = tempfile::tempdir().expect("tempdir");
    let harness = Harness::start(&dir.path().join("state.db")).await;
    let mut burner = FakeBurner::spawn(BurnScript::Refuse).await;
    FakeBurner::register(harness.addr, "A", burner.port, &["x.iso"]).await;
    tokio::time::sleep(Duration::from_millis(50)).await;

    control::enqueue(&harness.coordinator, "x.iso", "alice");
    harness.refresh().await;
    burner.next_request().await;

    let pending = control::list_pending(&harness.coordinator);
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].image, "x.iso");
    assert!(control::list_inflight(&harness.coordinator).is_empty());
    assert!(!control::list_burners(&harness.coordinator)[0].busy);

    harness.shutdown().await;
}

#[tokio::test]
async fn multi_burner_fan_out_places_each_job_on_a_distinct_burner_in_name_order() {
    let dir = tempfile::tempdir().expect("tempdir");
    let harness = Harness::start(&dir.path().join("state.db")).await;

    let mut burner_a = FakeBurner::spawn(BurnScript::Accept).await;
    let mut burner_b = FakeBurner::spawn(BurnScript::Accept).await;
    FakeBurner::register(harness.addr, "A", burner_a.port, &["x.iso"]).await;
    FakeBurner::register(harness.addr, "B", burner_b.port, &["x.iso", "y.iso"]).await;
    tokio::time::sleep(Duration::from_millis(50)).await;

    control::enqueue(&harness.coordinator, "x.iso", "alice");
    control::enqueue(&harness.coordinator, "y.iso", "bob");
    harness.refresh().await;

    let request_a = burner_a.next_request().await;
    assert_eq!(request_a.image, "x.iso", "A is tried first in name order and holds x.iso");

    let request_b = burner_b.next_request().await;
    assert_eq!(request_b.image, "y.iso", "B is the only idle burner left for y.iso");

    assert!(control::list_pending(&harness.coordinator).is_empty());
    assert_eq!(control::list_inflight(&harness.coordinator).len(), 2);

    harness.shutdown().await;
}
