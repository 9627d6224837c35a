// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Custom Burner Project

//! Duplicate registration replaces the record outright, and
//! `availableImages` reflects only the latest image set.

use crate::prelude::{BurnScript, FakeBurner, Harness};
use cb_coordinator::control;
use std::time::Duration;

#[tokio::test]
async fn duplicate_registration_replaces_images_rather_than_unioning_them() {
    let dir = tempfile::tempdir().expect("tempdir");
    let harness = Harness::start(&dir.path().join("state.db")).await;
    let burner = FakeBurner::spawn(BurnScript::Accept).await;

    FakeBurner::register(harness.addr, "A", burner.port, &["x.iso"]).await;
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(control::list_available_images(&harness.coordinator).contains("x.iso"));

    FakeBurner::register(harness.addr, "A", burner.port, &["y.iso"]).await;
    tokio::time::sleep(Duration::from_millis(50)).await;

    let images = control::list_available_images(&harness.coordinator);
    assert!(images.contains("y.iso"));
    assert!(!images.contains("x.iso"), "the first registration's images must not linger");
    assert_eq!(control::list_burners(&harness.coordinator).len(), 1, "re-registration replaces, not duplicates");

    harness.shutdown().await;
}
