// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Custom Burner Project

//! Coordinator state and its on-disk persistence: the burner registry, the
//! pending/in-flight/completed job sequences, and the single-file snapshot
//! that survives a restart.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod job_queue;
pub mod registry;
pub mod snapshot;

pub use job_queue::JobQueue;
pub use registry::Registry;
pub use snapshot::{Snapshot, SnapshotError, CURRENT_SNAPSHOT_VERSION, DEFAULT_STATE_FILE};
