// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Custom Burner Project

//! Whole-state persistence to a single file.
//!
//! The serialized root is a four-tuple: burners map, pending sequence,
//! in-flight sequence, completed sequence — wrapped with a schema-version
//! byte so a future format change can be detected on load. JSON is
//! self-describing enough that a truncated write reads back as a parse
//! error rather than silently-wrong data.

use crate::job_queue::JobQueue;
use crate::registry::Registry;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Current snapshot schema version.
pub const CURRENT_SNAPSHOT_VERSION: u32 = 1;

pub const DEFAULT_STATE_FILE: &str = "custom_burner_server.db";

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("corrupt or truncated snapshot: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// The persistence root: schema version plus the registry and job queue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(rename = "v")]
    pub version: u32,
    /// When this snapshot was written. Metadata only — never read back
    /// into the live registry or job queue, just surfaced for operators
    /// inspecting the state file.
    pub created_at: DateTime<Utc>,
    pub burners: Registry,
    pub pending: Vec<cb_core::Job>,
    pub inflight: Vec<cb_core::Job>,
    pub completed: Vec<cb_core::Job>,
}

impl Snapshot {
    pub fn new(registry: &Registry, queue: &JobQueue) -> Self {
        Self {
            version: CURRENT_SNAPSHOT_VERSION,
            created_at: Utc::now(),
            burners: registry.clone(),
            pending: queue.list_pending(),
            inflight: queue.list_inflight(),
            completed: queue.list_completed(),
        }
    }

    /// Rebuild a `JobQueue` from the sequences this snapshot carries.
    pub fn into_job_queue(self) -> JobQueue {
        let mut queue = JobQueue::new();
        for job in self.pending {
            queue.enqueue(job);
        }
        // Re-inserting through `enqueue` would lose the pending/inflight
        // split, so inflight and completed are restored directly.
        queue.restore_inflight_and_completed(self.inflight, self.completed);
        queue
    }
}

/// Write `snapshot` to `path` atomically: serialize to a sibling `.tmp`
/// file, then rename over the destination. This gives a write-discipline
/// guarantee (every write either fully lands or not at all) without
/// needing to fsync here.
pub fn save(path: &Path, snapshot: &Snapshot) -> Result<(), SnapshotError> {
    let tmp_path = tmp_path_for(path);
    let json = serde_json::to_vec_pretty(snapshot)?;
    std::fs::write(&tmp_path, json)?;
    std::fs::rename(&tmp_path, path)?;
    Ok(())
}

/// Load a snapshot from `path`.
///
/// - File not found → `Ok(None)`, caller starts with empty state.
/// - Truncated or corrupt contents → the error is returned so the caller
///   can log it and start empty; the file itself is left untouched.
pub fn load(path: &Path) -> Result<Option<Snapshot>, SnapshotError> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let snapshot: Snapshot = serde_json::from_slice(&bytes)?;
    Ok(Some(snapshot))
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod tests;
