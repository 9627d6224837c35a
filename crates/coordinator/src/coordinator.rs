// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Custom Burner Project

//! The shared state every other module in this crate operates on: the
//! registry and job queue behind their own locks, plus the path state
//! gets persisted to.
//!
//! Lock discipline (spec'd, not just convention): whenever both locks are
//! needed, acquire `jobs` before `registry`. Never hold either lock across
//! network I/O — callers snapshot under lock, release, do I/O, then
//! re-acquire to commit.

use cb_core::{Clock, SystemClock};
use cb_storage::{JobQueue, Registry, Snapshot};
use parking_lot::Mutex;
use std::path::PathBuf;

pub struct Coordinator<C: Clock = SystemClock> {
    pub jobs: Mutex<JobQueue>,
    pub registry: Mutex<Registry>,
    pub state_path: PathBuf,
    pub clock: C,
}

impl Coordinator<SystemClock> {
    pub fn empty(state_path: impl Into<PathBuf>) -> Self {
        Self::with_clock(state_path, JobQueue::new(), Registry::new(), SystemClock)
    }
}

impl<C: Clock> Coordinator<C> {
    pub fn with_clock(state_path: impl Into<PathBuf>, jobs: JobQueue, registry: Registry, clock: C) -> Self {
        Self { jobs: Mutex::new(jobs), registry: Mutex::new(registry), state_path: state_path.into(), clock }
    }

    pub fn from_snapshot(state_path: impl Into<PathBuf>, snapshot: Snapshot, clock: C) -> Self {
        let registry = snapshot.burners.clone();
        let jobs = snapshot.into_job_queue();
        Self::with_clock(state_path, jobs, registry, clock)
    }

    /// Build a persistence snapshot, honoring the jobs-before-registry
    /// acquisition order.
    pub fn snapshot(&self) -> Snapshot {
        let jobs = self.jobs.lock();
        let registry = self.registry.lock();
        Snapshot::new(&registry, &jobs)
    }

    /// Serialize and replace the state file. A write failure is logged and
    /// the in-memory state is kept as-is; the next successful write
    /// supersedes it.
    pub fn persist(&self) {
        let snapshot = self.snapshot();
        if let Err(e) = cb_storage::snapshot::save(&self.state_path, &snapshot) {
            tracing::error!(error = %e, path = %self.state_path.display(), "failed to persist coordinator state");
        }
    }
}

#[cfg(test)]
#[path = "coordinator_tests.rs"]
mod tests;
