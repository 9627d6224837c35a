// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Custom Burner Project

//! The three ordered job sequences: pending, in-flight, completed.
//!
//! Guarded in the coordinator by `jobsLock`, acquired before `registryLock`
//! whenever both are needed. Every operation here is a pure in-memory
//! update; the coordinator releases the lock before doing any network I/O
//! and re-acquires it to commit a dispatch decision.

use cb_core::{BurnerName, Job, JobId};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobQueue {
    pending: VecDeque<Job>,
    inflight: Vec<Job>,
    completed: Vec<Job>,
}

impl JobQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a freshly-created job to the tail of `pending`.
    pub fn enqueue(&mut self, job: Job) {
        self.pending.push_back(job);
    }

    /// Remove a specific pending entry by identity. Used for operator
    /// cancellation; a no-op (returns `None`) if the job already moved on.
    pub fn remove_pending(&mut self, id: JobId) -> Option<Job> {
        let index = self.pending.iter().position(|j| j.id == id)?;
        self.pending.remove(index)
    }

    pub fn list_pending(&self) -> Vec<Job> {
        self.pending.iter().cloned().collect()
    }

    pub fn list_inflight(&self) -> Vec<Job> {
        self.inflight.clone()
    }

    pub fn list_completed(&self) -> Vec<Job> {
        self.completed.clone()
    }

    /// A snapshot of `pending` in order, for a dispatch pass to iterate
    /// over without holding the lock across the attempt.
    pub fn pending_snapshot(&self) -> Vec<Job> {
        self.list_pending()
    }

    /// Move the pending entry with this id to `inflight`, assigning it to
    /// `burner`. Returns `None` (discard the placement) if the job is no
    /// longer pending by the time the caller re-acquires the lock to
    /// commit — e.g. it was cancelled mid-dispatch-attempt.
    pub fn place(&mut self, id: JobId, burner: impl Into<BurnerName>) -> Option<Job> {
        let index = self.pending.iter().position(|j| j.id == id)?;
        let job = self.pending.remove(index)?.dispatched_to(burner);
        self.inflight.push(job.clone());
        Some(job)
    }

    /// Completion report: move the in-flight entry for `burner` to
    /// `completed`. `None` if no such entry exists.
    pub fn complete(&mut self, burner: &str) -> Option<Job> {
        let index = self.inflight.iter().position(|j| j.burner.as_deref() == Some(burner))?;
        let job = self.inflight.remove(index);
        self.completed.push(job.clone());
        Some(job)
    }

    /// Failure report: re-insert the in-flight entry for `burner` at the
    /// head of `pending` for fast retry, clearing its burner assignment.
    /// `None` if no such entry exists.
    pub fn fail_and_retry(&mut self, burner: &str) -> Option<Job> {
        let index = self.inflight.iter().position(|j| j.burner.as_deref() == Some(burner))?;
        let mut job = self.inflight.remove(index);
        job.burner = None;
        self.pending.push_front(job.clone());
        Some(job)
    }

    /// Restore the in-flight and completed sequences exactly as loaded
    /// from a snapshot, bypassing the normal dispatch/report transitions.
    pub fn restore_inflight_and_completed(&mut self, inflight: Vec<Job>, completed: Vec<Job>) {
        self.inflight = inflight;
        self.completed = completed;
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn inflight_len(&self) -> usize {
        self.inflight.len()
    }

    pub fn completed_len(&self) -> usize {
        self.completed.len()
    }
}

#[cfg(test)]
#[path = "job_queue_tests.rs"]
mod tests;
