// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Custom Burner Project

//! Burn requests moving through the coordinator's queue.
//!
//! A `Job` is the same value from the moment it is enqueued to the moment it
//! lands in the completed history; it just migrates between sequences
//! (pending → inflight → completed) and gains a `burner` once dispatched.
//! `JobId` is an internal identity used to target a specific pending entry
//! for removal — it never crosses the wire, since the protocol only ever
//! names jobs by their `(date, image, committer)` triple.

use crate::burner::BurnerName;
use serde::{Deserialize, Serialize};

crate::define_id! {
    /// Internal identity for a queued burn request.
    pub struct JobId("job-");
}

/// A burn request: an ISO image to be written, for a given committer, on a
/// given date, plus whichever burner (if any) is currently working it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub date: String,
    pub image: String,
    pub committer: String,
    pub burner: Option<BurnerName>,
}

impl Job {
    pub fn new(date: impl Into<String>, image: impl Into<String>, committer: impl Into<String>) -> Self {
        Self {
            id: JobId::new(),
            date: date.into(),
            image: image.into(),
            committer: committer.into(),
            burner: None,
        }
    }

    /// Matches the triple the wire protocol identifies a burn request by.
    pub fn matches(&self, date: &str, image: &str, committer: &str) -> bool {
        self.date == date && self.image == image && self.committer == committer
    }

    /// Returns a copy of this job dispatched to `burner`.
    pub fn dispatched_to(&self, burner: impl Into<BurnerName>) -> Self {
        let mut job = self.clone();
        job.burner = Some(burner.into());
        job
    }
}

crate::builder! {
    pub struct JobBuilder => Job {
        into {
            date: String = "2026-07-28",
            image: String = "test.iso",
            committer: String = "tester",
        }
        option {
            burner: BurnerName = None,
        }
        computed {
            id: JobId = JobId::new(),
        }
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
