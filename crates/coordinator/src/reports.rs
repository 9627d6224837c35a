// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Custom Burner Project

//! Handling for the three reports a worker can send in: completion,
//! failure, and goodbye. Called from the ingress handler once it has
//! parsed the corresponding command.

use crate::coordinator::Coordinator;
use cb_core::Clock;

/// `"Burn successful"`: move the in-flight entry for `burner` to
/// `completed` and mark the burner free. Logs and leaves state unchanged
/// if no such in-flight entry exists.
pub fn report_completion<C: Clock>(coordinator: &Coordinator<C>, burner: &str, image: &str) {
    let moved = {
        let mut jobs = coordinator.jobs.lock();
        let mut registry = coordinator.registry.lock();
        let job = jobs.complete(burner);
        if job.is_some() {
            registry.mark_free(burner);
        }
        job
    };
    match moved {
        Some(_) => coordinator.persist(),
        None => tracing::error!(burner, image, "completion report for a job not in-flight"),
    }
}

/// `"Burn unsuccessful"`: re-insert the in-flight entry for `burner` at the
/// head of `pending` and mark the burner free. If the burner itself is no
/// longer registered (a goodbye may have raced this report), log and drop
/// the report without mutating the queue, leaving an orphaned in-flight
/// entry rather than retrying on behalf of a burner that no longer exists.
pub fn report_failure<C: Clock>(coordinator: &Coordinator<C>, burner: &str, image: &str) {
    let outcome = {
        let mut jobs = coordinator.jobs.lock();
        let mut registry = coordinator.registry.lock();
        if registry.get(burner).is_none() {
            None
        } else {
            let job = jobs.fail_and_retry(burner);
            if job.is_some() {
                registry.mark_free(burner);
            }
            job
        }
    };
    match outcome {
        Some(_) => coordinator.persist(),
        None => tracing::error!(burner, image, "failure report for an unregistered or unknown burner"),
    }
}

/// `"Bye bye"` from a worker: forget the burner.
pub fn report_goodbye<C: Clock>(coordinator: &Coordinator<C>, burner: &str) {
    let removed = coordinator.registry.lock().forget(burner);
    if removed {
        coordinator.persist();
    } else {
        tracing::warn!(burner, "goodbye from an unregistered burner");
    }
}

#[cfg(test)]
#[path = "reports_tests.rs"]
mod tests;
