// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Custom Burner Project

//! The operator control surface: the handful of operations a caller drives
//! the coordinator with directly, as opposed to what arrives over the
//! wire from workers.
//!
//! Deliberately an in-process API rather than its own wire protocol — any
//! UI (a CLI subcommand, a future curses front-end, a test harness) calls
//! these functions against a shared `Arc<Coordinator<_>>`.

use crate::coordinator::Coordinator;
use crate::dispatch::dispatch_pass;
use cb_core::{BurnerSnapshot, Clock, Job, JobId};
use cb_wire::{handshake_as_initiator, send_goodbye, LineStream, ProtocolError};
use chrono::{DateTime, Utc};
use std::collections::BTreeSet;
use tokio::net::TcpStream;

/// Submit a new burn request, stamping it with the coordinator's clock.
/// Returns the freshly assigned `JobId` so a caller can later cancel it
/// before it's dispatched.
pub fn enqueue<C: Clock>(
    coordinator: &Coordinator<C>,
    image: impl Into<String>,
    committer: impl Into<String>,
) -> JobId {
    let job = Job::new(enqueue_date(coordinator), image, committer);
    let id = job.id;
    coordinator.jobs.lock().enqueue(job);
    coordinator.persist();
    id
}

fn enqueue_date<C: Clock>(coordinator: &Coordinator<C>) -> String {
    DateTime::<Utc>::from_timestamp_millis(coordinator.clock.epoch_ms() as i64)
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_default()
}

/// Cancel a job still waiting in `pending`. A job already dispatched or
/// completed can't be cancelled this way — callers get `None` either way
/// as a signal to re-check state instead of a distinct "too late" error.
pub fn cancel_pending<C: Clock>(coordinator: &Coordinator<C>, id: JobId) -> Option<Job> {
    let removed = coordinator.jobs.lock().remove_pending(id);
    if removed.is_some() {
        coordinator.persist();
    }
    removed
}

/// Run one dispatch pass on demand, outside the usual triggers (new
/// registration, new enqueue, a completion/failure report).
pub async fn trigger_refresh<C: Clock>(coordinator: &Coordinator<C>) {
    dispatch_pass(coordinator).await;
}

pub fn list_available_images<C: Clock>(coordinator: &Coordinator<C>) -> BTreeSet<String> {
    coordinator.registry.lock().available_images()
}

pub fn list_pending<C: Clock>(coordinator: &Coordinator<C>) -> Vec<Job> {
    coordinator.jobs.lock().list_pending()
}

pub fn list_inflight<C: Clock>(coordinator: &Coordinator<C>) -> Vec<Job> {
    coordinator.jobs.lock().list_inflight()
}

pub fn list_completed<C: Clock>(coordinator: &Coordinator<C>) -> Vec<Job> {
    coordinator.jobs.lock().list_completed()
}

pub fn list_burners<C: Clock>(coordinator: &Coordinator<C>) -> Vec<BurnerSnapshot> {
    coordinator.registry.lock().snapshot()
}

/// Best-effort notification to every registered burner that the
/// coordinator is going away. Each burner gets its own short-lived
/// connection; a burner that's unreachable is logged and skipped rather
/// than treated as a shutdown failure.
pub async fn notify_all_burners_goodbye<C: Clock>(coordinator: &Coordinator<C>) {
    let burners = coordinator.registry.lock().snapshot();
    for burner in burners {
        if let Err(e) = send_goodbye_to(burner.address, burner.port).await {
            tracing::warn!(burner = %burner.name, error = %e, "failed to notify burner of shutdown");
        }
    }
}

async fn send_goodbye_to(address: std::net::IpAddr, port: u16) -> Result<(), ProtocolError> {
    let stream = TcpStream::connect((address, port)).await?;
    let mut line = LineStream::new(stream);
    handshake_as_initiator(&mut line).await?;
    send_goodbye(&mut line, None).await
}

#[cfg(test)]
#[path = "control_tests.rs"]
mod tests;
