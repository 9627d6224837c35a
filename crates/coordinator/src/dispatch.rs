// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Custom Burner Project

//! The dispatch engine: one pass over the pending sequence, attempting to
//! place each job on an idle, image-capable burner.
//!
//! Triggered by operator refresh, a new enqueue, a new registration, or
//! (optionally) a periodic tick — the algorithm is the same single pass
//! either way.

use crate::coordinator::Coordinator;
use cb_core::{Assignment, Clock};
use cb_wire::{handshake_as_initiator, send_request_burn, BurnOutcome, LineStream, ProtocolError};
use std::net::IpAddr;
use tokio::net::TcpStream;

/// Open a fresh connection to a burner and push one burn request.
///
/// Three outcomes per the protocol: `Accepted`, `Refused` (the burner
/// doesn't have the image — a normal signal, not an error), or a transport
/// or protocol error, which the caller treats the same as a refusal.
pub async fn push_burn(
    address: IpAddr,
    port: u16,
    date: &str,
    image: &str,
    committer: &str,
) -> Result<BurnOutcome, ProtocolError> {
    let stream = TcpStream::connect((address, port)).await?;
    let mut line = LineStream::new(stream);
    handshake_as_initiator(&mut line).await?;
    send_request_burn(&mut line, date, image, committer).await
}

/// Run one dispatch pass over the current pending sequence.
///
/// Per the concurrency model: the pending snapshot and the burner
/// iteration order are taken under lock, the lock is released before any
/// network I/O (`push_burn` never runs while either lock is held), and the
/// state transition is committed by re-acquiring the locks (jobs before
/// registry) and rechecking that the target burner is still registered and
/// idle — if not, the attempted placement is discarded and the next
/// burner (or job) is tried instead.
pub async fn dispatch_pass<C: Clock>(coordinator: &Coordinator<C>) {
    let pending = coordinator.jobs.lock().pending_snapshot();
    let dispatch_order = coordinator.registry.lock().names_in_dispatch_order();

    'jobs: for job in pending {
        for name in &dispatch_order {
            let candidate = {
                let registry = coordinator.registry.lock();
                registry
                    .get(name)
                    .filter(|b| !b.is_busy() && b.has_image(&job.image))
                    .map(|b| (b.address, b.port))
            };
            let Some((address, port)) = candidate else { continue };

            match push_burn(address, port, &job.date, &job.image, &job.committer).await {
                Ok(BurnOutcome::Accepted) => {
                    let placed = {
                        let mut jobs = coordinator.jobs.lock();
                        let mut registry = coordinator.registry.lock();
                        let still_idle = registry.get(name).is_some_and(|b| !b.is_busy());
                        if !still_idle {
                            None
                        } else {
                            jobs.place(job.id, name.clone()).inspect(|placed| {
                                registry.mark_busy(
                                    name,
                                    Assignment {
                                        date: placed.date.clone(),
                                        image: placed.image.clone(),
                                        committer: placed.committer.clone(),
                                    },
                                );
                            })
                        }
                    };
                    if placed.is_some() {
                        coordinator.persist();
                        continue 'jobs;
                    }
                    tracing::warn!(burner = %name, job = %job.id, "burner no longer idle at commit time, discarding placement");
                }
                Ok(BurnOutcome::Refused) => {
                    tracing::debug!(burner = %name, image = %job.image, "burner refused, image not held");
                }
                Err(e) => {
                    tracing::error!(burner = %name, error = %e, "push_burn failed, treating as refusal");
                }
            }
        }
        tracing::warn!(job = %job.id, image = %job.image, "no idle burner accepted job, leaving pending");
    }
}

#[cfg(test)]
#[path = "dispatch_tests.rs"]
mod tests;
