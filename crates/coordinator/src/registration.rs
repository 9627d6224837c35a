// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Custom Burner Project

//! Handling for `"Please register me"`: the one command that mutates the
//! registry from the ingress side rather than the job queue.

use crate::coordinator::Coordinator;
use cb_core::Clock;
use cb_wire::RegisterPayload;
use std::net::IpAddr;

/// Register (or replace) a burner from a parsed registration payload.
///
/// A duplicate name logs a warning and replaces the record outright —
/// `Registry::register` already does that. This just adapts the wire
/// payload to the registry's arguments and persists.
pub fn handle_register<C: Clock>(coordinator: &Coordinator<C>, address: IpAddr, payload: RegisterPayload) {
    coordinator.registry.lock().register(payload.name, address, payload.port, payload.images.into_iter().collect());
    coordinator.persist();
}

#[cfg(test)]
#[path = "registration_tests.rs"]
mod tests;
