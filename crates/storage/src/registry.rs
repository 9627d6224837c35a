// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Custom Burner Project

//! The burner registry: mapping from burner name to its record.
//!
//! Guarded in the coordinator by `registryLock`. Every mutation here is a
//! pure in-memory update — no I/O, no locking — so the coordinator can hold
//! the lock only across the update and release it before touching the
//! network or disk.

use cb_core::{Assignment, Burner, BurnerName, BurnerSnapshot};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::net::IpAddr;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Registry {
    burners: HashMap<BurnerName, Burner>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace, with a warning) a burner. Rebuilding
    /// `availableImages` is implicit — it is always derived, never stored.
    pub fn register(
        &mut self,
        name: impl Into<BurnerName>,
        address: IpAddr,
        port: u16,
        images: BTreeSet<String>,
    ) {
        let name = name.into();
        if self.burners.contains_key(&name) {
            tracing::warn!(burner = %name, "replacing existing burner registration");
        }
        self.burners.insert(name.clone(), Burner::new(name, address, port, images));
    }

    /// Remove a burner if present. Returns whether one was removed.
    pub fn forget(&mut self, name: &str) -> bool {
        self.burners.remove(name).is_some()
    }

    pub fn get(&self, name: &str) -> Option<&Burner> {
        self.burners.get(name)
    }

    /// Mark `name` busy with `assignment`. No-op (returns `false`) if the
    /// burner is not registered — the caller should discard the attempted
    /// placement in that case.
    pub fn mark_busy(&mut self, name: &str, assignment: Assignment) -> bool {
        match self.burners.get_mut(name) {
            Some(burner) => {
                burner.assign(assignment);
                true
            }
            None => false,
        }
    }

    pub fn mark_free(&mut self, name: &str) -> bool {
        match self.burners.get_mut(name) {
            Some(burner) => {
                burner.mark_free();
                true
            }
            None => false,
        }
    }

    /// Burners in a deterministic order (sorted by name), so dispatch
    /// outcomes are reproducible across runs.
    pub fn names_in_dispatch_order(&self) -> Vec<BurnerName> {
        let mut names: Vec<_> = self.burners.keys().cloned().collect();
        names.sort();
        names
    }

    /// The union of every burner's held images. Always recomputed, never
    /// cached, so it can never drift from the registry it was built from.
    pub fn available_images(&self) -> BTreeSet<String> {
        self.burners.values().flat_map(|b| b.images.iter().cloned()).collect()
    }

    /// A by-value snapshot of every registered burner, for the operator UI.
    pub fn snapshot(&self) -> Vec<BurnerSnapshot> {
        let mut snapshots: Vec<_> = self.burners.values().map(Burner::snapshot).collect();
        snapshots.sort_by(|a, b| a.name.cmp(&b.name));
        snapshots
    }

    pub fn len(&self) -> usize {
        self.burners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.burners.is_empty()
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
