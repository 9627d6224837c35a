// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Custom Burner Project

//! Burner registry records.
//!
//! A `Burner` is a registered worker machine: a network endpoint plus the
//! set of images it reported holding at registration. `current` doubles as
//! the busy flag — a burner is busy exactly when `current` is `Some`, so the
//! `busy ⇔ current present` invariant holds by construction instead of by
//! convention between two independently-settable fields.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::net::IpAddr;

/// Unique key a worker registers under.
pub type BurnerName = String;

/// The job a burner is currently working on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub date: String,
    pub image: String,
    pub committer: String,
}

/// A registered worker machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Burner {
    pub name: BurnerName,
    pub address: IpAddr,
    pub port: u16,
    pub images: BTreeSet<String>,
    current: Option<Assignment>,
}

impl Burner {
    pub fn new(
        name: impl Into<BurnerName>,
        address: IpAddr,
        port: u16,
        images: BTreeSet<String>,
    ) -> Self {
        Self { name: name.into(), address, port, images, current: None }
    }

    pub fn is_busy(&self) -> bool {
        self.current.is_some()
    }

    pub fn current(&self) -> Option<&Assignment> {
        self.current.as_ref()
    }

    pub fn has_image(&self, image: &str) -> bool {
        self.images.contains(image)
    }

    /// Mark this burner as working on `assignment`.
    ///
    /// Callers are responsible for only assigning idle burners; this does
    /// not check `is_busy` itself so that replace-on-reconcile paths can
    /// overwrite a stale assignment explicitly.
    pub fn assign(&mut self, assignment: Assignment) {
        self.current = Some(assignment);
    }

    pub fn mark_free(&mut self) {
        self.current = None;
    }

    /// A read-only copy of this record for returning to the operator UI.
    pub fn snapshot(&self) -> BurnerSnapshot {
        BurnerSnapshot {
            name: self.name.clone(),
            address: self.address,
            port: self.port,
            busy: self.is_busy(),
            current: self.current.clone(),
        }
    }
}

/// By-value view of a [`Burner`] handed to the operator UI. Never aliases
/// the registry's live record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BurnerSnapshot {
    pub name: BurnerName,
    pub address: IpAddr,
    pub port: u16,
    pub busy: bool,
    pub current: Option<Assignment>,
}

#[cfg(test)]
#[path = "burner_tests.rs"]
mod tests;
