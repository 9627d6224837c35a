// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Custom Burner Project

//! Startup-time scan of the held-image directory and registration with
//! the coordinator.

use crate::error::WorkerError;
use cb_wire::{handshake_as_initiator, send_register, LineStream};
use std::collections::BTreeSet;
use std::path::Path;
use tokio::net::TcpStream;

/// List the image filenames held in `iso_dir`, non-recursively — a flat
/// directory listing, not a recursive walk or a content hash.
pub fn scan_iso_dir(iso_dir: &Path) -> Result<BTreeSet<String>, WorkerError> {
    let entries = std::fs::read_dir(iso_dir)
        .map_err(|source| WorkerError::IsoDirUnreadable { path: iso_dir.to_path_buf(), source })?;
    let mut images = BTreeSet::new();
    for entry in entries {
        let entry = entry.map_err(|source| WorkerError::IsoDirUnreadable { path: iso_dir.to_path_buf(), source })?;
        if let Some(name) = entry.file_name().to_str() {
            images.insert(name.to_string());
        }
    }
    Ok(images)
}

/// Connect to the coordinator and run the `"Please register me"` exchange
/// as initiator, advertising `name`, `local_port`, and `images`.
pub async fn register_with_coordinator(
    host: &str,
    port: u16,
    name: &str,
    local_port: u16,
    images: &BTreeSet<String>,
) -> Result<(), WorkerError> {
    let do_register = async {
        let stream = TcpStream::connect((host, port)).await?;
        let mut line = LineStream::new(stream);
        handshake_as_initiator(&mut line).await?;
        let images: Vec<String> = images.iter().cloned().collect();
        send_register(&mut line, name, local_port, &images).await
    };
    do_register.await.map_err(|source| WorkerError::RegistrationFailed { host: host.to_string(), port, source })
}

#[cfg(test)]
#[path = "registration_tests.rs"]
mod tests;
