// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Custom Burner Project

//! Startup and shutdown sequencing for the `cbd` binary.
//!
//! Acquire an exclusive lock on the state directory first (so a second
//! instance fails fast instead of corrupting the snapshot), then load
//! whatever state already exists, then bind the listening socket, then
//! serve.

use crate::config::Config;
use crate::control::notify_all_burners_goodbye;
use crate::coordinator::Coordinator;
use crate::error::LifecycleError;
use crate::ingress;
use cb_core::SystemClock;
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

/// Holds the coordinator's exclusive lock file for the process lifetime.
/// Dropping this releases the lock.
pub struct LockGuard {
    _file: File,
}

fn acquire_lock(config: &Config) -> Result<LockGuard, LifecycleError> {
    if let Some(parent) = config.lock_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().write(true).create(true).truncate(false).open(&config.lock_path)?;
    file.try_lock_exclusive().map_err(|_| LifecycleError::AlreadyRunning(config.lock_path.clone()))?;
    Ok(LockGuard { _file: file })
}

fn load_or_empty(config: &Config) -> Coordinator<SystemClock> {
    match cb_storage::snapshot::load(&config.state_path) {
        Ok(Some(snapshot)) => {
            tracing::info!(path = %config.state_path.display(), "loaded persisted state");
            Coordinator::from_snapshot(config.state_path.clone(), snapshot, SystemClock)
        }
        Ok(None) => {
            tracing::info!(path = %config.state_path.display(), "no persisted state, starting empty");
            Coordinator::empty(config.state_path.clone())
        }
        Err(e) => {
            tracing::error!(error = %e, path = %config.state_path.display(), "failed to load persisted state, starting empty");
            Coordinator::empty(config.state_path.clone())
        }
    }
}

/// Acquire the instance lock, load state, and bind the listening socket.
/// Returns everything `serve` needs to run the coordinator.
pub async fn startup(
    config: &Config,
) -> Result<(LockGuard, Arc<Coordinator<SystemClock>>, TcpListener), LifecycleError> {
    let lock = acquire_lock(config)?;
    let coordinator = Arc::new(load_or_empty(config));
    let listener = TcpListener::bind(("0.0.0.0", config.port))
        .await
        .map_err(|source| LifecycleError::BindFailed { port: config.port, source })?;
    tracing::info!(port = config.port, "listening");
    Ok((lock, coordinator, listener))
}

/// Run the ingress accept loop until `shutdown` is triggered, then notify
/// every registered burner and return. The lock guard is dropped by the
/// caller once this returns, releasing it as the process exits.
pub async fn serve(
    coordinator: Arc<Coordinator<SystemClock>>,
    listener: TcpListener,
    shutdown: CancellationToken,
) {
    ingress::run(Arc::clone(&coordinator), listener, shutdown).await;
    notify_all_burners_goodbye(&coordinator).await;
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;
