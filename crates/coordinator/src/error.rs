// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Custom Burner Project

use thiserror::Error;

/// Failure starting the coordinator. Every variant here is fatal: the
/// process logs a diagnostic and exits non-zero.
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("another coordinator instance is already running (lock held on {0})")]
    AlreadyRunning(std::path::PathBuf),

    #[error("failed to bind ingress socket on port {port}: {source}")]
    BindFailed { port: u16, #[source] source: std::io::Error },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
