// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Custom Burner Project

use thiserror::Error;

/// Failure starting the worker. Every variant here is fatal: the process
/// logs a diagnostic and exits non-zero.
#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("neither --custom-burn-command nor both --device and --speed were given")]
    MissingBurnParameters,

    #[error("failed to read iso directory {path}: {source}")]
    IsoDirUnreadable { path: std::path::PathBuf, #[source] source: std::io::Error },

    #[error("failed to register with coordinator at {host}:{port}: {source}")]
    RegistrationFailed { host: String, port: u16, #[source] source: cb_wire::ProtocolError },

    #[error("failed to bind listening socket on port {port}: {source}")]
    BindFailed { port: u16, #[source] source: std::io::Error },
}
