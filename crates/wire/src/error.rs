// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Custom Burner Project

use thiserror::Error;

/// Failure of a transport or protocol exchange. Every variant is handled the
/// same way by callers: log, abandon the exchange, leave state untouched.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("connection dropped mid-line")]
    ConnectionDropped,

    #[error("unexpected line: expected {expected:?}, got {got:?}")]
    UnexpectedLine { expected: String, got: String },

    #[error("version mismatch: expected {expected:?}, got {got:?}")]
    VersionMismatch { expected: String, got: String },

    #[error("unrecognized command line: {0:?}")]
    UnknownCommand(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
