// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Custom Burner Project

//! The fixed four-line greeting/version exchange required at the start of
//! every connection, in either direction. Every wire exchange in this
//! protocol begins with one of these two functions.

use crate::error::ProtocolError;
use crate::literals::{CLIENT_GREETING, SERVER_GREETING, VERSION};
use crate::transport::LineStream;
use tokio::io::{AsyncRead, AsyncWrite};

/// Perform the handshake as the party that accepted the connection.
pub async fn handshake_as_acceptor<S: AsyncRead + AsyncWrite + Unpin>(
    stream: &mut LineStream<S>,
) -> Result<(), ProtocolError> {
    stream.write_line(SERVER_GREETING).await?;
    stream.expect_line(CLIENT_GREETING).await?;
    stream.write_line(VERSION).await?;
    let echoed = stream.read_line().await?;
    if echoed != VERSION {
        return Err(ProtocolError::VersionMismatch { expected: VERSION.to_string(), got: echoed });
    }
    Ok(())
}

/// Perform the handshake as the party that opened the connection.
pub async fn handshake_as_initiator<S: AsyncRead + AsyncWrite + Unpin>(
    stream: &mut LineStream<S>,
) -> Result<(), ProtocolError> {
    stream.expect_line(SERVER_GREETING).await?;
    stream.write_line(CLIENT_GREETING).await?;
    let received_version = stream.read_line().await?;
    if received_version != VERSION {
        return Err(ProtocolError::VersionMismatch {
            expected: VERSION.to_string(),
            got: received_version,
        });
    }
    stream.write_line(&received_version).await?;
    Ok(())
}

#[cfg(test)]
#[path = "handshake_tests.rs"]
mod tests;
