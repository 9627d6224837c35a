// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Custom Burner Project

//! Line transport: newline-terminated UTF-8 frames over a connected stream.
//!
//! The reader buffers arbitrary chunks and hands back whole lines; the
//! buffer persists across calls within one connection. A short write is
//! handled transparently — [`tokio::io::AsyncWriteExt::write_all`] already
//! loops until every byte is accepted by the kernel.
//!
//! Generic over the underlying stream so tests can run over an in-memory
//! duplex instead of a real socket; production code always instantiates
//! this with [`tokio::net::TcpStream`].

use crate::error::ProtocolError;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};

/// A buffered line-oriented wrapper around one connection.
pub struct LineStream<S> {
    inner: BufReader<S>,
}

impl<S: AsyncRead + AsyncWrite + Unpin> LineStream<S> {
    pub fn new(stream: S) -> Self {
        Self { inner: BufReader::new(stream) }
    }

    /// Read one line, stripping the trailing `\n` (and a possible `\r`).
    ///
    /// Blocks until a terminator is observed or the peer closes. A close
    /// with no data, or mid-line, both surface as `ConnectionDropped` —
    /// every call site in this protocol expects a line to follow.
    pub async fn read_line(&mut self) -> Result<String, ProtocolError> {
        let mut line = String::new();
        let n = self.inner.read_line(&mut line).await?;
        if n == 0 {
            return Err(ProtocolError::ConnectionDropped);
        }
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        } else {
            // Peer closed after sending a partial line.
            return Err(ProtocolError::ConnectionDropped);
        }
        Ok(line)
    }

    pub async fn write_line(&mut self, line: &str) -> Result<(), ProtocolError> {
        self.inner.write_all(line.as_bytes()).await?;
        self.inner.write_all(b"\n").await?;
        self.inner.flush().await?;
        Ok(())
    }

    pub async fn expect_line(&mut self, expected: &str) -> Result<(), ProtocolError> {
        let got = self.read_line().await?;
        if got != expected {
            return Err(ProtocolError::UnexpectedLine { expected: expected.to_string(), got });
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "transport_tests.rs"]
mod tests;
