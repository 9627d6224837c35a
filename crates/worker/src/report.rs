// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Custom Burner Project

//! Worker-initiated reports back to the coordinator: the burn outcome
//! after executing a pushed request, and the goodbye sent when this
//! worker shuts down on its own (rather than being told to by the
//! coordinator).

use cb_wire::{handshake_as_initiator, send_burn_report, send_goodbye, LineStream, ProtocolError};
use tokio::net::TcpStream;

/// Open a fresh connection and report whether `image` burned successfully
/// for `committer`, identifying this worker as `burner`.
pub async fn report_burn_result(
    host: &str,
    port: u16,
    success: bool,
    burner: &str,
    image: &str,
    committer: &str,
) -> Result<(), ProtocolError> {
    let stream = TcpStream::connect((host, port)).await?;
    let mut line = LineStream::new(stream);
    handshake_as_initiator(&mut line).await?;
    send_burn_report(&mut line, success, burner, image, committer).await
}

/// Tell the coordinator this worker is going away voluntarily. Only
/// called when this worker initiates its own shutdown (e.g. `Ctrl-C`) —
/// a coordinator-initiated "Bye bye" needs no reply in kind.
pub async fn say_goodbye(host: &str, port: u16, name: &str) -> Result<(), ProtocolError> {
    let stream = TcpStream::connect((host, port)).await?;
    let mut line = LineStream::new(stream);
    handshake_as_initiator(&mut line).await?;
    send_goodbye(&mut line, Some(name)).await
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
