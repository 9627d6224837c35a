// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Custom Burner Project

//! The coordinator's TCP accept loop.
//!
//! Every inbound connection runs the acceptor handshake, then reads
//! exactly one command line and dispatches to the matching handler.
//! `"Please burn"` never arrives here — that exchange is always initiated
//! by the coordinator against a worker, in [`crate::dispatch`].

use crate::coordinator::Coordinator;
use crate::dispatch::dispatch_pass;
use crate::registration::handle_register;
use crate::reports::{report_completion, report_failure, report_goodbye};
use cb_core::Clock;
use cb_wire::{handshake_as_acceptor, read_burn_report, read_goodbye, read_register, CommandKind, LineStream};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

/// Run the accept loop until `shutdown` is triggered, then return once
/// every spawned handler has finished.
///
/// Each connection is handled on its own task so one slow or malformed
/// peer can't stall registration or burn reports from others. A
/// `CancellationToken` rather than a polling interval gives the same
/// externally-observable "stop accepting promptly" behavior.
pub async fn run<C: Clock + Send + Sync + 'static>(
    coordinator: Arc<Coordinator<C>>,
    listener: TcpListener,
    shutdown: CancellationToken,
) {
    let mut handlers = JoinSet::new();
    loop {
        tokio::select! {
            biased;
            () = shutdown.cancelled() => break,
            accepted = listener.accept() => {
                match accepted {
                    Ok((stream, peer)) => {
                        let coordinator = Arc::clone(&coordinator);
                        handlers.spawn(async move {
                            if let Err(e) = handle_connection(&coordinator, stream, peer).await {
                                tracing::warn!(%peer, error = %e, "connection handling failed");
                            }
                        });
                    }
                    Err(e) => tracing::error!(error = %e, "failed to accept connection"),
                }
            }
        }
    }
    tracing::info!("ingress shutting down, joining outstanding handlers");
    while handlers.join_next().await.is_some() {}
}

async fn handle_connection<C: Clock>(
    coordinator: &Coordinator<C>,
    stream: TcpStream,
    peer: SocketAddr,
) -> Result<(), cb_wire::ProtocolError> {
    let mut line = LineStream::new(stream);
    handshake_as_acceptor(&mut line).await?;

    let command = line.read_line().await?;
    let Some(kind) = CommandKind::parse(&command) else {
        tracing::warn!(%peer, %command, "unrecognized command from peer");
        return Ok(());
    };

    match kind {
        CommandKind::Register => {
            let payload = read_register(&mut line).await?;
            tracing::info!(%peer, name = %payload.name, "burner registered");
            handle_register(coordinator, peer.ip(), payload);
            dispatch_pass(coordinator).await;
        }
        CommandKind::BurnSuccess => {
            let payload = read_burn_report(&mut line).await?;
            report_completion(coordinator, &payload.burner, &payload.image);
            dispatch_pass(coordinator).await;
        }
        CommandKind::BurnFailure => {
            let payload = read_burn_report(&mut line).await?;
            report_failure(coordinator, &payload.burner, &payload.image);
            dispatch_pass(coordinator).await;
        }
        CommandKind::Goodbye => {
            let name = read_goodbye(&mut line, true).await?;
            if let Some(name) = name {
                report_goodbye(coordinator, &name);
            }
        }
        CommandKind::RequestBurn => {
            tracing::warn!(%peer, "received a burn-request push on the ingress side, dropping");
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "ingress_tests.rs"]
mod tests;
