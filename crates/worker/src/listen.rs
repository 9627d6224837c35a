// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Custom Burner Project

//! The worker's TCP accept loop: waits for the coordinator to push burn
//! requests, burns the named image if held, and reports the outcome back
//! on a fresh connection once done.

use crate::executor::BurnExecutor;
use crate::report::report_burn_result;
use cb_wire::{handshake_as_acceptor, read_goodbye, read_request_burn, CommandKind, LineStream};
use std::collections::BTreeSet;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

/// Everything a connection handler needs to answer a pushed burn request.
pub struct WorkerState {
    pub name: String,
    pub iso_dir: std::path::PathBuf,
    pub images: BTreeSet<String>,
    pub executor: Arc<dyn BurnExecutor>,
    pub server_host: String,
    pub server_port: u16,
}

/// Run the accept loop until `shutdown` is triggered or the coordinator
/// says goodbye, then return once every spawned handler has finished.
///
/// Returns `true` if the coordinator was the one who ended things (a
/// `"Bye bye"` arrived), so the caller knows not to send its own goodbye
/// on the way out.
pub async fn run(state: Arc<WorkerState>, listener: TcpListener, shutdown: CancellationToken) -> bool {
    let received_goodbye = Arc::new(AtomicBool::new(false));
    let mut handlers = JoinSet::new();
    loop {
        tokio::select! {
            biased;
            () = shutdown.cancelled() => break,
            accepted = listener.accept() => {
                match accepted {
                    Ok((stream, peer)) => {
                        let state = Arc::clone(&state);
                        let received_goodbye = Arc::clone(&received_goodbye);
                        let shutdown = shutdown.clone();
                        handlers.spawn(async move {
                            if let Err(e) = handle_connection(&state, stream, peer, &received_goodbye, &shutdown).await {
                                tracing::warn!(%peer, error = %e, "connection handling failed");
                            }
                        });
                    }
                    Err(e) => tracing::error!(error = %e, "failed to accept connection"),
                }
            }
        }
    }
    tracing::info!("listener shutting down, joining outstanding handlers");
    while handlers.join_next().await.is_some() {}
    received_goodbye.load(Ordering::SeqCst)
}

async fn handle_connection(
    state: &WorkerState,
    stream: TcpStream,
    peer: SocketAddr,
    received_goodbye: &AtomicBool,
    shutdown: &CancellationToken,
) -> Result<(), cb_wire::ProtocolError> {
    let mut line = LineStream::new(stream);
    handshake_as_acceptor(&mut line).await?;

    let command = line.read_line().await?;
    let Some(kind) = CommandKind::parse(&command) else {
        tracing::warn!(%peer, %command, "unrecognized command from peer");
        return Ok(());
    };

    match kind {
        CommandKind::RequestBurn => {
            let payload = read_request_burn(&mut line).await?;
            if state.images.contains(&payload.image) {
                line.write_line(cb_wire::literals::ACK).await?;
                spawn_burn(state, payload);
            } else {
                line.write_line(cb_wire::literals::REPLY_NO_SUCH_ISO).await?;
            }
        }
        CommandKind::Goodbye => {
            read_goodbye(&mut line, false).await?;
            tracing::info!(%peer, "coordinator said goodbye");
            received_goodbye.store(true, Ordering::SeqCst);
            shutdown.cancel();
        }
        _ => {
            tracing::warn!(%peer, ?kind, "unexpected command on worker's listening side, dropping");
        }
    }
    Ok(())
}

/// Burn `payload.image` on a detached task and report the outcome back to
/// the coordinator. Detached rather than joined by the caller: the
/// connection that delivered the request has already been ACKed and
/// closed, per the wire table, so nothing is waiting on this task.
fn spawn_burn(state: &WorkerState, payload: cb_wire::BurnRequestPayload) {
    let name = state.name.clone();
    let image_path = state.iso_dir.join(&payload.image);
    let executor = Arc::clone(&state.executor);
    let host = state.server_host.clone();
    let port = state.server_port;
    tokio::spawn(async move {
        let success = burn_one(executor.as_ref(), &image_path).await;
        if let Err(e) = report_burn_result(&host, port, success, &name, &payload.image, &payload.committer).await {
            tracing::error!(error = %e, image = %payload.image, "failed to report burn outcome");
        }
    });
}

async fn burn_one(executor: &dyn BurnExecutor, image_path: &Path) -> bool {
    executor.burn(image_path).await
}

#[cfg(test)]
#[path = "listen_tests.rs"]
mod tests;
