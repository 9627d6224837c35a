// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Custom Burner Project

//! Shared scaffolding for the workspace-level specs: a harness coordinator
//! (the real ingress loop and dispatch engine, wired to a temp state
//! directory) and a scriptable fake burner speaking the real wire
//! protocol, so these tests exercise the same code paths a real worker
//! would hit rather than re-deriving behavior against the unit-level
//! mocks already covered per-crate.

use assert_cmd::Command;
use cb_coordinator::Coordinator;
use cb_core::FakeClock;
use cb_storage::{JobQueue, Registry};
use cb_wire::{
    handshake_as_acceptor, handshake_as_initiator, read_request_burn, send_burn_report, send_goodbye, send_register,
    BurnRequestPayload, LineStream,
};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::Path;
use std::sync::Arc;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

pub fn localhost() -> IpAddr {
    IpAddr::V4(Ipv4Addr::LOCALHOST)
}

/// An `assert_cmd` handle for the coordinator binary under test.
pub fn cbd() -> Command {
    Command::cargo_bin("cbd").expect("cbd binary should build")
}

/// An `assert_cmd` handle for the worker binary under test.
pub fn cbw() -> Command {
    Command::cargo_bin("cbw").expect("cbw binary should build")
}

/// A running coordinator: the real ingress accept loop over a harness
/// `Coordinator`, backed by a temp-dir state file so persistence round
/// trips are exercised exactly as in production.
pub struct Harness {
    pub coordinator: Arc<Coordinator<FakeClock>>,
    pub addr: SocketAddr,
    shutdown: CancellationToken,
    handle: Option<tokio::task::JoinHandle<()>>,
}

impl Harness {
    pub async fn start(state_path: &Path) -> Self {
        Self::start_with(Coordinator::with_clock(state_path, JobQueue::new(), Registry::new(), FakeClock::new())).await
    }

    pub async fn start_with(coordinator: Coordinator<FakeClock>) -> Self {
        let coordinator = Arc::new(coordinator);
        let listener = TcpListener::bind((localhost(), 0)).await.expect("bind harness coordinator");
        let addr = listener.local_addr().expect("local_addr");
        let shutdown = CancellationToken::new();
        let handle = {
            let coordinator = Arc::clone(&coordinator);
            let shutdown = shutdown.clone();
            tokio::spawn(async move { cb_coordinator::ingress::run(coordinator, listener, shutdown).await })
        };
        Self { coordinator, addr, shutdown, handle: Some(handle) }
    }

    pub async fn refresh(&self) {
        cb_coordinator::control::trigger_refresh(&self.coordinator).await;
    }

    pub async fn shutdown(mut self) {
        self.shutdown.cancel();
        if let Some(handle) = self.handle.take() {
            handle.await.expect("harness ingress task");
        }
    }
}

impl Drop for Harness {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

/// What the fake burner does with a pushed `"Please burn"` request.
#[derive(Clone, Copy, Debug)]
pub enum BurnScript {
    Accept,
    Refuse,
}

/// A scriptable stand-in for a worker: listens for pushed burn requests,
/// answers per `script`, and forwards each received request over an
/// mpsc channel so a test can assert on it. Speaks the real wire
/// protocol (`cb-wire`), not a simplified re-implementation of it.
pub struct FakeBurner {
    pub port: u16,
    received: mpsc::UnboundedReceiver<BurnRequestPayload>,
}

impl FakeBurner {
    pub async fn spawn(script: BurnScript) -> Self {
        let listener = TcpListener::bind((localhost(), 0)).await.expect("bind fake burner");
        let port = listener.local_addr().expect("local_addr").port();
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(async move {
            loop {
                let Ok((stream, _)) = listener.accept().await else { break };
                let tx = tx.clone();
                tokio::spawn(async move {
                    let mut line = LineStream::new(stream);
                    if handshake_as_acceptor(&mut line).await.is_err() {
                        return;
                    }
                    let Ok(command) = line.read_line().await else { return };
                    if command == cb_wire::literals::CMD_REQUEST_BURN {
                        let Ok(payload) = read_request_burn(&mut line).await else { return };
                        let reply = match script {
                            BurnScript::Accept => cb_wire::literals::ACK,
                            BurnScript::Refuse => cb_wire::literals::REPLY_NO_SUCH_ISO,
                        };
                        let _ = line.write_line(reply).await;
                        let _ = tx.send(payload);
                    }
                });
            }
        });
        Self { port, received: rx }
    }

    /// Register this fake burner with `coordinator_addr` as `name`, holding `images`.
    pub async fn register(coordinator_addr: SocketAddr, name: &str, port: u16, images: &[&str]) {
        let stream = TcpStream::connect(coordinator_addr).await.expect("connect to coordinator");
        let mut line = LineStream::new(stream);
        handshake_as_initiator(&mut line).await.expect("handshake");
        let images: Vec<String> = images.iter().map(|s| s.to_string()).collect();
        send_register(&mut line, name, port, &images).await.expect("register");
    }

    pub async fn report_success(coordinator_addr: SocketAddr, name: &str, image: &str, committer: &str) {
        let stream = TcpStream::connect(coordinator_addr).await.expect("connect to coordinator");
        let mut line = LineStream::new(stream);
        handshake_as_initiator(&mut line).await.expect("handshake");
        send_burn_report(&mut line, true, name, image, committer).await.expect("report success");
    }

    pub async fn report_failure(coordinator_addr: SocketAddr, name: &str, image: &str, committer: &str) {
        let stream = TcpStream::connect(coordinator_addr).await.expect("connect to coordinator");
        let mut line = LineStream::new(stream);
        handshake_as_initiator(&mut line).await.expect("handshake");
        send_burn_report(&mut line, false, name, image, committer).await.expect("report failure");
    }

    pub async fn say_goodbye(coordinator_addr: SocketAddr, name: &str) {
        let stream = TcpStream::connect(coordinator_addr).await.expect("connect to coordinator");
        let mut line = LineStream::new(stream);
        handshake_as_initiator(&mut line).await.expect("handshake");
        send_goodbye(&mut line, Some(name)).await.expect("goodbye");
    }

    /// Wait for the next burn request this fake burner received.
    pub async fn next_request(&mut self) -> BurnRequestPayload {
        tokio::time::timeout(std::time::Duration::from_secs(2), self.received.recv())
            .await
            .expect("timed out waiting for a pushed burn request")
            .expect("fake burner channel closed")
    }
}
