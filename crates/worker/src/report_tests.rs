// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Custom Burner Project

use super::*;
use cb_wire::{handshake_as_acceptor, read_burn_report, read_goodbye, CommandKind, LineStream};
use tokio::net::TcpListener;

#[tokio::test]
async fn report_burn_result_sends_success_command() {
    let listener = TcpListener::bind(("127.0.0.1", 0)).await.expect("bind");
    let addr = listener.local_addr().expect("local_addr");

    let server = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.expect("accept");
        let mut line = LineStream::new(stream);
        handshake_as_acceptor(&mut line).await.expect("handshake");
        let command = line.read_line().await.expect("read command");
        assert_eq!(CommandKind::parse(&command), Some(CommandKind::BurnSuccess));
        read_burn_report(&mut line).await.expect("read burn report")
    });

    report_burn_result(&addr.ip().to_string(), addr.port(), true, "burner-a", "x.iso", "alice")
        .await
        .expect("report_burn_result");

    let payload = server.await.expect("server task");
    assert_eq!(payload.burner, "burner-a");
    assert_eq!(payload.image, "x.iso");
    assert_eq!(payload.committer, "alice");
}

#[tokio::test]
async fn report_burn_result_sends_failure_command_on_false() {
    let listener = TcpListener::bind(("127.0.0.1", 0)).await.expect("bind");
    let addr = listener.local_addr().expect("local_addr");

    let server = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.expect("accept");
        let mut line = LineStream::new(stream);
        handshake_as_acceptor(&mut line).await.expect("handshake");
        let command = line.read_line().await.expect("read command");
        assert_eq!(CommandKind::parse(&command), Some(CommandKind::BurnFailure));
        read_burn_report(&mut line).await.expect("read burn report");
    });

    report_burn_result(&addr.ip().to_string(), addr.port(), false, "burner-a", "x.iso", "alice")
        .await
        .expect("report_burn_result");

    server.await.expect("server task");
}

#[tokio::test]
async fn say_goodbye_sends_name_and_closing_command() {
    let listener = TcpListener::bind(("127.0.0.1", 0)).await.expect("bind");
    let addr = listener.local_addr().expect("local_addr");

    let server = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.expect("accept");
        let mut line = LineStream::new(stream);
        handshake_as_acceptor(&mut line).await.expect("handshake");
        let command = line.read_line().await.expect("read command");
        assert_eq!(CommandKind::parse(&command), Some(CommandKind::Goodbye));
        read_goodbye(&mut line, true).await.expect("read goodbye")
    });

    say_goodbye(&addr.ip().to_string(), addr.port(), "burner-a").await.expect("say_goodbye");

    let name = server.await.expect("server task");
    assert_eq!(name, Some("burner-a".to_string()));
}
