// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Custom Burner Project

//! The command-level exchanges that follow a completed handshake. Each
//! command uses one fresh connection; nothing here reuses a stream across
//! exchanges. Initiator-side functions send a command and return the
//! parsed reply; acceptor-side functions parse a command a caller has
//! already identified by its first line and write the appropriate
//! acknowledgement(s).

use crate::error::ProtocolError;
use crate::literals::{
    ACK, CMD_BURN_ERROR, CMD_BURN_SUCCESS, CMD_CLOSING, CMD_HAS_ISOS, CMD_REGISTER,
    CMD_REQUEST_BURN, REPLY_NO_SUCH_ISO,
};
use crate::transport::LineStream;
use tokio::io::{AsyncRead, AsyncWrite};

/// The command line identifying an exchange, once an acceptor has read it
/// off the wire. There is deliberately no `Display`/round-trip back to the
/// literal — callers compare against the `literals` constants directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Register,
    RequestBurn,
    BurnSuccess,
    BurnFailure,
    Goodbye,
}

impl CommandKind {
    pub fn parse(line: &str) -> Option<Self> {
        match line {
            CMD_REGISTER => Some(Self::Register),
            CMD_REQUEST_BURN => Some(Self::RequestBurn),
            CMD_BURN_SUCCESS => Some(Self::BurnSuccess),
            CMD_BURN_ERROR => Some(Self::BurnFailure),
            CMD_CLOSING => Some(Self::Goodbye),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterPayload {
    pub name: String,
    pub port: u16,
    pub images: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BurnReportPayload {
    pub burner: String,
    pub image: String,
    pub committer: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BurnRequestPayload {
    pub date: String,
    pub image: String,
    pub committer: String,
}

/// What a burner replied to a pushed burn request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BurnOutcome {
    Accepted,
    Refused,
}

// ---- initiator side: worker registering with the coordinator ----

pub async fn send_register<S: AsyncRead + AsyncWrite + Unpin>(
    stream: &mut LineStream<S>,
    name: &str,
    port: u16,
    images: &[String],
) -> Result<(), ProtocolError> {
    stream.write_line(CMD_REGISTER).await?;
    stream.expect_line(ACK).await?;
    stream.write_line(name).await?;
    stream.write_line(&port.to_string()).await?;
    stream.write_line(CMD_HAS_ISOS).await?;
    stream.write_line(&images.len().to_string()).await?;
    for image in images {
        stream.write_line(image).await?;
    }
    stream.expect_line(ACK).await
}

// ---- acceptor side: coordinator receiving a registration ----

pub async fn read_register<S: AsyncRead + AsyncWrite + Unpin>(
    stream: &mut LineStream<S>,
) -> Result<RegisterPayload, ProtocolError> {
    stream.write_line(ACK).await?;
    let name = stream.read_line().await?;
    let port = parse_port(&stream.read_line().await?)?;
    stream.expect_line(CMD_HAS_ISOS).await?;
    let count = parse_count(&stream.read_line().await?)?;
    let mut images = Vec::with_capacity(count);
    for _ in 0..count {
        images.push(stream.read_line().await?);
    }
    stream.write_line(ACK).await?;
    Ok(RegisterPayload { name, port, images })
}

// ---- initiator side: coordinator pushing a burn request ----

pub async fn send_request_burn<S: AsyncRead + AsyncWrite + Unpin>(
    stream: &mut LineStream<S>,
    date: &str,
    image: &str,
    committer: &str,
) -> Result<BurnOutcome, ProtocolError> {
    stream.write_line(CMD_REQUEST_BURN).await?;
    stream.write_line(date).await?;
    stream.write_line(image).await?;
    stream.write_line(committer).await?;
    let reply = stream.read_line().await?;
    match reply.as_str() {
        ACK => Ok(BurnOutcome::Accepted),
        REPLY_NO_SUCH_ISO => Ok(BurnOutcome::Refused),
        _ => Err(ProtocolError::UnexpectedLine { expected: format!("{ACK:?} or {REPLY_NO_SUCH_ISO:?}"), got: reply }),
    }
}

// ---- acceptor side: worker receiving a pushed burn request ----

pub async fn read_request_burn<S: AsyncRead + AsyncWrite + Unpin>(
    stream: &mut LineStream<S>,
) -> Result<BurnRequestPayload, ProtocolError> {
    let date = stream.read_line().await?;
    let image = stream.read_line().await?;
    let committer = stream.read_line().await?;
    Ok(BurnRequestPayload { date, image, committer })
}

// ---- initiator side: worker reporting a burn outcome ----

pub async fn send_burn_report<S: AsyncRead + AsyncWrite + Unpin>(
    stream: &mut LineStream<S>,
    success: bool,
    burner: &str,
    image: &str,
    committer: &str,
) -> Result<(), ProtocolError> {
    let command = if success { CMD_BURN_SUCCESS } else { CMD_BURN_ERROR };
    stream.write_line(command).await?;
    stream.write_line(burner).await?;
    stream.write_line(image).await?;
    stream.write_line(committer).await?;
    stream.expect_line(ACK).await
}

// ---- acceptor side: coordinator receiving a burn report ----

pub async fn read_burn_report<S: AsyncRead + AsyncWrite + Unpin>(
    stream: &mut LineStream<S>,
) -> Result<BurnReportPayload, ProtocolError> {
    let burner = stream.read_line().await?;
    let image = stream.read_line().await?;
    let committer = stream.read_line().await?;
    stream.write_line(ACK).await?;
    Ok(BurnReportPayload { burner, image, committer })
}

// ---- goodbye: symmetric, with an optional burner-name line ----

pub async fn send_goodbye<S: AsyncRead + AsyncWrite + Unpin>(
    stream: &mut LineStream<S>,
    burner_name: Option<&str>,
) -> Result<(), ProtocolError> {
    stream.write_line(CMD_CLOSING).await?;
    if let Some(name) = burner_name {
        stream.write_line(name).await?;
    }
    stream.expect_line(ACK).await
}

/// Read the rest of a goodbye once the command line is known. `from_worker`
/// selects whether a burner-name line follows, per the wire table.
pub async fn read_goodbye<S: AsyncRead + AsyncWrite + Unpin>(
    stream: &mut LineStream<S>,
    from_worker: bool,
) -> Result<Option<String>, ProtocolError> {
    let name = if from_worker { Some(stream.read_line().await?) } else { None };
    stream.write_line(ACK).await?;
    Ok(name)
}

fn parse_port(s: &str) -> Result<u16, ProtocolError> {
    s.parse().map_err(|_| ProtocolError::UnexpectedLine { expected: "a port number".into(), got: s.to_string() })
}

fn parse_count(s: &str) -> Result<usize, ProtocolError> {
    s.parse().map_err(|_| ProtocolError::UnexpectedLine { expected: "an image count".into(), got: s.to_string() })
}

#[cfg(test)]
#[path = "exchange_tests.rs"]
mod tests;
