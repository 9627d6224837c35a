// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Custom Burner Project

//! Line transport and protocol engine shared by the coordinator and
//! worker binaries.
//!
//! Wire format: newline-terminated UTF-8 lines. Every connection opens
//! with a [`handshake`], then exactly one command exchange, then closes —
//! connections are never reused across commands.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod error;
pub mod exchange;
pub mod handshake;
pub mod literals;
pub mod transport;

pub use error::ProtocolError;
pub use exchange::{
    read_burn_report, read_goodbye, read_register, read_request_burn, send_burn_report,
    send_goodbye, send_register, send_request_burn, BurnOutcome, BurnReportPayload,
    BurnRequestPayload, CommandKind, RegisterPayload,
};
pub use handshake::{handshake_as_acceptor, handshake_as_initiator};
pub use transport::LineStream;
