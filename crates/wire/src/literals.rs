// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Custom Burner Project

//! The fixed line literals that make up the wire interface. Every one of
//! these strings is part of the protocol; changing any of them breaks
//! compatibility with anything speaking this protocol.

pub const SERVER_GREETING: &str = "Custom Burner Server";
pub const CLIENT_GREETING: &str = "Custom Burner Client";

/// Current protocol version token. Free-form; both ends must send the
/// identical token during the handshake or the exchange fails.
pub const VERSION: &str = "0.5";

pub const CMD_REGISTER: &str = "Please register me";
pub const CMD_HAS_ISOS: &str = "My isos are:";
pub const CMD_REQUEST_BURN: &str = "Please burn";
pub const CMD_BURN_SUCCESS: &str = "Burn successful";
pub const CMD_BURN_ERROR: &str = "Burn unsuccessful";
pub const CMD_CLOSING: &str = "Bye bye";

pub const REPLY_NO_SUCH_ISO: &str = "I don't have it";
pub const ACK: &str = "Ok";
