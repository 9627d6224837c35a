// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Custom Burner Project

use crate::error::WorkerError;
use std::path::PathBuf;

/// Resolved worker configuration. Assembled from CLI flags in
/// [`crate::main`]; kept separate so tests can construct it directly
/// without going through `clap`.
#[derive(Debug, Clone)]
pub struct Config {
    pub name: String,
    pub iso_dir: PathBuf,
    pub device: Option<String>,
    pub speed: Option<u32>,
    pub custom_burn_command: Option<String>,
    pub local_port: u16,
    pub server_host: String,
    pub server_port: u16,
}

impl Config {
    /// The command template this worker burns with: `--custom-burn-command`
    /// verbatim if given (it overrides `-D`/`-S` per spec), otherwise a
    /// `cdrecord` invocation built from `device`/`speed`.
    ///
    /// Returns `Err` if neither was given — checked once at startup so a
    /// misconfigured worker never gets as far as registering.
    pub fn burn_command_template(&self) -> Result<String, WorkerError> {
        if let Some(cmd) = &self.custom_burn_command {
            return Ok(cmd.clone());
        }
        match (&self.device, self.speed) {
            (Some(device), Some(speed)) => {
                Ok(format!("cdrecord dev={device} speed={speed} driveropts=burnfree -v -eject -data {{}}"))
            }
            _ => Err(WorkerError::MissingBurnParameters),
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
