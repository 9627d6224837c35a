// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Custom Burner Project

use std::path::PathBuf;

/// Coordinator startup configuration. Assembled from CLI flags in
/// [`crate::main`]; kept separate so tests can construct it directly
/// without going through `clap`.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub state_path: PathBuf,
    pub lock_path: PathBuf,
}

impl Config {
    pub fn new(port: u16, state_dir: impl Into<PathBuf>) -> Self {
        let state_dir = state_dir.into();
        Self {
            port,
            state_path: state_dir.join(cb_storage::DEFAULT_STATE_FILE),
            lock_path: state_dir.join("custom_burner_server.lock"),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(1234, ".")
    }
}
