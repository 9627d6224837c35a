// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Custom Burner Project

//! The boundary between this worker and the actual burning mechanics.
//!
//! `cdrecord`-specific flag construction and removable-media polling are
//! out of scope here; [`ShellBurnExecutor`] only substitutes the image
//! path into a configured command template and checks the exit status.

use async_trait::async_trait;
use std::path::Path;

/// Burns one image. Implementations decide what "burn" means; the worker
/// only cares whether it succeeded.
#[async_trait]
pub trait BurnExecutor: Send + Sync {
    async fn burn(&self, image_path: &Path) -> bool;
}

/// Substitutes the image's absolute path for the first `{}` in the
/// configured command template and runs it through the shell, reporting
/// success iff the child process exits with status 0.
pub struct ShellBurnExecutor {
    command_template: String,
}

impl ShellBurnExecutor {
    pub fn new(command_template: impl Into<String>) -> Self {
        Self { command_template: command_template.into() }
    }

    fn render(&self, image_path: &Path) -> String {
        self.command_template.replacen("{}", &image_path.display().to_string(), 1)
    }
}

#[async_trait]
impl BurnExecutor for ShellBurnExecutor {
    async fn burn(&self, image_path: &Path) -> bool {
        let command = self.render(image_path);
        tracing::info!(%command, "burning");
        match tokio::process::Command::new("sh").arg("-c").arg(&command).status().await {
            Ok(status) => status.success(),
            Err(e) => {
                tracing::error!(error = %e, %command, "failed to spawn burn command");
                false
            }
        }
    }
}

/// Test-only executor with a scriptable outcome, replacing any actual
/// process invocation.
#[cfg(any(test, feature = "test-support"))]
pub struct FakeBurnExecutor {
    pub outcome: bool,
}

#[cfg(any(test, feature = "test-support"))]
#[async_trait]
impl BurnExecutor for FakeBurnExecutor {
    async fn burn(&self, _image_path: &Path) -> bool {
        self.outcome
    }
}

#[cfg(test)]
#[path = "executor_tests.rs"]
mod tests;
