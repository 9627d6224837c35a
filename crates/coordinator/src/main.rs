// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Custom Burner Project

//! Custom Burner coordinator (`cbd`).
//!
//! Tracks registered burners and queued burn jobs, and pushes burn
//! requests to idle, image-capable burners as both become available.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

use cb_coordinator::config::Config;
use cb_coordinator::{lifecycle, LifecycleError};
use clap::Parser;
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Custom Burner coordinator — dispatches queued burn jobs to registered burners.
#[derive(Debug, Parser)]
#[command(name = "cbd", version)]
struct Cli {
    /// Listen port.
    #[arg(short = 'p', long = "port", default_value_t = 1234)]
    port: u16,

    /// Raise the log level; repeat for more detail (info -> debug -> trace).
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,

    /// Write logs to this file, or "-" for stdout (the default).
    #[arg(short = 'l', long = "logfile", default_value = "-")]
    logfile: String,

    /// Directory holding the persisted state and lock files.
    #[arg(long = "state-dir", default_value = ".")]
    state_dir: PathBuf,

    /// Select the curses operator interface. Not built into this binary.
    #[arg(short = 'c', long = "curses")]
    curses: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if cli.curses {
        eprintln!("cbd: the curses operator interface is not part of this build");
        std::process::exit(2);
    }

    let _guard = setup_logging(cli.verbose, &cli.logfile);

    let config = Config::new(cli.port, cli.state_dir);
    let (lock, coordinator, listener) = match lifecycle::startup(&config).await {
        Ok(started) => started,
        Err(LifecycleError::AlreadyRunning(path)) => {
            eprintln!("cbd: another instance is already running (lock held on {})", path.display());
            std::process::exit(1);
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to start coordinator");
            eprintln!("cbd: {e}");
            std::process::exit(1);
        }
    };

    let shutdown = CancellationToken::new();
    let serve_shutdown = shutdown.clone();
    let serve = tokio::spawn(lifecycle::serve(coordinator, listener, serve_shutdown));

    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("received shutdown signal"),
        Err(e) => tracing::error!(error = %e, "failed to listen for shutdown signal"),
    }
    shutdown.cancel();
    let _ = serve.await;
    drop(lock);
    tracing::info!("coordinator stopped");
}

/// Raise the default filter level with each `-v`. Returns a guard that
/// must be kept alive for the process lifetime when logging to a file.
fn setup_logging(verbosity: u8, logfile: &str) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let default_level = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    if logfile == "-" {
        tracing_subscriber::registry().with(filter).with(fmt::layer()).init();
        None
    } else {
        let path = PathBuf::from(logfile);
        let (dir, name) = match (path.parent(), path.file_name()) {
            (Some(dir), Some(name)) if !dir.as_os_str().is_empty() => (dir.to_path_buf(), name.to_owned()),
            _ => (PathBuf::from("."), path.as_os_str().to_owned()),
        };
        let appender = tracing_appender::rolling::never(dir, name);
        let (non_blocking, guard) = tracing_appender::non_blocking(appender);
        tracing_subscriber::registry().with(filter).with(fmt::layer().with_writer(non_blocking)).init();
        Some(guard)
    }
}
