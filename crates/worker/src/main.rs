// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Custom Burner Project

//! Custom Burner worker (`cbw`).
//!
//! Scans a directory of held ISO images, registers with a coordinator,
//! then listens for pushed burn requests and reports the outcome back.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

use cb_worker::config::Config;
use cb_worker::executor::ShellBurnExecutor;
use cb_worker::listen::{self, WorkerState};
use cb_worker::registration::{register_with_coordinator, scan_iso_dir};
use cb_worker::report::say_goodbye;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Custom Burner worker — registers held ISOs with a coordinator and burns
/// on request.
#[derive(Debug, Parser)]
#[command(name = "cbw", version)]
struct Cli {
    /// Burner name to register under (defaults to the local hostname).
    #[arg(short = 'n', long = "name")]
    name: Option<String>,

    /// Directory containing the ISO images this burner holds.
    #[arg(short = 'd', long = "dir", default_value = ".")]
    dir: PathBuf,

    /// Burner device file (overridden by --cmd).
    #[arg(short = 'D', long = "device")]
    device: Option<String>,

    /// Burning speed (overridden by --cmd).
    #[arg(short = 'S', long = "speed")]
    speed: Option<u32>,

    /// Custom command to burn an ISO, with `{}` substituted for its path.
    /// Overrides --device and --speed.
    #[arg(short = 'c', long = "cmd")]
    cmd: Option<String>,

    /// TCP port this worker listens on for pushed burn requests.
    #[arg(short = 'p', long = "port", default_value_t = 1235)]
    port: u16,

    /// Hostname or IP address of the coordinator.
    #[arg(short = 's', long = "server", default_value = "127.0.0.1")]
    server: String,

    /// TCP port of the coordinator.
    #[arg(short = 't', long = "serverport", default_value_t = 1234)]
    server_port: u16,

    /// Raise the log level; repeat for more detail (info -> debug -> trace).
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let name = cli.name.clone().unwrap_or_else(default_name(&cli));
    let config = Config {
        name,
        iso_dir: cli.dir,
        device: cli.device,
        speed: cli.speed,
        custom_burn_command: cli.cmd,
        local_port: cli.port,
        server_host: cli.server,
        server_port: cli.server_port,
    };

    let command_template = match config.burn_command_template() {
        Ok(template) => template,
        Err(e) => {
            eprintln!("cbw: {e}");
            std::process::exit(1);
        }
    };

    let images = match scan_iso_dir(&config.iso_dir) {
        Ok(images) => images,
        Err(e) => {
            tracing::error!(error = %e, "failed to scan iso directory");
            eprintln!("cbw: {e}");
            std::process::exit(1);
        }
    };
    tracing::debug!(?images, "isos available to burn");

    let listener = match TcpListener::bind(("0.0.0.0", config.local_port)).await {
        Ok(listener) => listener,
        Err(source) => {
            let e = cb_worker::WorkerError::BindFailed { port: config.local_port, source };
            tracing::error!(error = %e, "failed to bind listening socket");
            eprintln!("cbw: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) =
        register_with_coordinator(&config.server_host, config.server_port, &config.name, config.local_port, &images)
            .await
    {
        tracing::error!(error = %e, "failed to register with coordinator");
        eprintln!("cbw: {e}");
        std::process::exit(1);
    }
    tracing::info!(name = %config.name, server = %config.server_host, port = config.server_port, "registered");

    let state = Arc::new(WorkerState {
        name: config.name.clone(),
        iso_dir: config.iso_dir.clone(),
        images,
        executor: Arc::new(ShellBurnExecutor::new(command_template)),
        server_host: config.server_host.clone(),
        server_port: config.server_port,
    });

    let shutdown = CancellationToken::new();
    let listen_shutdown = shutdown.clone();
    let listen_handle = tokio::spawn(listen::run(state, listener, listen_shutdown));

    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            if let Err(e) = result {
                tracing::error!(error = %e, "failed to listen for shutdown signal");
            }
            shutdown.cancel();
        }
        () = shutdown.cancelled() => {}
    }

    let coordinator_said_goodbye = listen_handle.await.unwrap_or(false);
    if !coordinator_said_goodbye {
        if let Err(e) = say_goodbye(&config.server_host, config.server_port, &config.name).await {
            tracing::warn!(error = %e, "failed to say goodbye to coordinator");
        }
    }
    tracing::info!("worker stopped");
}

/// The original's fallback: local hostname, suffixed with the device file
/// when one was given, so two burners on the same host with different
/// drives don't collide on name.
fn default_name(cli: &Cli) -> impl FnOnce() -> String + '_ {
    move || {
        let hostname = hostname_or_fallback();
        match &cli.device {
            Some(device) => format!("{hostname}-{device}"),
            None => hostname,
        }
    }
}

fn hostname_or_fallback() -> String {
    std::env::var("HOSTNAME")
        .ok()
        .or_else(|| {
            std::process::Command::new("hostname")
                .output()
                .ok()
                .filter(|o| o.status.success())
                .and_then(|o| String::from_utf8(o.stdout).ok())
                .map(|s| s.trim().to_string())
        })
        .unwrap_or_else(|| "burner".to_string())
}

fn setup_logging(verbosity: u8) {
    let default_level = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry().with(filter).with(fmt::layer()).init();
}
