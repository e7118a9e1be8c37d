// SPDX-License-Identifier: MIT

//! checksum-auditor — a UDP integrity auditor.
//!
//! Listens for datagrams carrying chained CRC32 claims over a well-known
//! binary artifact, independently recomputes and RSA-verifies each one, and
//! journals every mismatch to `checksum_failures.log` without interrupting
//! intake. See `auditor-core` for the frame format, CRC chain, crypto, and
//! validation algorithm; this binary only wires the receiver, validator, and
//! journaler threads together around a UDP socket.

mod journaler;
mod receiver;
mod validator;

use anyhow::{Context, Result};
use auditor_core::config::Config;
use auditor_core::metrics::Metrics;
use auditor_core::registry::StreamRegistry;
use clap::Parser;
use std::net::UdpSocket;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:1337";
const LOG_FILE_NAME: &str = "checksum_failures.log";
const JOURNAL_CADENCE: Duration = Duration::from_secs(10);
const SOCKET_POLL_TIMEOUT: Duration = Duration::from_millis(500);

#[derive(Parser, Debug)]
#[command(name = "auditor-server")]
#[command(about = "UDP checksum/RSA integrity auditor", long_about = None)]
struct Args {
    /// Path to the JSON stream configuration file
    #[arg(short, long)]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = args.log_level.parse::<tracing::Level>().unwrap_or(tracing::Level::INFO);
    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .with_thread_ids(true)
        .init();

    tracing::info!("checksum-auditor v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::load(&args.config)
        .with_context(|| format!("loading configuration from {}", args.config.display()))?;
    tracing::info!("loaded {} stream(s) from {}", config.entries.len(), args.config.display());

    let registry = StreamRegistry::load(&config).context("building stream registry")?;

    let socket = UdpSocket::bind(DEFAULT_LISTEN_ADDR)
        .map_err(auditor_core::Error::SocketBind)
        .with_context(|| format!("binding UDP socket on {DEFAULT_LISTEN_ADDR}"))?;
    socket
        .set_read_timeout(Some(SOCKET_POLL_TIMEOUT))
        .context("setting socket read timeout")?;
    tracing::info!("listening on {DEFAULT_LISTEN_ADDR}");

    let metrics = Metrics::new();
    let shutdown = Arc::new(AtomicBool::new(false));

    let (packet_tx, packet_rx) = crossbeam_channel::unbounded::<Vec<u8>>();
    let (failure_tx, failure_rx) = crossbeam_channel::unbounded::<String>();

    let receiver_handle = {
        let shutdown = shutdown.clone();
        let metrics = metrics.clone();
        std::thread::spawn(move || receiver::run(socket, packet_tx, shutdown, metrics))
    };

    let validator_handle = {
        let metrics = metrics.clone();
        std::thread::spawn(move || validator::run(registry, packet_rx, failure_tx, metrics))
    };

    let journaler_handle = {
        let shutdown = shutdown.clone();
        let metrics = metrics.clone();
        std::thread::spawn(move || {
            journaler::run(failure_rx, &PathBuf::from(LOG_FILE_NAME), JOURNAL_CADENCE, metrics, shutdown)
        })
    };

    ctrlc_or_block(&shutdown)?;

    shutdown.store(true, Ordering::Relaxed);
    receiver_handle.join().expect("receiver thread panicked");
    validator_handle.join().expect("validator thread panicked");
    journaler_handle.join().expect("journaler thread panicked");

    let snapshot = metrics.snapshot();
    tracing::info!(
        "shut down cleanly: received={} decoded={} journaled={}",
        snapshot.received,
        snapshot.decoded,
        snapshot.journaled
    );

    Ok(())
}

/// Block the main thread until Ctrl+C / SIGINT, then return so the caller
/// can flip the shutdown flag.
fn ctrlc_or_block(shutdown: &Arc<AtomicBool>) -> Result<()> {
    let shutdown = shutdown.clone();
    ctrlc::set_handler(move || {
        shutdown.store(true, Ordering::Relaxed);
    })
    .context("installing Ctrl+C handler")?;

    while !shutdown.load(Ordering::Relaxed) {
        std::thread::sleep(Duration::from_millis(200));
    }
    Ok(())
}
