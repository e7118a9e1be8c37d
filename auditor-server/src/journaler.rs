// SPDX-License-Identifier: MIT

//! The journaler thread: drains the failure queue on a fixed cadence and
//! appends formatted lines to the failures log in a single open-write-close
//! cycle. Loss of in-flight records on abrupt process death is acceptable.

use auditor_core::metrics::Metrics;
use crossbeam_channel::Receiver;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// How often the main loop checks the shutdown flag while waiting out a
/// cadence; small relative to `cadence` so shutdown stays responsive without
/// breaking the 10-second batching contract.
const POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Drain everything currently queued in `failure_rx` and append it to
/// `log_path`. Returns the number of lines written. Pure enough to drive
/// directly from tests without a real sleep.
pub fn drain_tick(failure_rx: &Receiver<String>, log_path: &Path) -> std::io::Result<usize> {
    let mut lines = Vec::new();
    while let Ok(line) = failure_rx.try_recv() {
        lines.push(line);
    }
    if lines.is_empty() {
        return Ok(0);
    }
    let mut file = OpenOptions::new().create(true).append(true).open(log_path)?;
    for line in &lines {
        writeln!(file, "{line}")?;
    }
    Ok(lines.len())
}

/// Run the journaler loop until `shutdown` is set, draining on `cadence`
/// boundaries and once more on the way out.
pub fn run(
    failure_rx: Receiver<String>,
    log_path: &Path,
    cadence: Duration,
    metrics: Metrics,
    shutdown: Arc<AtomicBool>,
) {
    let mut elapsed = Duration::ZERO;
    loop {
        if shutdown.load(Ordering::Relaxed) {
            break;
        }
        std::thread::sleep(POLL_INTERVAL);
        elapsed += POLL_INTERVAL;
        if elapsed < cadence {
            continue;
        }
        elapsed = Duration::ZERO;
        match drain_tick(&failure_rx, log_path) {
            Ok(0) => {}
            Ok(n) => metrics.record_journaled(n as u64),
            Err(e) => tracing::error!("failed to write {}: {e}", log_path.display()),
        }
    }

    match drain_tick(&failure_rx, log_path) {
        Ok(0) => {}
        Ok(n) => metrics.record_journaled(n as u64),
        Err(e) => tracing::error!("failed final drain to {}: {e}", log_path.display()),
    }
    tracing::info!("journaler stopped");
}
