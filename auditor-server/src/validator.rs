// SPDX-License-Identifier: MIT

//! The validator thread: owns the stream registry exclusively, decodes each
//! queued datagram, and runs it through [`auditor_core::validator`]. Never
//! touches the log file directly — every observed failure is handed off to
//! the journaler as a formatted line.

use auditor_core::metrics::Metrics;
use auditor_core::registry::StreamRegistry;
use auditor_core::{Failure, Packet};
use crossbeam_channel::{Receiver, Sender};

pub fn run(
    mut registry: StreamRegistry,
    packet_rx: Receiver<Vec<u8>>,
    failure_tx: Sender<String>,
    metrics: Metrics,
) {
    while let Ok(bytes) = packet_rx.recv() {
        let failures = match Packet::decode(&bytes) {
            Ok(packet) => {
                metrics.record_decoded();
                auditor_core::validator::validate_in_registry(&mut registry, &packet)
            }
            Err(reason) => vec![Failure::MalformedFrame { reason }],
        };

        for failure in &failures {
            metrics.record_failure(failure);
            if failure_tx.send(failure.to_string()).is_err() {
                return;
            }
        }
    }
    tracing::info!("validator stopped");
}
