// SPDX-License-Identifier: MIT

//! The receiver thread: drains the UDP socket and hands raw datagram bytes
//! off to the validator. This is the only component permitted to block on
//! `recv_from`; it never parses or inspects the bytes it forwards.

use auditor_core::metrics::Metrics;
use crossbeam_channel::Sender;
use std::net::UdpSocket;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Must accommodate the largest expected batch plus the 12-byte header and
/// 64-byte signature.
pub const RECV_BUFFER_LEN: usize = 3600;

/// Drain `socket` until `shutdown` is set, forwarding each datagram's bytes
/// to `packet_tx`. `socket` must already have a read timeout set so the
/// shutdown flag gets checked periodically even with no traffic.
pub fn run(socket: UdpSocket, packet_tx: Sender<Vec<u8>>, shutdown: Arc<AtomicBool>, metrics: Metrics) {
    let mut buf = [0u8; RECV_BUFFER_LEN];
    loop {
        match socket.recv_from(&mut buf) {
            Ok((n, _addr)) => {
                metrics.record_received();
                if packet_tx.send(buf[..n].to_vec()).is_err() {
                    break;
                }
            }
            Err(e)
                if matches!(
                    e.kind(),
                    std::io::ErrorKind::WouldBlock | std::io::ErrorKind::TimedOut
                ) =>
            {
                if shutdown.load(Ordering::Relaxed) {
                    break;
                }
            }
            Err(e) => {
                tracing::error!("recv_from failed: {e}");
                if shutdown.load(Ordering::Relaxed) {
                    break;
                }
            }
        }
    }
    tracing::info!("receiver stopped");
}
